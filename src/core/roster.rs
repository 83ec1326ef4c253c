//! Roster management - Handles group creation and member add/remove.
//!
//! New members get initials derived from their name and the first palette
//! colour not already used in the group. Once the palette is exhausted the
//! first colour is handed out again; duplicate colours are accepted.

use crate::{
    entities::{Group, GroupId, IdSequence, Member, MemberId, NewMember},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// Member colours handed out when no palette is configured.
pub const DEFAULT_PALETTE: [&str; 10] = [
    "#3b82f6", "#8b5cf6", "#ec4899", "#10b981", "#f59e0b", "#ef4444", "#06b6d4", "#f97316",
    "#84cc16", "#a855f7",
];

/// Ordered, non-empty list of `#rrggbb` member colours
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<String>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE.iter().map(ToString::to_string).collect(),
        }
    }
}

impl Palette {
    /// Builds a palette, rejecting an empty list or malformed hex colours.
    pub fn new(colors: Vec<String>) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::Config {
                message: "Member palette must contain at least one colour".to_string(),
            });
        }
        if let Some(bad) = colors.iter().find(|c| !is_hex_color(c)) {
            return Err(Error::Config {
                message: format!("Palette colour {bad:?} is not a #rrggbb hex value"),
            });
        }
        Ok(Self { colors })
    }

    /// First colour not present in `used`, or the first colour when all are taken.
    #[must_use]
    pub fn next_color<'a>(&self, used: impl IntoIterator<Item = &'a str> + Clone) -> &str {
        self.colors
            .iter()
            .find(|candidate| !used.clone().into_iter().any(|u| u == candidate.as_str()))
            .unwrap_or(&self.colors[0])
    }
}

fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Two-letter uppercase initials for a display name.
///
/// Uses the first letters of the first two whitespace-separated words, or the
/// first two characters when the name is a single word.
#[must_use]
pub fn initials(name: &str) -> String {
    let mut words = name.split_whitespace();
    match (words.next(), words.next()) {
        (Some(first), Some(second)) => first
            .chars()
            .take(1)
            .chain(second.chars().take(1))
            .flat_map(char::to_uppercase)
            .collect(),
        _ => name.trim().chars().take(2).flat_map(char::to_uppercase).collect(),
    }
}

fn required(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput {
            field,
            reason: "must not be blank".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

/// Builds a member for a roster without attaching it.
///
/// Name and email are trimmed and must not be blank.
pub fn build_member(
    id: MemberId,
    new_member: &NewMember,
    roster: &[Member],
    palette: &Palette,
) -> Result<Member> {
    let name = required("member name", &new_member.name)?;
    let email = required("member email", &new_member.email)?;
    let color = palette
        .next_color(roster.iter().map(|m| m.color.as_str()))
        .to_string();

    Ok(Member {
        id,
        avatar: initials(&name),
        name,
        email,
        color,
    })
}

/// Appends a new member to the group's roster.
pub fn add_member<'g>(
    group: &'g mut Group,
    ids: &mut IdSequence,
    new_member: &NewMember,
    palette: &Palette,
) -> Result<&'g Member> {
    // Validate before allocating so rejected input does not consume an id.
    required("member name", &new_member.name)?;
    required("member email", &new_member.email)?;

    let member = build_member(ids.next_member(), new_member, &group.members, palette)?;
    info!(
        "Added member {} ({}) to group {} with colour {}",
        member.id, member.name, group.id, member.color
    );
    group.members.push(member);
    Ok(&group.members[group.members.len() - 1])
}

/// Removes a member from the roster, returning it.
///
/// Does not enforce a minimum roster size; see [`can_remove_member`].
/// Invoice assignments referencing the member are left untouched.
pub fn remove_member(group: &mut Group, member_id: MemberId) -> Option<Member> {
    let Some(index) = group.members.iter().position(|m| m.id == member_id) else {
        debug!("Member {} is not in group {}, nothing removed", member_id, group.id);
        return None;
    };
    let removed = group.members.remove(index);
    info!("Removed member {} from group {}", removed.id, group.id);
    Some(removed)
}

/// Whether removing a member would still leave the group with at least one.
#[must_use]
pub fn can_remove_member(group: &Group) -> bool {
    group.members.len() > 1
}

/// Builds a new group with zeroed aggregates.
///
/// Rejected when the name is blank, the member list is empty, or any member
/// has a blank name or email. Colours are assigned in list order.
pub fn build_group(
    ids: &mut IdSequence,
    name: &str,
    members: &[NewMember],
    palette: &Palette,
    created_at: DateTime<Utc>,
) -> Result<Group> {
    let name = required("group name", name)?;
    if members.is_empty() {
        return Err(Error::InvalidInput {
            field: "members",
            reason: "a group needs at least one member".to_string(),
        });
    }
    for new_member in members {
        required("member name", &new_member.name)?;
        required("member email", &new_member.email)?;
    }

    let id: GroupId = ids.next_group();
    let mut roster: Vec<Member> = Vec::with_capacity(members.len());
    for new_member in members {
        let member = build_member(ids.next_member(), new_member, &roster, palette)?;
        roster.push(member);
    }

    Ok(Group {
        id,
        name,
        members: roster,
        total_expense: 0.0,
        pending_balance: 0.0,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    fn new_members(names: &[&str]) -> Vec<NewMember> {
        names
            .iter()
            .map(|n| NewMember::new(*n, format!("{}@example.com", n.to_lowercase())))
            .collect()
    }

    fn group_of(names: &[&str]) -> (Group, IdSequence) {
        let mut ids = IdSequence::default();
        let group = build_group(
            &mut ids,
            "Roommates",
            &new_members(names),
            &Palette::default(),
            Utc::now(),
        )
        .unwrap();
        (group, ids)
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("Alex Johnson"), "AJ");
        assert_eq!(initials("sam lee park"), "SL");
        assert_eq!(initials("madonna"), "MA");
        assert_eq!(initials("  jo  "), "JO");
        assert_eq!(initials("Q"), "Q");
        assert_eq!(initials("Émile Zola"), "ÉZ");
    }

    #[test]
    fn test_palette_validation() {
        assert!(Palette::new(vec![]).is_err());
        assert!(Palette::new(vec!["blue".to_string()]).is_err());
        assert!(Palette::new(vec!["#12345".to_string()]).is_err());
        let palette = Palette::new(vec!["#ABCDEF".to_string()]).unwrap();
        assert_eq!(palette.next_color(std::iter::empty::<&str>()), "#ABCDEF");
        assert_eq!(palette.next_color(["#ABCDEF"]), "#ABCDEF");
    }

    #[test]
    fn test_next_color_skips_used() {
        let palette = Palette::default();
        assert_eq!(palette.next_color(std::iter::empty::<&str>()), DEFAULT_PALETTE[0]);
        assert_eq!(
            palette.next_color([DEFAULT_PALETTE[0], DEFAULT_PALETTE[2]]),
            DEFAULT_PALETTE[1]
        );
    }

    #[test]
    fn test_build_group_assigns_distinct_colours() {
        let (group, _) = group_of(&["Alex Johnson", "Sam Lee", "Jordan"]);

        assert_eq!(group.name, "Roommates");
        assert_eq!(group.members.len(), 3);
        assert_eq!(group.total_expense, 0.0);
        assert_eq!(group.pending_balance, 0.0);
        let colours: Vec<&str> = group.members.iter().map(|m| m.color.as_str()).collect();
        assert_eq!(colours, &DEFAULT_PALETTE[..3]);
        assert_eq!(group.members[0].avatar, "AJ");
        assert_eq!(group.members[2].avatar, "JO");
    }

    #[test]
    fn test_build_group_rejections() {
        let mut ids = IdSequence::default();
        let palette = Palette::default();

        let empty = build_group(&mut ids, "Trip", &[], &palette, Utc::now());
        assert!(matches!(empty, Err(Error::InvalidInput { field: "members", .. })));

        let blank_name = build_group(&mut ids, "   ", &new_members(&["A"]), &palette, Utc::now());
        assert!(matches!(
            blank_name,
            Err(Error::InvalidInput { field: "group name", .. })
        ));

        let blank_email = build_group(
            &mut ids,
            "Trip",
            &[NewMember::new("Alex", " ")],
            &palette,
            Utc::now(),
        );
        assert!(matches!(
            blank_email,
            Err(Error::InvalidInput { field: "member email", .. })
        ));
    }

    #[test]
    fn test_add_member_trims_and_appends() {
        let (mut group, mut ids) = group_of(&["Alex"]);
        let member = add_member(
            &mut group,
            &mut ids,
            &NewMember::new("  Sam Lee ", " sam@example.com "),
            &Palette::default(),
        )
        .unwrap();

        assert_eq!(member.name, "Sam Lee");
        assert_eq!(member.email, "sam@example.com");
        assert_eq!(member.avatar, "SL");
        assert_eq!(member.color, DEFAULT_PALETTE[1]);
        assert_eq!(group.members.last().unwrap().name, "Sam Lee");
    }

    #[test]
    fn test_add_member_rejects_blank_fields() {
        let (mut group, mut ids) = group_of(&["Alex"]);
        let palette = Palette::default();

        assert!(add_member(&mut group, &mut ids, &NewMember::new("", "x@y.z"), &palette).is_err());
        assert!(add_member(&mut group, &mut ids, &NewMember::new("Sam", "  "), &palette).is_err());
        assert_eq!(group.members.len(), 1);
    }

    #[test]
    fn test_eleventh_member_reuses_first_colour() {
        let (mut group, mut ids) = group_of(&["Member 1"]);
        let palette = Palette::default();
        for n in 2..=10 {
            add_member(
                &mut group,
                &mut ids,
                &NewMember::new(format!("Member {n}"), format!("m{n}@example.com")),
                &palette,
            )
            .unwrap();
        }
        let eleventh = add_member(
            &mut group,
            &mut ids,
            &NewMember::new("Member 11", "m11@example.com"),
            &palette,
        )
        .unwrap()
        .color
        .clone();

        assert_eq!(group.members.len(), 11);
        assert_eq!(eleventh, group.members[0].color);
    }

    #[test]
    fn test_remove_member() {
        let (mut group, _) = group_of(&["Alex", "Sam"]);
        let sam = group.members[1].id;

        assert!(can_remove_member(&group));
        let removed = remove_member(&mut group, sam).unwrap();
        assert_eq!(removed.name, "Sam");
        assert_eq!(group.members.len(), 1);
        assert!(!can_remove_member(&group));

        assert!(remove_member(&mut group, sam).is_none());
        assert_eq!(group.members.len(), 1);
    }

    #[test]
    fn test_remove_last_member_is_not_blocked() {
        let (mut group, _) = group_of(&["Alex"]);
        let alex = group.members[0].id;

        assert!(remove_member(&mut group, alex).is_some());
        assert!(group.members.is_empty());
    }
}
