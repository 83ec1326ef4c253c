//! Edit sessions - the working copy of split assignments while an invoice is edited.
//!
//! Toggling members never touches the invoice itself. The session is only
//! merged into the items' `split_among` by [`crate::core::lifecycle::finalize`].
//!
//! A session knows the group's roster. Only roster members can be added to
//! an item; an id that is no longer on the roster can still be taken off.

use crate::core::split::{ItemSplits, persisted_splits};
use crate::entities::{Invoice, InvoiceId, ItemId, MemberId};
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// In-progress assignment state for one invoice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    invoice_id: InvoiceId,
    roster: BTreeSet<MemberId>,
    splits: ItemSplits,
}

impl EditSession {
    /// Starts a session seeded from each item's persisted `split_among`.
    ///
    /// `roster` is the set of members that may be assigned.
    #[must_use]
    pub fn from_invoice(invoice: &Invoice, roster: impl IntoIterator<Item = MemberId>) -> Self {
        Self {
            invoice_id: invoice.id,
            roster: roster.into_iter().collect(),
            splits: persisted_splits(invoice),
        }
    }

    /// Invoice this session edits.
    #[must_use]
    pub const fn invoice_id(&self) -> InvoiceId {
        self.invoice_id
    }

    /// Current working assignment for every item of the invoice.
    #[must_use]
    pub const fn splits(&self) -> &ItemSplits {
        &self.splits
    }

    /// Replaces the set of assignable members, e.g. after the roster changed.
    ///
    /// Existing assignments are kept.
    pub fn refresh_roster(&mut self, roster: impl IntoIterator<Item = MemberId>) {
        self.roster = roster.into_iter().collect();
    }

    /// Whether the member may be added to items in this session.
    #[must_use]
    pub fn can_assign(&self, member_id: MemberId) -> bool {
        self.roster.contains(&member_id)
    }

    /// Members currently assigned to an item, `None` for an unknown item.
    #[must_use]
    pub fn assigned(&self, item_id: ItemId) -> Option<&BTreeSet<MemberId>> {
        self.splits.get(&item_id)
    }

    /// Whether the member is currently assigned to the item.
    #[must_use]
    pub fn is_assigned(&self, item_id: ItemId, member_id: MemberId) -> bool {
        self.assigned(item_id)
            .is_some_and(|set| set.contains(&member_id))
    }

    /// Flips a member's assignment on an item.
    ///
    /// Returns `Some(true)` when the member is now assigned and `Some(false)`
    /// when they were removed. Returns `None`, doing nothing, when the item
    /// does not belong to this invoice or when the member would be added but
    /// is not on the roster.
    pub fn toggle(&mut self, item_id: ItemId, member_id: MemberId) -> Option<bool> {
        let Some(assigned) = self.splits.get_mut(&item_id) else {
            debug!(
                "Ignoring toggle of {} on unknown item {} (invoice {})",
                member_id, item_id, self.invoice_id
            );
            return None;
        };

        let now_assigned = if assigned.remove(&member_id) {
            false
        } else if self.roster.contains(&member_id) {
            assigned.insert(member_id);
            true
        } else {
            debug!(
                "Ignoring toggle of {} on item {}: not on the roster (invoice {})",
                member_id, item_id, self.invoice_id
            );
            return None;
        };
        trace!(
            invoice = %self.invoice_id,
            item = %item_id,
            member = %member_id,
            now_assigned,
            "Toggled assignment"
        );
        Some(now_assigned)
    }

    /// Replaces an item's assignment wholesale, e.g. "split with everyone".
    ///
    /// Returns `false` and does nothing for an unknown item or when any of the
    /// members is not on the roster.
    pub fn assign_all(
        &mut self,
        item_id: ItemId,
        members: impl IntoIterator<Item = MemberId>,
    ) -> bool {
        let members: BTreeSet<MemberId> = members.into_iter().collect();
        if let Some(stranger) = members.iter().find(|m| !self.roster.contains(m)) {
            debug!(
                "Ignoring assignment of item {}: {} is not on the roster",
                item_id, stranger
            );
            return false;
        }
        match self.splits.get_mut(&item_id) {
            Some(assigned) => {
                *assigned = members;
                true
            }
            None => false,
        }
    }

    /// Clears an item's assignment. Returns `false` for an unknown item.
    pub fn clear(&mut self, item_id: ItemId) -> bool {
        self.assign_all(item_id, std::iter::empty())
    }
}
