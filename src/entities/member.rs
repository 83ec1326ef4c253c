//! Member entity - A person who can be assigned to invoice items.
//!
//! Members belong to a group's roster. Their avatar initials and palette
//! colour are fixed when they join and never recomputed.

use super::MemberId;
use serde::{Deserialize, Serialize};

/// A group member
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Unique identifier for the member
    pub id: MemberId,
    /// Display name, trimmed
    pub name: String,
    /// Contact email, trimmed
    pub email: String,
    /// Two-letter uppercase initials derived from the name
    pub avatar: String,
    /// Palette colour as `#rrggbb`
    pub color: String,
}

impl Member {
    /// First whitespace-separated token of the name, used for compact column headers.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

/// Raw member data coming from the data-entry layer or the seed config.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMember {
    /// Name as typed
    pub name: String,
    /// Email as typed
    pub email: String,
}

impl NewMember {
    /// Convenience constructor for callers holding string slices.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}
