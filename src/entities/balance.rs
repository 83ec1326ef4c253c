//! Balance projection - who is owed and who owes within a group.
//!
//! Balances are computed on demand by the aggregator and never stored.

use super::MemberId;
use serde::{Deserialize, Serialize};

/// Net position of one member
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    /// Member this balance belongs to
    pub member_id: MemberId,
    /// Positive when the member is owed money, negative when they owe
    pub amount: f64,
}

impl Balance {
    /// Whether others owe this member.
    #[must_use]
    pub fn is_owed(&self) -> bool {
        self.amount > 0.0
    }

    /// Whether this member owes others.
    #[must_use]
    pub fn owes(&self) -> bool {
        self.amount < 0.0
    }
}
