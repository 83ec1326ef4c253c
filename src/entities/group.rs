//! Group entity - A roster of members sharing expenses.
//!
//! `total_expense` and `pending_balance` are cached aggregates. They are only
//! written by the balance aggregator's recompute step and must not be trusted
//! after the invoice collection changed without a recompute.

use super::{GroupId, Member, MemberId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An expense-sharing group
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Unique identifier for the group
    pub id: GroupId,
    /// Group name, trimmed
    pub name: String,
    /// Members in insertion order
    pub members: Vec<Member>,
    /// Sum of all invoice totals for this group
    pub total_expense: f64,
    /// Sum of invoice totals not yet reviewed
    pub pending_balance: f64,
    /// When the group was created
    pub created_at: DateTime<Utc>,
}

impl Group {
    /// Roster member ids in insertion order.
    pub fn member_ids(&self) -> impl Iterator<Item = MemberId> + '_ {
        self.members.iter().map(|m| m.id)
    }
}
