//! Balance aggregation - Derives group-level figures from the invoice collection.
//!
//! Nothing here is maintained incrementally. The ledger calls
//! [`recompute_group`] after every change to a group's invoices, and readers
//! that hold their own invoice slices can call the pure functions directly.

use crate::{
    core::split::{compute_member_totals, persisted_splits},
    entities::{Balance, Group, GroupId, Invoice, MemberId},
};
use std::collections::BTreeMap;
use tracing::trace;

/// Summary figures for one group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary {
    /// Group being summarized
    pub group_id: GroupId,
    /// Group name
    pub name: String,
    /// Current roster size
    pub member_count: usize,
    /// Number of invoices attached to the group
    pub invoice_count: usize,
    /// Number of those invoices already reviewed
    pub reviewed_count: usize,
    /// Sum of all invoice totals
    pub total_expense: f64,
    /// Sum of totals of invoices not yet reviewed
    pub pending_balance: f64,
}

fn of_group(group_id: GroupId, invoices: &[Invoice]) -> impl Iterator<Item = &Invoice> {
    invoices.iter().filter(move |inv| inv.group_id == group_id)
}

/// Sum of the stored totals of the given invoices.
#[must_use]
pub fn total_expense<'a>(invoices: impl IntoIterator<Item = &'a Invoice>) -> f64 {
    invoices.into_iter().fold(0.0, |acc, inv| acc + inv.total)
}

/// Sum of the stored totals of the given invoices that are not reviewed.
#[must_use]
pub fn pending_balance<'a>(invoices: impl IntoIterator<Item = &'a Invoice>) -> f64 {
    invoices
        .into_iter()
        .filter(|inv| !inv.status.is_reviewed())
        .fold(0.0, |acc, inv| acc + inv.total)
}

/// Refreshes a group's cached aggregates from the full invoice collection.
pub fn recompute_group(group: &mut Group, invoices: &[Invoice]) {
    group.total_expense = total_expense(of_group(group.id, invoices));
    group.pending_balance = pending_balance(of_group(group.id, invoices));
    trace!(
        group = %group.id,
        total_expense = group.total_expense,
        pending_balance = group.pending_balance,
        "Recomputed group aggregates"
    );
}

/// Builds a summary for a group from the full invoice collection.
#[must_use]
pub fn summarize(group: &Group, invoices: &[Invoice]) -> GroupSummary {
    GroupSummary {
        group_id: group.id,
        name: group.name.clone(),
        member_count: group.members.len(),
        invoice_count: of_group(group.id, invoices).count(),
        reviewed_count: of_group(group.id, invoices)
            .filter(|inv| inv.status.is_reviewed())
            .count(),
        total_expense: total_expense(of_group(group.id, invoices)),
        pending_balance: pending_balance(of_group(group.id, invoices)),
    }
}

/// Net balance of each member from the group's reviewed invoices.
///
/// The uploader of an invoice is treated as its payer: they are credited with
/// every member's share of the finalized items and each assigned member is
/// debited their own share, so the uploader's own share cancels out. Only the
/// item shares count; any gap between the stored total and the item subtotal
/// is not distributed.
///
/// Roster members come first in roster order (zero when uninvolved), followed
/// by any former members still referenced by an invoice, in id order.
#[must_use]
pub fn member_balances(group: &Group, invoices: &[Invoice]) -> Vec<Balance> {
    let mut net: BTreeMap<MemberId, f64> = BTreeMap::new();
    for invoice in of_group(group.id, invoices).filter(|inv| inv.status.is_reviewed()) {
        let shares = compute_member_totals(invoice, &persisted_splits(invoice));
        for (member_id, share) in shares {
            *net.entry(member_id).or_insert(0.0) -= share;
            *net.entry(invoice.uploaded_by).or_insert(0.0) += share;
        }
    }

    let mut balances: Vec<Balance> = group
        .member_ids()
        .map(|member_id| Balance {
            member_id,
            amount: net.remove(&member_id).unwrap_or(0.0),
        })
        .collect();
    balances.extend(
        net.into_iter()
            .map(|(member_id, amount)| Balance { member_id, amount }),
    );
    balances
}
