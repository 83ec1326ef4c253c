//! Split engine - Computes who owes what for an invoice.
//!
//! Every function here is pure. The assignment map passed in (`ItemSplits`)
//! is authoritative: an item missing from the map counts as unassigned even
//! if it has a persisted `split_among`. Amounts keep full `f64` precision and
//! are only rounded by the report layer.

use crate::entities::{Invoice, InvoiceItem, ItemId, MemberId};
use std::collections::{BTreeMap, BTreeSet};

/// Per-item assignment of members, keyed by item id.
pub type ItemSplits = BTreeMap<ItemId, BTreeSet<MemberId>>;

/// Display data for one invoice line under a given assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemBreakdown {
    /// Item being described
    pub item_id: ItemId,
    /// Item description
    pub name: String,
    /// Number of units
    pub quantity: u32,
    /// Price per unit
    pub price: f64,
    /// `quantity × price`
    pub item_total: f64,
    /// Number of members sharing the item
    pub assigned_count: usize,
    /// Share of each assigned member, 0 when nobody is assigned
    pub per_person: f64,
}

/// Builds the assignment map from the items' persisted `split_among` sets.
#[must_use]
pub fn persisted_splits(invoice: &Invoice) -> ItemSplits {
    invoice
        .items
        .iter()
        .map(|item| (item.id, item.split_among.clone()))
        .collect()
}

/// Even share of one item for each member in `assigned`.
///
/// Returns 0 for an empty set, so unassigned items never divide by zero.
#[must_use]
pub fn per_person_amount(item: &InvoiceItem, assigned: &BTreeSet<MemberId>) -> f64 {
    if assigned.is_empty() {
        return 0.0;
    }
    // Cast safety: assignment sets are roster-sized.
    #[allow(clippy::cast_precision_loss)]
    let count = assigned.len() as f64;
    item.item_total() / count
}

fn assigned_for<'a>(splits: &'a ItemSplits, item: &InvoiceItem) -> Option<&'a BTreeSet<MemberId>> {
    splits.get(&item.id).filter(|set| !set.is_empty())
}

/// Total owed by one member across all items of the invoice.
///
/// Member ids that are no longer on the roster are computed like any other.
#[must_use]
pub fn compute_member_share(invoice: &Invoice, splits: &ItemSplits, member_id: MemberId) -> f64 {
    invoice
        .items
        .iter()
        .filter_map(|item| {
            assigned_for(splits, item)
                .filter(|assigned| assigned.contains(&member_id))
                .map(|assigned| per_person_amount(item, assigned))
        })
        .fold(0.0, |acc, share| acc + share)
}

/// Totals for every member id that appears in the assignment of an invoice item.
///
/// Members with no assignment do not appear; callers rendering a roster
/// should treat them as owing 0.
#[must_use]
pub fn compute_member_totals(invoice: &Invoice, splits: &ItemSplits) -> BTreeMap<MemberId, f64> {
    let mut totals = BTreeMap::new();
    for item in &invoice.items {
        let Some(assigned) = assigned_for(splits, item) else {
            continue;
        };
        let share = per_person_amount(item, assigned);
        for member_id in assigned {
            *totals.entry(*member_id).or_insert(0.0) += share;
        }
    }
    totals
}

/// Sum of the totals of items that have at least one assigned member.
#[must_use]
pub fn assigned_total(invoice: &Invoice, splits: &ItemSplits) -> f64 {
    invoice
        .items
        .iter()
        .filter(|item| assigned_for(splits, item).is_some())
        .map(InvoiceItem::item_total)
        .fold(0.0, |acc, t| acc + t)
}

/// Per-line display data in invoice order.
#[must_use]
pub fn item_breakdown(invoice: &Invoice, splits: &ItemSplits) -> Vec<ItemBreakdown> {
    invoice
        .items
        .iter()
        .map(|item| {
            let assigned = splits.get(&item.id);
            let assigned_count = assigned.map_or(0, BTreeSet::len);
            let per_person = assigned.map_or(0.0, |set| per_person_amount(item, set));
            ItemBreakdown {
                item_id: item.id,
                name: item.name.clone(),
                quantity: item.quantity,
                price: item.price,
                item_total: item.item_total(),
                assigned_count,
                per_person,
            }
        })
        .collect()
}
