//! Shared test utilities for `SplitBuddy`.
//!
//! This module provides common helpers for setting up ledgers and building
//! the grocery receipt used throughout the tests.

#![allow(clippy::unwrap_used)]

use crate::{
    core::{Ledger, roster},
    entities::{
        Group, GroupId, IdSequence, Invoice, InvoiceId, InvoiceItem, InvoiceStatus, ItemId,
        MemberId, NewInvoice, NewInvoiceItem, NewMember,
    },
    errors::Result,
};
use chrono::{NaiveDate, Utc};
use std::collections::BTreeSet;
use tracing_subscriber::EnvFilter;

/// Tolerance for comparing computed currency values.
pub const EPSILON: f64 = 1e-9;

/// Whether two amounts are equal up to floating-point noise.
#[must_use]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Installs a test-writer subscriber once; later calls are ignored.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")),
        )
        .with_test_writer()
        .try_init();
}

/// Receipt date used by every fixture.
#[must_use]
pub fn receipt_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
}

/// The extracted grocery receipt: vegetables, two milks, bread.
#[must_use]
pub fn grocery_items() -> Vec<NewInvoiceItem> {
    vec![
        NewInvoiceItem::new("Organic Vegetables", 1, 24.99),
        NewInvoiceItem::new("Milk & Dairy", 2, 15.98),
        NewInvoiceItem::new("Fresh Bread", 1, 4.50),
    ]
}

/// Builds invoice input with sensible defaults.
///
/// # Defaults
/// * `date`: [`receipt_date`]
/// * `uploaded_by`: None (group's first member)
#[must_use]
pub fn new_invoice(merchant: &str, total: Option<f64>, items: Vec<NewInvoiceItem>) -> NewInvoice {
    NewInvoice {
        merchant: merchant.to_string(),
        date: receipt_date(),
        total,
        items,
        uploaded_by: None,
    }
}

/// Creates an empty ledger with the default palette.
#[must_use]
pub fn setup_test_ledger() -> Ledger {
    init_test_tracing();
    Ledger::default()
}

/// Creates a group whose members get `<first name>@example.com` emails.
pub fn create_test_group(ledger: &mut Ledger, name: &str, members: &[&str]) -> Result<GroupId> {
    let members: Vec<NewMember> = members
        .iter()
        .map(|n| NewMember::new(*n, test_email(n)))
        .collect();
    ledger.create_group(name, &members).map(|g| g.id)
}

/// Records the grocery receipt (stored total 45.47) for a group.
pub fn create_grocery_invoice(ledger: &mut Ledger, group_id: GroupId) -> Result<InvoiceId> {
    ledger
        .create_invoice(
            group_id,
            new_invoice("Whole Foods Market", Some(45.47), grocery_items()),
        )
        .map(|inv| inv.id)
}

fn test_email(name: &str) -> String {
    let first = name.split_whitespace().next().unwrap_or(name);
    format!("{}@example.com", first.to_lowercase())
}

/// A standalone group built outside any ledger.
#[must_use]
pub fn group_fixture(members: &[&str]) -> Group {
    let members: Vec<NewMember> = members
        .iter()
        .map(|n| NewMember::new(*n, test_email(n)))
        .collect();
    roster::build_group(
        &mut IdSequence::default(),
        "Test Group",
        &members,
        &roster::Palette::default(),
        Utc::now(),
    )
    .unwrap()
}

/// A standalone grocery invoice with nothing assigned, plus three member ids
/// that are not on any roster.
#[must_use]
pub fn grocery_invoice_fixture() -> (Invoice, [MemberId; 3]) {
    let members = [MemberId::new(101), MemberId::new(102), MemberId::new(103)];
    let items = grocery_items()
        .into_iter()
        .zip(11..)
        .map(|(item, id)| InvoiceItem {
            id: ItemId::new(id),
            name: item.name,
            quantity: item.quantity,
            price: item.price,
            split_among: BTreeSet::new(),
        })
        .collect();

    let invoice = Invoice {
        id: InvoiceId::new(1),
        group_id: GroupId::new(1),
        name: "Invoice from Whole Foods Market".to_string(),
        merchant: "Whole Foods Market".to_string(),
        date: receipt_date(),
        total: 45.47,
        status: InvoiceStatus::NeedsReview,
        items,
        uploaded_by: members[0],
        created_at: Utc::now(),
    };
    (invoice, members)
}

/// Ids of the three grocery items, in receipt order.
#[must_use]
pub fn item_ids(invoice: &Invoice) -> [ItemId; 3] {
    [invoice.items[0].id, invoice.items[1].id, invoice.items[2].id]
}
