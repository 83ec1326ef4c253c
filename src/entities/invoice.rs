//! Invoice entity - A receipt attached to a group, with assignable line items.
//!
//! The stored `total` comes from entry or extraction and may legitimately
//! differ from the sum of item totals (tax lines, rounding). Both are kept.

use super::{GroupId, InvoiceId, ItemId, MemberId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Review status of an invoice
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvoiceStatus {
    /// Reopened for editing after having been reviewed
    Draft,
    /// Freshly created, splits not yet finalized
    NeedsReview,
    /// Splits finalized
    Reviewed,
}

impl InvoiceStatus {
    /// Whether the invoice has been finalized.
    #[must_use]
    pub const fn is_reviewed(self) -> bool {
        matches!(self, Self::Reviewed)
    }

    /// Badge text shown next to the invoice.
    #[must_use]
    pub const fn label(self) -> &'static str {
        if self.is_reviewed() {
            "Finalized"
        } else {
            "Draft"
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Draft => "draft",
            Self::NeedsReview => "needs-review",
            Self::Reviewed => "reviewed",
        };
        f.write_str(s)
    }
}

/// A single line on an invoice
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    /// Unique identifier for the item
    pub id: ItemId,
    /// Item description
    pub name: String,
    /// Number of units
    pub quantity: u32,
    /// Price per unit
    pub price: f64,
    /// Members sharing this item, persisted on finalize
    #[serde(default)]
    pub split_among: BTreeSet<MemberId>,
}

impl InvoiceItem {
    /// `quantity × price`.
    #[must_use]
    pub fn item_total(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }
}

/// Sum of the item totals, `0.0` for no items.
#[must_use]
pub fn subtotal(items: &[InvoiceItem]) -> f64 {
    items.iter().map(InvoiceItem::item_total).fold(0.0, |acc, t| acc + t)
}

/// A receipt owned by one group
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier for the invoice
    pub id: InvoiceId,
    /// Owning group
    pub group_id: GroupId,
    /// Display name, derived from the merchant
    pub name: String,
    /// Merchant the receipt came from
    pub merchant: String,
    /// Purchase date
    pub date: NaiveDate,
    /// Stored total, independent of the item subtotal
    pub total: f64,
    /// Review status
    pub status: InvoiceStatus,
    /// Line items in receipt order
    pub items: Vec<InvoiceItem>,
    /// Member who uploaded (and paid) the receipt
    pub uploaded_by: MemberId,
    /// When the invoice was recorded
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    /// Sum of `quantity × price` over all items.
    #[must_use]
    pub fn items_subtotal(&self) -> f64 {
        subtotal(&self.items)
    }

    /// Looks up an item by id.
    #[must_use]
    pub fn item(&self, item_id: ItemId) -> Option<&InvoiceItem> {
        self.items.iter().find(|item| item.id == item_id)
    }
}

/// Raw line item data from the data-entry layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewInvoiceItem {
    /// Item description
    pub name: String,
    /// Number of units, must be positive
    pub quantity: u32,
    /// Price per unit, must be finite and non-negative
    pub price: f64,
}

impl NewInvoiceItem {
    /// Convenience constructor.
    pub fn new(name: impl Into<String>, quantity: u32, price: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            price,
        }
    }
}

/// Raw invoice data from the data-entry layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewInvoice {
    /// Merchant name, must not be blank
    pub merchant: String,
    /// Purchase date
    pub date: NaiveDate,
    /// Explicit total; the item subtotal is used when absent
    pub total: Option<f64>,
    /// Line items
    pub items: Vec<NewInvoiceItem>,
    /// Uploader; the group's first member is used when absent
    pub uploaded_by: Option<MemberId>,
}
