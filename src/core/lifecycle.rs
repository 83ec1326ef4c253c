//! Invoice lifecycle - status transitions, finalize and reopen.
//!
//! The whole transition table lives in [`next_status`]:
//!
//! | from           | transition       | to         |
//! |----------------|------------------|------------|
//! | `needs-review` | finalize         | `reviewed` |
//! | `draft`        | finalize         | `reviewed` |
//! | `reviewed`     | finalize         | `reviewed` (idempotent) |
//! | `reviewed`     | reopen for edit  | `draft`    |
//!
//! Finalize additionally requires every item to have at least one assigned
//! member. Whether those members are still on the roster is not checked.

use crate::{
    core::session::EditSession,
    core::split::ItemSplits,
    entities::{Invoice, InvoiceStatus, ItemId, MemberId},
    errors::{Error, Result},
};
use std::fmt;
use tracing::{info, warn};

/// Warning shown while a non-finalized invoice still has unassigned items.
pub const INCOMPLETE_ASSIGNMENT_WARNING: &str =
    "Please assign members to all items before finalizing";

/// A named lifecycle transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Commit the working splits and mark the invoice reviewed
    Finalize,
    /// Revert a reviewed invoice to draft so it can be edited
    ReopenForEdit,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finalize => f.write_str("finalize"),
            Self::ReopenForEdit => f.write_str("reopen"),
        }
    }
}

/// Resolves the status a transition leads to, or rejects it.
pub fn next_status(from: InvoiceStatus, transition: Transition) -> Result<InvoiceStatus> {
    match (from, transition) {
        (_, Transition::Finalize) => Ok(InvoiceStatus::Reviewed),
        (InvoiceStatus::Reviewed, Transition::ReopenForEdit) => Ok(InvoiceStatus::Draft),
        (from, transition @ Transition::ReopenForEdit) => {
            Err(Error::InvalidTransition { from, transition })
        }
    }
}

/// Items whose assignment in `splits` is missing or empty, in invoice order.
#[must_use]
pub fn unassigned_items(invoice: &Invoice, splits: &ItemSplits) -> Vec<ItemId> {
    invoice
        .items
        .iter()
        .filter(|item| splits.get(&item.id).is_none_or(|set| set.is_empty()))
        .map(|item| item.id)
        .collect()
}

/// Whether every item has at least one assigned member.
///
/// An invoice without items is trivially complete.
#[must_use]
pub fn all_items_assigned(invoice: &Invoice, splits: &ItemSplits) -> bool {
    unassigned_items(invoice, splits).is_empty()
}

/// Whether finalize would currently be accepted.
#[must_use]
pub fn can_finalize(invoice: &Invoice, session: &EditSession) -> bool {
    session.invoice_id() == invoice.id && all_items_assigned(invoice, session.splits())
}

/// Warning to surface next to the invoice, if any.
///
/// Reviewed invoices never warn; others warn while any item is unassigned.
#[must_use]
pub fn completeness_warning(invoice: &Invoice, splits: &ItemSplits) -> Option<&'static str> {
    if invoice.status.is_reviewed() || all_items_assigned(invoice, splits) {
        None
    } else {
        Some(INCOMPLETE_ASSIGNMENT_WARNING)
    }
}

/// Commits the session into the items' `split_among` and marks the invoice reviewed.
///
/// On rejection the invoice is left exactly as it was.
pub fn finalize(invoice: &mut Invoice, session: &EditSession) -> Result<()> {
    if session.invoice_id() != invoice.id {
        return Err(Error::SessionMismatch {
            session: session.invoice_id(),
            invoice: invoice.id,
        });
    }

    let unassigned = unassigned_items(invoice, session.splits());
    if !unassigned.is_empty() {
        warn!(
            "Refusing to finalize invoice {}: {} item(s) unassigned",
            invoice.id,
            unassigned.len()
        );
        return Err(Error::IncompleteAssignment { unassigned });
    }

    let status = next_status(invoice.status, Transition::Finalize)?;
    for item in &mut invoice.items {
        if let Some(assigned) = session.assigned(item.id) {
            item.split_among.clone_from(assigned);
        }
    }
    invoice.status = status;

    info!("Invoice {} finalized", invoice.id);
    Ok(())
}

/// Reverts a reviewed invoice to draft. Persisted splits are kept.
pub fn reopen_for_edit(invoice: &mut Invoice) -> Result<()> {
    invoice.status = next_status(invoice.status, Transition::ReopenForEdit)?;
    info!("Invoice {} reopened for editing", invoice.id);
    Ok(())
}

/// Enters edit mode: reopens a reviewed invoice, then seeds a session from it.
///
/// Draft and needs-review invoices keep their status. `roster` is the set of
/// members the session may assign.
pub fn begin_edit(
    invoice: &mut Invoice,
    roster: impl IntoIterator<Item = MemberId>,
) -> Result<EditSession> {
    if invoice.status.is_reviewed() {
        reopen_for_edit(invoice)?;
    }
    Ok(EditSession::from_invoice(invoice, roster))
}
