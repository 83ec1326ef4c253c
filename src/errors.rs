//! Unified error types and result handling.
//!
//! Every failure in the splitting core is local and recoverable: a rejected
//! operation returns one of these variants and leaves the ledger untouched.

use crate::core::lifecycle::Transition;
use crate::entities::{GroupId, InvoiceId, InvoiceStatus, ItemId};
use thiserror::Error;

/// All errors produced by SplitBuddy.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file could not be read, parsed, or validated
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// A required text field was blank or a collection was empty
    #[error("Invalid {field}: {reason}")]
    InvalidInput {
        /// Name of the offending field
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// A price or total was negative, NaN, or infinite
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// No group with this id exists
    #[error("Group not found: {id}")]
    GroupNotFound {
        /// The missing group id
        id: GroupId,
    },

    /// No invoice with this id exists
    #[error("Invoice not found: {id}")]
    InvoiceNotFound {
        /// The missing invoice id
        id: InvoiceId,
    },

    /// Finalize was attempted while some items have nobody assigned
    #[error("Cannot finalize: {} item(s) have no assigned members", .unassigned.len())]
    IncompleteAssignment {
        /// Items with an empty assignment set, in invoice order
        unassigned: Vec<ItemId>,
    },

    /// The requested lifecycle transition is not defined for the current status
    #[error("Cannot {transition} an invoice in status {from}")]
    InvalidTransition {
        /// Status the invoice was in
        from: InvoiceStatus,
        /// Transition that was requested
        transition: Transition,
    },

    /// An edit session was applied to an invoice it was not opened for
    #[error("Edit session for invoice {session} cannot be applied to invoice {invoice}")]
    SessionMismatch {
        /// Invoice the session was opened for
        session: InvoiceId,
        /// Invoice the session was applied to
        invoice: InvoiceId,
    },
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
