//! Core business logic - the splitting engine, invoice lifecycle, roster
//! management and aggregation, independent of any presentation layer.

/// Group-level aggregates and member balances
pub mod balance;
/// In-memory store and boundary operations
pub mod ledger;
/// Invoice status transitions, finalize and reopen
pub mod lifecycle;
/// Display rounding and text summaries
pub mod report;
/// Group creation and member add/remove
pub mod roster;
/// Working copy of split assignments during editing
pub mod session;
/// Per-member and per-item share computation
pub mod split;

pub use ledger::Ledger;
pub use session::EditSession;
pub use split::ItemSplits;
