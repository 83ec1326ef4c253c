//! Entity module - Contains the in-memory data contracts of the splitting core.
//! These records carry no behaviour beyond small derived accessors; all
//! mutation goes through the operations in [`crate::core`].

pub mod balance;
pub mod group;
pub mod ids;
pub mod invoice;
pub mod member;

pub use balance::Balance;
pub use group::Group;
pub use ids::{GroupId, IdSequence, InvoiceId, ItemId, MemberId};
pub use invoice::{Invoice, InvoiceItem, InvoiceStatus, NewInvoice, NewInvoiceItem};
pub use member::{Member, NewMember};
