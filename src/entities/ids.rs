//! Typed identifiers and the in-memory id sequence that hands them out.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw numeric id.
            #[must_use]
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Returns the raw numeric id.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "-{}"), self.0)
            }
        }
    };
}

define_id!(
    /// Identifies a [`Member`](super::Member).
    MemberId,
    "m"
);
define_id!(
    /// Identifies a [`Group`](super::Group).
    GroupId,
    "g"
);
define_id!(
    /// Identifies an [`Invoice`](super::Invoice).
    InvoiceId,
    "inv"
);
define_id!(
    /// Identifies an [`InvoiceItem`](super::InvoiceItem).
    ItemId,
    "item"
);

/// Monotonic id source shared by every record type in a ledger.
///
/// Ids are never reused, so a stale id held by the presentation layer can
/// never alias a record created later.
#[derive(Debug, Clone)]
pub struct IdSequence {
    next: u64,
}

impl Default for IdSequence {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdSequence {
    fn bump(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Allocates a fresh member id.
    pub fn next_member(&mut self) -> MemberId {
        MemberId(self.bump())
    }

    /// Allocates a fresh group id.
    pub fn next_group(&mut self) -> GroupId {
        GroupId(self.bump())
    }

    /// Allocates a fresh invoice id.
    pub fn next_invoice(&mut self) -> InvoiceId {
        InvoiceId(self.bump())
    }

    /// Allocates a fresh invoice item id.
    pub fn next_item(&mut self) -> ItemId {
        ItemId(self.bump())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_across_kinds() {
        let mut ids = IdSequence::default();
        let member = ids.next_member();
        let group = ids.next_group();
        let invoice = ids.next_invoice();
        let item = ids.next_item();

        let raw = [member.get(), group.get(), invoice.get(), item.get()];
        assert_eq!(raw, [1, 2, 3, 4]);
    }

    #[test]
    fn test_id_display_uses_kind_prefix() {
        assert_eq!(MemberId::new(7).to_string(), "m-7");
        assert_eq!(GroupId::new(2).to_string(), "g-2");
        assert_eq!(InvoiceId::new(11).to_string(), "inv-11");
        assert_eq!(ItemId::new(3).to_string(), "item-3");
    }
}
