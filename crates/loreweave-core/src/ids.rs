//! Branded uid newtypes for type safety.
//!
//! Entries and documents live in distinct id spaces that may share numeric
//! values by convention (one document per entry is common but not required).
//! Wrapping the raw `u64` in a newtype prevents accidentally passing a
//! document uid where an entry uid is expected.
//!
//! Uids are assigned once by the note store and never reused; this crate
//! only carries them.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! branded_uid {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash,
            Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw uid value.
            #[must_use]
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Return the raw uid value.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for u64 {
            fn from(uid: $name) -> Self {
                uid.0
            }
        }
    };
}

branded_uid! {
    /// Unique identifier for an [`Entry`](crate::Entry) within a build.
    EntryUid
}

branded_uid! {
    /// Unique identifier for a [`Document`](crate::Document) within a build.
    DocumentUid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_raw_value() {
        assert!(EntryUid::new(1) < EntryUid::new(2));
        assert!(DocumentUid::new(10) > DocumentUid::new(9));
    }

    #[test]
    fn display_is_raw_value() {
        assert_eq!(EntryUid::new(42).to_string(), "42");
    }

    #[test]
    fn serde_is_transparent() {
        let uid = EntryUid::new(7);
        let json = serde_json::to_string(&uid).unwrap();
        assert_eq!(json, "7");
        let back: EntryUid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, uid);
    }

    #[test]
    fn round_trips_through_u64() {
        let uid = DocumentUid::from(99u64);
        assert_eq!(u64::from(uid), 99);
        assert_eq!(uid.get(), 99);
    }
}
