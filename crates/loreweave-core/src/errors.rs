//! Error types for the loreweave core.
//!
//! The core performs no I/O, so the only fallible boundary is scope pack
//! construction: duplicate uids are a caller contract violation and are
//! surfaced early instead of silently corrupting downstream lookups.
//! The ranker and assembler themselves never error — invalid numeric
//! inputs are clamped into range.

use thiserror::Error;

use crate::ids::{DocumentUid, EntryUid};

/// Errors raised while building a [`ScopeContextPack`](crate::ScopeContextPack).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PackError {
    /// Two entries in the same scope share a uid.
    #[error("duplicate entry uid {uid} in scope pack")]
    DuplicateEntryUid {
        /// The offending uid.
        uid: EntryUid,
    },

    /// Two documents in the same scope share a uid.
    #[error("duplicate document uid {uid} in scope pack")]
    DuplicateDocumentUid {
        /// The offending uid.
        uid: DocumentUid,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_uid() {
        let err = PackError::DuplicateEntryUid {
            uid: EntryUid::new(7),
        };
        assert_eq!(err.to_string(), "duplicate entry uid 7 in scope pack");
    }
}
