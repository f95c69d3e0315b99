//! The scope context pack — the assembler's sole input.
//!
//! A [`ScopeContextPack`] is an immutable snapshot of all entries and
//! documents belonging to one retrieval scope. It is built once per scope
//! per corpus version and never mutated after construction — callers
//! replace the whole snapshot when the corpus changes, which is what makes
//! concurrent assembly over different scopes coordination-free.
//!
//! Construction sorts both collections by ascending uid so that every
//! downstream iteration is independent of the caller's collection order,
//! and rejects duplicate uids as a contract violation.

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::entry::Entry;
use crate::errors::PackError;
use crate::ids::{DocumentUid, EntryUid};

/// Immutable per-scope snapshot of entries and documents.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeContextPack {
    scope: String,
    entries: Vec<Entry>,
    documents: Vec<Document>,
}

impl ScopeContextPack {
    /// Build a pack from a scope name and its entries and documents.
    ///
    /// Sorts both collections by ascending uid and rejects duplicates.
    pub fn new(
        scope: impl Into<String>,
        mut entries: Vec<Entry>,
        mut documents: Vec<Document>,
    ) -> Result<Self, PackError> {
        entries.sort_by_key(|e| e.uid);
        if let Some(uid) = first_adjacent_duplicate(entries.iter().map(|e| e.uid)) {
            return Err(PackError::DuplicateEntryUid { uid });
        }

        documents.sort_by_key(|d| d.uid);
        if let Some(uid) = first_adjacent_duplicate(documents.iter().map(|d| d.uid)) {
            return Err(PackError::DuplicateDocumentUid { uid });
        }

        Ok(Self {
            scope: scope.into(),
            entries,
            documents,
        })
    }

    /// Build an empty pack for a scope.
    #[must_use]
    pub fn empty(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            entries: Vec::new(),
            documents: Vec::new(),
        }
    }

    /// The scope this pack belongs to.
    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// All entries, in ascending uid order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// All documents, in ascending uid order.
    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Look up an entry by uid.
    #[must_use]
    pub fn entry(&self, uid: EntryUid) -> Option<&Entry> {
        self.entries
            .binary_search_by_key(&uid, |e| e.uid)
            .ok()
            .map(|i| &self.entries[i])
    }

    /// Look up a document by uid.
    #[must_use]
    pub fn document(&self, uid: DocumentUid) -> Option<&Document> {
        self.documents
            .binary_search_by_key(&uid, |d| d.uid)
            .ok()
            .map(|i| &self.documents[i])
    }

    /// True when the pack holds neither entries nor documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.documents.is_empty()
    }
}

/// First uid that appears twice in an ascending-sorted iterator.
fn first_adjacent_duplicate<T: Copy + PartialEq>(iter: impl Iterator<Item = T>) -> Option<T> {
    let mut previous: Option<T> = None;
    for uid in iter {
        if previous == Some(uid) {
            return Some(uid);
        }
        previous = Some(uid);
    }
    None
}
