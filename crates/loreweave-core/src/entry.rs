//! The lore entry — the unit the ranker scores and the assembler selects.
//!
//! Entries arrive from the (external) note store with wikilink targets
//! already extracted into `outbound_links`. The `order` field starts at
//! zero and is written exactly once per corpus build by the importance
//! ranker; everything else is immutable from this crate's point of view.
//!
//! All serializable types use `camelCase` for wire compatibility with the
//! exporter collaborators.

use serde::{Deserialize, Serialize};

use crate::ids::EntryUid;

/// A rankable, retrievable lore/world-info unit.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Entry {
    /// Stable identifier, assigned once by the note store, never reused.
    pub uid: EntryUid,
    /// Display title (also addressable as a wikilink target).
    pub title: String,
    /// Primary trigger keywords, matched case-insensitively.
    pub primary_keywords: Vec<String>,
    /// Secondary trigger keywords, matched case-insensitively.
    pub secondary_keywords: Vec<String>,
    /// Display/summary text rendered into the assembled context.
    pub content: String,
    /// Importance score. Zero until the ranker runs; a pure function of
    /// the corpus afterwards.
    pub order: i64,
    /// Always-include flag.
    pub is_constant: bool,
    /// Folder-like path used for depth scoring, e.g. `"world/regions"`.
    pub group_path: String,
    /// Raw wikilink targets found in the note body.
    pub outbound_links: Vec<String>,
}

impl Entry {
    /// Iterate primary then secondary keywords.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.primary_keywords
            .iter()
            .chain(self.secondary_keywords.iter())
            .map(String::as_str)
    }

    /// Folder depth of `group_path`: segment count minus one, so entries in
    /// the root folder have depth 0. Empty paths also map to depth 0.
    #[must_use]
    pub fn folder_depth(&self) -> usize {
        self.group_path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .count()
            .saturating_sub(1)
    }
}
