//! The RAG document — a loosely-matched retrievable unit.
//!
//! Documents share a scope with entries but live in their own id space.
//! By convention one document often mirrors one entry (same numeric uid),
//! but nothing here requires it.

use serde::{Deserialize, Serialize};

use crate::ids::DocumentUid;

/// A RAG-style retrievable unit.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    /// Stable identifier within the document id space.
    pub uid: DocumentUid,
    /// Display title.
    pub title: String,
    /// Source path, e.g. `"world/regions/north.md"`.
    pub path: String,
    /// Full retrievable text.
    pub content: String,
    /// Retrieval scope this document belongs to.
    pub scope: String,
}
