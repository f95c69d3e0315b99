//! Output records for one assembly run.
//!
//! Selections and traces are created fresh per query and never persisted.
//! All serializable types use `camelCase` for wire compatibility with the
//! exporter collaborators.

use serde::{Deserialize, Serialize};

use loreweave_core::{DocumentUid, EntryUid};

use crate::options::RagFallbackPolicy;

/// Content-length level used to fit more entries into the budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentTier {
    /// Truncated to roughly 260 characters.
    Short,
    /// Truncated to roughly 900 characters.
    Medium,
    /// Full content.
    Full,
}

impl ContentTier {
    /// The next tier up, if any.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Short => Some(Self::Medium),
            Self::Medium => Some(Self::Full),
            Self::Full => None,
        }
    }
}

/// An entry admitted into the world-info section.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedEntry {
    /// The selected entry.
    pub uid: EntryUid,
    /// Entry title, copied for rendering and display.
    pub title: String,
    /// Final combined score (seed + graph + constant bonus + order bonus).
    pub score: f64,
    /// Hops from the nearest seed (0 for seeds and constants).
    pub hop_distance: u32,
    /// Best justifying path from a seed to this entry, as uids.
    pub path: Vec<EntryUid>,
    /// Match provenance: why this entry was included.
    pub reasons: Vec<String>,
    /// Content tier the entry was rendered at.
    pub tier: ContentTier,
    /// Token estimate of the rendered section.
    pub rendered_tokens: usize,
}

/// A document admitted into the RAG section.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedDocument {
    /// The selected document.
    pub uid: DocumentUid,
    /// Document title, copied for rendering and display.
    pub title: String,
    /// Document path.
    pub path: String,
    /// Final combined score (lexical + semantic boost).
    pub score: f64,
    /// Match provenance: why this document was included.
    pub reasons: Vec<String>,
    /// Token estimate of the rendered section.
    pub rendered_tokens: usize,
}

/// One detected seed, for the trace.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedTrace {
    /// Seed entry uid.
    pub uid: EntryUid,
    /// Seed score from keyword/title matching.
    pub score: f64,
    /// Which keywords/title terms matched.
    pub reasons: Vec<String>,
}

/// World-info budget accounting for the trace.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldInfoBudgetTrace {
    /// Sub-budget granted to the world-info section.
    pub budgeted: usize,
    /// Tokens actually consumed by admitted entries.
    pub used: usize,
    /// Entries that ranked but did not fit the sub-budget.
    pub dropped_by_budget: Vec<EntryUid>,
    /// Entries cut by the `max_entries` limit before packing.
    pub dropped_by_limit: Vec<EntryUid>,
}

/// RAG gating decision for the trace.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RagGateTrace {
    /// Policy in effect.
    pub policy: RagFallbackPolicy,
    /// Whether documents were considered at all.
    pub enabled: bool,
    /// Top seed score at gating time (0 with no seeds).
    pub seed_confidence: f64,
    /// Confidence threshold the `auto` policy compared against.
    pub threshold: f64,
}

/// RAG budget accounting for the trace.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RagBudgetTrace {
    /// Sub-budget granted to the RAG section.
    pub budgeted: usize,
    /// Tokens actually consumed by admitted documents.
    pub used: usize,
    /// Documents that scored but did not fit the sub-budget.
    pub dropped_by_budget: Vec<DocumentUid>,
}

/// Structured explainability output for one assembly run.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyTrace {
    /// All detected seeds, strongest first.
    pub seeds: Vec<SeedTrace>,
    /// World-info budget accounting.
    pub world_info_budget: WorldInfoBudgetTrace,
    /// RAG gating decision.
    pub rag_gate: RagGateTrace,
    /// RAG budget accounting.
    pub rag_budget: RagBudgetTrace,
}

/// The assembled, budget-bounded context.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssembledContext {
    /// Selected entries in final rank order.
    pub entries: Vec<SelectedEntry>,
    /// Selected documents in final rank order.
    pub documents: Vec<SelectedDocument>,
    /// Deterministic markdown rendering.
    pub rendered: String,
    /// Explainability trace.
    pub trace: AssemblyTrace,
}
