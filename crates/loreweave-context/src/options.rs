//! Assembly options.
//!
//! Everything the caller can tune for one query. All numeric inputs are
//! defensively clamped by [`AssembleOptions::sanitized`] rather than
//! rejected — the assembler never errors on configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use loreweave_core::DocumentUid;

/// Floor for the total token budget.
pub const MIN_TOKEN_BUDGET: usize = 128;
/// Valid range for the world-info/RAG budget split ratio.
pub const BUDGET_RATIO_RANGE: (f64, f64) = (0.05, 0.95);
/// Valid range for the per-hop decay factor.
pub const HOP_DECAY_RANGE: (f64, f64) = (0.2, 0.9);
/// Hard cap on graph hops.
pub const MAX_GRAPH_HOPS: u32 = 3;

const DEFAULT_TOKEN_BUDGET: usize = 2048;
const DEFAULT_MAX_ENTRIES: usize = 8;
const DEFAULT_MAX_DOCUMENTS: usize = 6;
const DEFAULT_BUDGET_RATIO: f64 = 0.65;
const DEFAULT_GRAPH_HOPS: u32 = 2;
const DEFAULT_HOP_DECAY: f64 = 0.55;
const DEFAULT_RAG_THRESHOLD: f64 = 120.0;

/// When to include RAG documents in the assembled context.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RagFallbackPolicy {
    /// Never include documents.
    Off,
    /// Include documents only when lexical/graph seeding is weak or absent.
    #[default]
    Auto,
    /// Include documents whenever the RAG sub-budget is positive.
    Always,
}

/// Per-query configuration for [`assemble`](crate::assemble).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssembleOptions {
    /// Free-text query to match against.
    pub query_text: String,
    /// Total token budget for the rendered context.
    pub token_budget: usize,
    /// Maximum number of entries selected.
    pub max_entries: usize,
    /// Maximum number of documents selected.
    pub max_documents: usize,
    /// Fraction of the budget given to world-info entries; documents get
    /// the remainder.
    pub budget_ratio: f64,
    /// Maximum graph hops for seed propagation.
    pub max_graph_hops: u32,
    /// Per-hop contribution decay factor.
    pub graph_hop_decay: f64,
    /// RAG inclusion policy.
    pub rag_fallback_policy: RagFallbackPolicy,
    /// Seed confidence below which `auto` enables RAG.
    pub rag_fallback_threshold: f64,
    /// Externally computed semantic boost per document. Absent or partial
    /// maps degrade gracefully to lexical-only scoring.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic_boost_by_document_id: Option<HashMap<DocumentUid, f64>>,
}

impl AssembleOptions {
    /// Options for a query with everything else defaulted.
    #[must_use]
    pub fn for_query(query_text: impl Into<String>) -> Self {
        Self {
            query_text: query_text.into(),
            ..Self::default()
        }
    }

    /// Return a copy with every numeric field clamped into its valid range.
    ///
    /// Non-finite ratios/decays/thresholds fall back to their defaults
    /// before clamping.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let mut clean = self.clone();
        clean.token_budget = self.token_budget.max(MIN_TOKEN_BUDGET);
        clean.budget_ratio = clamp_or(
            self.budget_ratio,
            DEFAULT_BUDGET_RATIO,
            BUDGET_RATIO_RANGE.0,
            BUDGET_RATIO_RANGE.1,
        );
        clean.max_graph_hops = self.max_graph_hops.min(MAX_GRAPH_HOPS);
        clean.graph_hop_decay = clamp_or(
            self.graph_hop_decay,
            DEFAULT_HOP_DECAY,
            HOP_DECAY_RANGE.0,
            HOP_DECAY_RANGE.1,
        );
        clean.rag_fallback_threshold = clamp_or(
            self.rag_fallback_threshold,
            DEFAULT_RAG_THRESHOLD,
            0.0,
            f64::MAX,
        );
        clean
    }
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            query_text: String::new(),
            token_budget: DEFAULT_TOKEN_BUDGET,
            max_entries: DEFAULT_MAX_ENTRIES,
            max_documents: DEFAULT_MAX_DOCUMENTS,
            budget_ratio: DEFAULT_BUDGET_RATIO,
            max_graph_hops: DEFAULT_GRAPH_HOPS,
            graph_hop_decay: DEFAULT_HOP_DECAY,
            rag_fallback_policy: RagFallbackPolicy::default(),
            rag_fallback_threshold: DEFAULT_RAG_THRESHOLD,
            semantic_boost_by_document_id: None,
        }
    }
}

/// Clamp a float into [min, max], substituting `fallback` for non-finite
/// input.
fn clamp_or(value: f64, fallback: f64, min: f64, max: f64) -> f64 {
    let value = if value.is_finite() { value } else { fallback };
    value.clamp(min, max)
}
