//! The context assembler.
//!
//! Orchestrates one query: seed detection, link resolution, graph
//! propagation, final scoring, budget packing, RAG gating, rendering, and
//! the explainability trace. Pure and synchronous — the pack is read-only
//! and nothing is cached between calls.

use std::collections::BTreeMap;

use tracing::debug;

use loreweave_core::{Entry, EntryUid, ScopeContextPack, estimate_tokens, tokenize};

use crate::budget::{pack_flat, pack_tiered};
use crate::options::AssembleOptions;
use crate::propagation::{GraphCandidate, propagate};
use crate::rag;
use crate::render;
use crate::resolver::resolve_links;
use crate::seeds::{SeedMatch, detect_seeds};
use crate::types::{
    AssembledContext, AssemblyTrace, RagBudgetTrace, RagGateTrace, SeedTrace, SelectedDocument,
    SelectedEntry, WorldInfoBudgetTrace,
};

/// Score bonus for always-include entries.
pub const CONSTANT_BONUS: f64 = 30.0;
/// Scale applied to a positive `order` as a rank refinement.
pub const ORDER_SCALE: f64 = 0.01;

/// A scored entry before budget packing.
struct Candidate<'a> {
    entry: &'a Entry,
    score: f64,
    hop_distance: u32,
    path: Vec<EntryUid>,
    reasons: Vec<String>,
}

/// Assemble a bounded, explainable context for one query.
///
/// Options are sanitized first; an empty (or whitespace-only) query yields
/// an empty selection with labeled placeholders rather than an error.
#[must_use]
pub fn assemble(pack: &ScopeContextPack, options: &AssembleOptions) -> AssembledContext {
    let options = options.sanitized();
    let query_lower = options.query_text.trim().to_lowercase();

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let world_info_budget = (options.token_budget as f64 * options.budget_ratio).floor() as usize;
    let rag_budget = options.token_budget - world_info_budget;

    if query_lower.is_empty() {
        return empty_context(&options, world_info_budget, rag_budget);
    }

    let query_tokens = tokenize(&query_lower);
    let seed_matches = detect_seeds(pack.entries(), &query_lower, &query_tokens);
    let top_seed_score = seed_matches.first().map_or(0.0, |seed| seed.score);
    debug!(
        seeds = seed_matches.len(),
        top_seed_score, "seed detection complete"
    );

    let adjacency = resolve_links(pack.entries());
    let reached = propagate(
        &seed_matches,
        &adjacency,
        options.max_graph_hops,
        options.graph_hop_decay,
    );

    let mut candidates = collect_candidates(pack, &seed_matches, &reached);
    candidates.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.hop_distance.cmp(&b.hop_distance))
            .then_with(|| b.entry.order.cmp(&a.entry.order))
            .then_with(|| a.entry.uid.cmp(&b.entry.uid))
    });

    let dropped_by_limit: Vec<EntryUid> = candidates
        .iter()
        .skip(options.max_entries)
        .map(|candidate| candidate.entry.uid)
        .collect();
    candidates.truncate(options.max_entries);

    // Pack entries; the section header is charged against the sub-budget.
    let world_info_net =
        world_info_budget.saturating_sub(estimate_tokens(render::WORLD_INFO_HEADER));
    let packed = pack_tiered(candidates.len(), world_info_net, |index, tier| {
        estimate_tokens(&render::entry_section(candidates[index].entry, tier))
    });
    debug!(
        admitted = packed.admitted.len(),
        dropped = packed.dropped.len(),
        used = packed.used,
        budgeted = world_info_budget,
        "world info packing complete"
    );

    let selected_entries: Vec<SelectedEntry> = packed
        .admitted
        .iter()
        .map(|item| {
            let candidate = &candidates[item.index];
            SelectedEntry {
                uid: candidate.entry.uid,
                title: candidate.entry.title.clone(),
                score: candidate.score,
                hop_distance: candidate.hop_distance,
                path: candidate.path.clone(),
                reasons: candidate.reasons.clone(),
                tier: item.tier,
                rendered_tokens: item.tokens,
            }
        })
        .collect();

    let world_info_trace = WorldInfoBudgetTrace {
        budgeted: world_info_budget,
        used: packed.used,
        dropped_by_budget: packed
            .dropped
            .iter()
            .map(|&index| candidates[index].entry.uid)
            .collect(),
        dropped_by_limit,
    };

    // RAG: gate, score, pack.
    let gate = rag::gate(
        options.rag_fallback_policy,
        rag_budget,
        !selected_entries.is_empty(),
        top_seed_score,
        options.rag_fallback_threshold,
    );

    let mut document_matches = Vec::new();
    if gate.enabled {
        document_matches = rag::score_documents(
            pack.documents(),
            &query_lower,
            &query_tokens,
            options.semantic_boost_by_document_id.as_ref(),
        );
        document_matches.truncate(options.max_documents);
    }

    let rag_net = rag_budget.saturating_sub(estimate_tokens(render::DOCUMENTS_HEADER));
    let documents = pack.documents();
    let doc_packed = pack_flat(document_matches.len(), rag_net, |index| {
        estimate_tokens(&render::document_section(
            &documents[document_matches[index].index],
        ))
    });

    let selected_documents: Vec<SelectedDocument> = doc_packed
        .admitted
        .iter()
        .map(|item| {
            let document_match = &document_matches[item.index];
            let document = &documents[document_match.index];
            SelectedDocument {
                uid: document.uid,
                title: document.title.clone(),
                path: document.path.clone(),
                score: document_match.score,
                reasons: document_match.reasons.clone(),
                rendered_tokens: item.tokens,
            }
        })
        .collect();

    let rag_trace = RagBudgetTrace {
        budgeted: rag_budget,
        used: doc_packed.used,
        dropped_by_budget: doc_packed
            .dropped
            .iter()
            .map(|&index| document_matches[index].uid)
            .collect(),
    };

    // Render.
    let entry_sections: Vec<String> = packed
        .admitted
        .iter()
        .map(|item| render::entry_section(candidates[item.index].entry, item.tier))
        .collect();
    let document_sections: Vec<String> = doc_packed
        .admitted
        .iter()
        .map(|item| render::document_section(&documents[document_matches[item.index].index]))
        .collect();
    let rendered = render::render_context(&entry_sections, &document_sections);

    AssembledContext {
        entries: selected_entries,
        documents: selected_documents,
        rendered,
        trace: AssemblyTrace {
            seeds: seed_matches
                .iter()
                .map(|seed| SeedTrace {
                    uid: seed.uid,
                    score: seed.score,
                    reasons: seed.reasons.clone(),
                })
                .collect(),
            world_info_budget: world_info_trace,
            rag_gate: gate,
            rag_budget: rag_trace,
        },
    }
}

/// Combine seed, graph, constant, and order signals into candidates.
///
/// Only entries with a seed match, a graph contribution, or the
/// always-include flag are considered; the order bonus refines ranking
/// among them rather than admitting unmatched entries on its own.
fn collect_candidates<'a>(
    pack: &'a ScopeContextPack,
    seeds: &[SeedMatch],
    reached: &BTreeMap<EntryUid, GraphCandidate>,
) -> Vec<Candidate<'a>> {
    let seed_by_uid: BTreeMap<EntryUid, &SeedMatch> =
        seeds.iter().map(|seed| (seed.uid, seed)).collect();

    let mut candidates = Vec::new();
    for entry in pack.entries() {
        let seed = seed_by_uid.get(&entry.uid).copied();
        let graph = reached.get(&entry.uid);
        if seed.is_none() && graph.is_none() && !entry.is_constant {
            continue;
        }

        let seed_score = seed.map_or(0.0, |s| s.score);
        let graph_score = graph.map_or(0.0, |candidate| candidate.graph_score);
        let constant_bonus = if entry.is_constant { CONSTANT_BONUS } else { 0.0 };
        #[allow(clippy::cast_precision_loss)]
        let order_bonus = entry.order.max(0) as f64 * ORDER_SCALE;
        let score = seed_score + graph_score + constant_bonus + order_bonus;
        if score <= 0.0 {
            continue;
        }

        // Seeds (and constants with no graph trail) anchor at themselves.
        let (hop_distance, path) = match (seed, graph) {
            (None, Some(candidate)) => (candidate.hop_distance, candidate.best_path.clone()),
            _ => (0, vec![entry.uid]),
        };

        let mut reasons: Vec<String> = seed.map(|s| s.reasons.clone()).unwrap_or_default();
        if let Some(candidate) = graph {
            reasons.push(graph_reason(pack, candidate));
        }
        if entry.is_constant {
            reasons.push("always-on entry".to_string());
        }

        candidates.push(Candidate {
            entry,
            score,
            hop_distance,
            path,
            reasons,
        });
    }
    candidates
}

/// Human-readable justification for a graph contribution.
fn graph_reason(pack: &ScopeContextPack, candidate: &GraphCandidate) -> String {
    let titles: Vec<&str> = candidate
        .best_path
        .iter()
        .map(|uid| pack.entry(*uid).map_or("?", |entry| entry.title.as_str()))
        .collect();
    format!(
        "graph path [{}] ({} hops, +{:.1})",
        titles.join(" -> "),
        candidate.hop_distance,
        candidate.graph_score
    )
}

/// The empty result for an empty query: labeled placeholders, no error.
fn empty_context(
    options: &AssembleOptions,
    world_info_budget: usize,
    rag_budget: usize,
) -> AssembledContext {
    AssembledContext {
        entries: Vec::new(),
        documents: Vec::new(),
        rendered: render::render_context(&[], &[]),
        trace: AssemblyTrace {
            seeds: Vec::new(),
            world_info_budget: WorldInfoBudgetTrace {
                budgeted: world_info_budget,
                ..WorldInfoBudgetTrace::default()
            },
            rag_gate: RagGateTrace {
                policy: options.rag_fallback_policy,
                enabled: false,
                seed_confidence: 0.0,
                threshold: options.rag_fallback_threshold,
            },
            rag_budget: RagBudgetTrace {
                budgeted: rag_budget,
                ..RagBudgetTrace::default()
            },
        },
    }
}
