//! The importance ranker.
//!
//! Combines the normalized graph metrics into one integer `order` per
//! entry. The score is a weighted linear sum floored to an integer and
//! clamped to ≥ 1; ties are then broken by grouping entries with the same
//! integer score and adding each entry's position (plus one) within its
//! ascending-uid group. The result depends only on (score, uid) — never on
//! input collection order or map iteration order — so re-running on the
//! same corpus yields bit-identical output.

use std::collections::BTreeMap;

use tracing::debug;

use loreweave_core::{Entry, EntryUid};

use crate::graph::LinkGraph;
use crate::metrics;
use crate::weights::RankWeights;

/// Resolve the hierarchy root.
///
/// An explicit root wins when it is present in the graph. Otherwise the
/// root is the node maximizing (in-degree, total-degree, smallest uid),
/// in that priority order. An empty graph has no root.
#[must_use]
pub fn resolve_root(graph: &LinkGraph, explicit: Option<EntryUid>) -> Option<EntryUid> {
    if let Some(uid) = explicit {
        if graph.contains(uid) {
            return Some(uid);
        }
    }

    let mut best: Option<(usize, usize, EntryUid)> = None;
    for uid in graph.uids() {
        let in_degree = graph.in_degree(uid);
        let total_degree = in_degree + graph.out_degree(uid);
        // Ascending uid iteration: a strict comparison keeps the smallest
        // uid on ties.
        if best.is_none_or(|(bi, bt, _)| (in_degree, total_degree) > (bi, bt)) {
            best = Some((in_degree, total_degree, uid));
        }
    }
    best.map(|(_, _, uid)| uid)
}

/// Compute an integer `order` for every entry.
///
/// Pure function of (entries, graph, root, weights): identical output
/// across repeated invocations and input-order permutations. Entry uids
/// must be unique (the scope pack enforces this upstream). An empty entry
/// set yields an empty map.
#[must_use]
pub fn rank(
    entries: &[Entry],
    graph: &LinkGraph,
    root: Option<EntryUid>,
    weights: &RankWeights,
) -> BTreeMap<EntryUid, i64> {
    if entries.is_empty() {
        return BTreeMap::new();
    }

    let weights = weights.sanitized();
    let root = resolve_root(graph, root);
    debug!(
        entries = entries.len(),
        edges = graph.edge_count(),
        root = root.map(EntryUid::get),
        "ranking corpus"
    );

    let mut hierarchy = metrics::hierarchy_depths(graph, root);
    let mut in_degree = metrics::in_degrees(graph);
    let mut out_degree = metrics::out_degrees(graph);
    let mut total_degree: Vec<f64> = in_degree
        .iter()
        .zip(&out_degree)
        .map(|(i, o)| i + o)
        .collect();
    let mut page = metrics::pagerank(graph);
    let mut between = metrics::betweenness(graph);
    metrics::normalize_max(&mut hierarchy);
    metrics::normalize_max(&mut in_degree);
    metrics::normalize_max(&mut out_degree);
    metrics::normalize_max(&mut total_degree);
    metrics::normalize_max(&mut page);
    metrics::normalize_max(&mut between);

    let mut sorted: Vec<&Entry> = entries.iter().collect();
    sorted.sort_by_key(|entry| entry.uid);

    #[allow(clippy::cast_precision_loss)]
    let mut folder: Vec<f64> = sorted
        .iter()
        .map(|entry| entry.folder_depth() as f64)
        .collect();
    metrics::normalize_max(&mut folder);

    // Group by integer score; ascending-uid iteration keeps each group's
    // uid list sorted.
    let mut groups: BTreeMap<i64, Vec<EntryUid>> = BTreeMap::new();
    for (slot, entry) in sorted.iter().enumerate() {
        let at = |values: &[f64]| {
            graph
                .index_of(entry.uid)
                .map_or(0.0, |position| values[position])
        };
        let raw = weights.hierarchy * at(&hierarchy)
            + weights.in_degree * at(&in_degree)
            + weights.pagerank * at(&page)
            + weights.betweenness * at(&between)
            + weights.out_degree * at(&out_degree)
            + weights.total_degree * at(&total_degree)
            + weights.folder_depth * folder[slot];
        #[allow(clippy::cast_possible_truncation)]
        let score = (raw.floor() as i64).max(1);
        groups.entry(score).or_default().push(entry.uid);
    }

    let mut orders = BTreeMap::new();
    for (score, uids) in &groups {
        for (position, uid) in uids.iter().enumerate() {
            #[allow(clippy::cast_possible_wrap)]
            let _ = orders.insert(*uid, score + position as i64 + 1);
        }
    }
    orders
}

/// Write computed orders back into the entries.
///
/// Entries without a computed order (not part of the ranked corpus) are
/// left untouched.
pub fn apply_order(entries: &mut [Entry], orders: &BTreeMap<EntryUid, i64>) {
    for entry in entries {
        if let Some(order) = orders.get(&entry.uid) {
            entry.order = *order;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(value: u64) -> EntryUid {
        EntryUid::new(value)
    }

    fn entry(value: u64) -> Entry {
        Entry {
            uid: uid(value),
            title: format!("entry-{value}"),
            ..Entry::default()
        }
    }

    fn links(pairs: &[(u64, &[u64])]) -> BTreeMap<EntryUid, Vec<EntryUid>> {
        pairs
            .iter()
            .map(|(source, targets)| {
                (uid(*source), targets.iter().map(|t| uid(*t)).collect())
            })
            .collect()
    }

    // --- root resolution ---

    #[test]
    fn explicit_root_wins_when_present() {
        let graph = LinkGraph::build([uid(1), uid(2)], &links(&[(1, &[2])]));
        assert_eq!(resolve_root(&graph, Some(uid(2))), Some(uid(2)));
    }

    #[test]
    fn missing_explicit_root_falls_back_to_inference() {
        let graph = LinkGraph::build([uid(1), uid(2)], &links(&[(1, &[2])]));
        // Node 2 has in-degree 1, node 1 has 0.
        assert_eq!(resolve_root(&graph, Some(uid(99))), Some(uid(2)));
    }

    #[test]
    fn inferred_root_maximizes_in_degree() {
        let graph = LinkGraph::build(
            [uid(1), uid(2), uid(3)],
            &links(&[(1, &[3]), (2, &[3])]),
        );
        assert_eq!(resolve_root(&graph, None), Some(uid(3)));
    }

    #[test]
    fn root_tie_breaks_on_total_degree_then_smallest_uid() {
        // 1 and 2 both have in-degree 1; 1 also has an outbound edge, so
        // its total degree wins over 2.
        let graph = LinkGraph::build(
            [uid(1), uid(2), uid(3), uid(4)],
            &links(&[(3, &[1]), (4, &[2]), (1, &[4])]),
        );
        assert_eq!(resolve_root(&graph, None), Some(uid(1)));

        // Full tie: smallest uid wins.
        let graph = LinkGraph::build([uid(4), uid(7)], &BTreeMap::new());
        assert_eq!(resolve_root(&graph, None), Some(uid(4)));
    }

    #[test]
    fn empty_graph_has_no_root() {
        let graph = LinkGraph::build([], &BTreeMap::new());
        assert_eq!(resolve_root(&graph, None), None);
    }

    // --- ranking ---

    #[test]
    fn empty_corpus_is_noop() {
        let graph = LinkGraph::build([], &BTreeMap::new());
        assert!(rank(&[], &graph, None, &RankWeights::default()).is_empty());
    }

    #[test]
    fn every_entry_gets_an_order() {
        let entries = vec![entry(1), entry(2), entry(3)];
        let graph = LinkGraph::build(
            entries.iter().map(|e| e.uid),
            &links(&[(1, &[2]), (2, &[3])]),
        );
        let orders = rank(&entries, &graph, None, &RankWeights::default());
        assert_eq!(orders.len(), 3);
        assert!(orders.values().all(|&order| order >= 1));
    }

    #[test]
    fn hub_outranks_leaf() {
        // 2 and 3 link to 1: with default weights the hub scores highest.
        let entries = vec![entry(1), entry(2), entry(3)];
        let graph = LinkGraph::build(
            entries.iter().map(|e| e.uid),
            &links(&[(2, &[1]), (3, &[1])]),
        );
        let orders = rank(&entries, &graph, None, &RankWeights::default());
        assert!(orders[&uid(1)] > orders[&uid(2)]);
        assert!(orders[&uid(1)] > orders[&uid(3)]);
    }

    #[test]
    fn tie_break_assigns_distinct_orders_by_uid() {
        // No edges, no folders: identical raw score 1 for all.
        let entries = vec![entry(5), entry(2), entry(9)];
        let graph = LinkGraph::build(entries.iter().map(|e| e.uid), &BTreeMap::new());
        let orders = rank(&entries, &graph, None, &RankWeights::default());
        assert_eq!(orders[&uid(2)], 2);
        assert_eq!(orders[&uid(5)], 3);
        assert_eq!(orders[&uid(9)], 4);
    }

    #[test]
    fn non_finite_and_negative_weights_are_clamped() {
        let entries = vec![entry(1), entry(2)];
        let graph =
            LinkGraph::build(entries.iter().map(|e| e.uid), &links(&[(1, &[2])]));
        let weights = RankWeights {
            hierarchy: f64::NAN,
            in_degree: -10.0,
            ..RankWeights::default()
        };
        let orders = rank(&entries, &graph, None, &weights);
        assert!(orders.values().all(|&order| order >= 1));
    }

    #[test]
    fn folder_depth_contributes() {
        let mut deep = entry(1);
        deep.group_path = "world/regions/north".to_string();
        let shallow = entry(2);
        let graph = LinkGraph::build([uid(1), uid(2)], &BTreeMap::new());
        let weights = RankWeights {
            folder_depth: 50.0,
            ..RankWeights::default()
        };
        let orders = rank(&[deep, shallow], &graph, None, &weights);
        assert!(orders[&uid(1)] > orders[&uid(2)]);
    }

    #[test]
    fn apply_order_writes_back() {
        let mut entries = vec![entry(1), entry(2)];
        let graph = LinkGraph::build(entries.iter().map(|e| e.uid), &BTreeMap::new());
        let orders = rank(&entries, &graph, None, &RankWeights::default());
        apply_order(&mut entries, &orders);
        assert_eq!(entries[0].order, orders[&uid(1)]);
        assert_eq!(entries[1].order, orders[&uid(2)]);
    }
}
