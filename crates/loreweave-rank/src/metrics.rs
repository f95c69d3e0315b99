//! Per-entry graph metrics.
//!
//! Each metric is computed for every node of the link graph, indexed by
//! node position (ascending uid order), then normalized to [0, 1] by
//! dividing by its own maximum with the denominator floored to 1 — the
//! floor covers corpora with no edges or a single node, where the maximum
//! would otherwise be zero.
//!
//! PageRank follows the standard power iteration with uniform edge weight
//! and dangling-mass redistribution; betweenness is Brandes' algorithm
//! over the directed graph.

use std::collections::VecDeque;

use crate::graph::LinkGraph;

use loreweave_core::EntryUid;

/// PageRank damping factor.
pub const PAGERANK_DAMPING: f64 = 0.85;
/// PageRank convergence tolerance (max per-node change).
pub const PAGERANK_TOLERANCE: f64 = 1e-6;
/// Hard cap on PageRank power iterations.
pub const PAGERANK_MAX_ITERATIONS: usize = 100;

/// Normalize values in place by their maximum, denominator floored to 1.
pub fn normalize_max(values: &mut [f64]) {
    let denom = values.iter().copied().fold(0.0_f64, f64::max).max(1.0);
    for value in values.iter_mut() {
        *value /= denom;
    }
}

/// Breadth-first distance from the root along outbound edges.
///
/// Unreached nodes (and every node, when there is no root) get depth 0.
#[must_use]
pub fn hierarchy_depths(graph: &LinkGraph, root: Option<EntryUid>) -> Vec<f64> {
    let n = graph.node_count();
    let mut depths = vec![0.0; n];
    let Some(root_position) = root.and_then(|uid| graph.index_of(uid)) else {
        return depths;
    };

    let mut seen = vec![false; n];
    seen[root_position] = true;
    let mut queue = VecDeque::from([(root_position, 0usize)]);
    while let Some((position, depth)) = queue.pop_front() {
        #[allow(clippy::cast_precision_loss)]
        {
            depths[position] = depth as f64;
        }
        for next in graph.successor_positions(position) {
            if !seen[next] {
                seen[next] = true;
                queue.push_back((next, depth + 1));
            }
        }
    }
    depths
}

/// In-degree per node position.
#[must_use]
pub fn in_degrees(graph: &LinkGraph) -> Vec<f64> {
    #[allow(clippy::cast_precision_loss)]
    let degrees = (0..graph.node_count())
        .map(|position| graph.in_degree_at(position) as f64)
        .collect();
    degrees
}

/// Out-degree per node position.
#[must_use]
pub fn out_degrees(graph: &LinkGraph) -> Vec<f64> {
    #[allow(clippy::cast_precision_loss)]
    let degrees = (0..graph.node_count())
        .map(|position| graph.out_degree_at(position) as f64)
        .collect();
    degrees
}

/// PageRank per node position.
///
/// Power iteration with uniform edge weight 1 per outgoing edge, uniform
/// teleportation, and dangling-node mass redistributed uniformly.
/// Converges when the largest per-node change drops below
/// [`PAGERANK_TOLERANCE`], capped at [`PAGERANK_MAX_ITERATIONS`].
#[must_use]
pub fn pagerank(graph: &LinkGraph) -> Vec<f64> {
    let n = graph.node_count();
    if n == 0 {
        return Vec::new();
    }

    #[allow(clippy::cast_precision_loss)]
    let count = n as f64;
    let out_degrees: Vec<usize> = (0..n).map(|p| graph.out_degree_at(p)).collect();

    let mut ranks = vec![1.0 / count; n];
    for _iteration in 0..PAGERANK_MAX_ITERATIONS {
        let dangling_sum: f64 = (0..n)
            .filter(|&p| out_degrees[p] == 0)
            .map(|p| ranks[p])
            .sum();

        let base = (1.0 - PAGERANK_DAMPING) / count + PAGERANK_DAMPING * dangling_sum / count;
        let mut next = vec![base; n];
        for position in 0..n {
            if out_degrees[position] == 0 {
                continue;
            }
            #[allow(clippy::cast_precision_loss)]
            let share = ranks[position] / out_degrees[position] as f64;
            for successor in graph.successor_positions(position) {
                next[successor] += PAGERANK_DAMPING * share;
            }
        }

        let max_change = ranks
            .iter()
            .zip(&next)
            .map(|(old, new)| (new - old).abs())
            .fold(0.0_f64, f64::max);
        ranks = next;
        if max_change < PAGERANK_TOLERANCE {
            break;
        }
    }
    ranks
}

/// Betweenness centrality per node position (Brandes, directed, unweighted).
#[must_use]
pub fn betweenness(graph: &LinkGraph) -> Vec<f64> {
    let n = graph.node_count();
    let mut centrality = vec![0.0; n];

    for source in 0..n {
        // Forward BFS: shortest-path counts and predecessor lists.
        let mut order = Vec::with_capacity(n);
        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut sigma = vec![0.0_f64; n];
        sigma[source] = 1.0;
        let mut distance = vec![usize::MAX; n];
        distance[source] = 0;

        let mut queue = VecDeque::from([source]);
        while let Some(node) = queue.pop_front() {
            order.push(node);
            for next in graph.successor_positions(node) {
                if distance[next] == usize::MAX {
                    distance[next] = distance[node] + 1;
                    queue.push_back(next);
                }
                if distance[next] == distance[node] + 1 {
                    sigma[next] += sigma[node];
                    predecessors[next].push(node);
                }
            }
        }

        // Backward accumulation of pair dependencies.
        let mut delta = vec![0.0_f64; n];
        while let Some(node) = order.pop() {
            for &pred in &predecessors[node] {
                delta[pred] += sigma[pred] / sigma[node] * (1.0 + delta[node]);
            }
            if node != source {
                centrality[node] += delta[node];
            }
        }
    }

    centrality
}
