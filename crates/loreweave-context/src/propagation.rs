//! Multi-hop score propagation.
//!
//! Every seed spreads its score breadth-first along outbound links. The
//! contribution decays by a fixed factor per hop and is pruned once it
//! drops to 0.5 or below; a path never revisits one of its own nodes, but
//! separate paths traverse independently (cycles between entries are
//! fine). Each reached node accumulates the sum of all contributions and
//! remembers a single best path for reporting.

use std::collections::{BTreeMap, VecDeque};

use loreweave_core::EntryUid;

use crate::seeds::SeedMatch;

/// Contributions at or below this value are pruned: neither recorded nor
/// propagated further.
pub const PRUNE_THRESHOLD: f64 = 0.5;

/// A node reached by propagation, with its accumulated score and the best
/// path that justifies it.
#[derive(Clone, Debug)]
pub struct GraphCandidate {
    /// Sum of all contributions that reached this node.
    pub graph_score: f64,
    /// Hop count of the best path.
    pub hop_distance: u32,
    /// Best path from a seed to this node (seed first, node last).
    ///
    /// Chosen by fewer hops, then larger contribution, then
    /// lexicographically smaller uid sequence.
    pub best_path: Vec<EntryUid>,
    /// Contribution delivered along the best path.
    pub best_contribution: f64,
}

/// Propagate all seeds through the adjacency.
///
/// `max_hops` and `decay` are expected to be pre-clamped (hops in [0, 3],
/// decay in [0.2, 0.9]) by option sanitization. Seeds are processed in
/// their given (score-descending) order; the result is independent of
/// that order since contributions sum and the best-path criteria form a
/// total order.
#[must_use]
pub fn propagate(
    seeds: &[SeedMatch],
    adjacency: &BTreeMap<EntryUid, Vec<EntryUid>>,
    max_hops: u32,
    decay: f64,
) -> BTreeMap<EntryUid, GraphCandidate> {
    let mut candidates: BTreeMap<EntryUid, GraphCandidate> = BTreeMap::new();

    for seed in seeds {
        let mut queue: VecDeque<(Vec<EntryUid>, f64)> =
            VecDeque::from([(vec![seed.uid], seed.score)]);

        while let Some((path, contribution)) = queue.pop_front() {
            #[allow(clippy::cast_possible_truncation)]
            let hops = (path.len() - 1) as u32;
            if hops >= max_hops {
                continue;
            }
            let Some(&last) = path.last() else {
                continue;
            };
            let Some(neighbors) = adjacency.get(&last) else {
                continue;
            };
            for &next in neighbors {
                if path.contains(&next) {
                    continue;
                }
                let next_contribution = contribution * decay;
                if next_contribution <= PRUNE_THRESHOLD {
                    continue;
                }
                let mut next_path = path.clone();
                next_path.push(next);
                record(&mut candidates, next, next_contribution, hops + 1, &next_path);
                queue.push_back((next_path, next_contribution));
            }
        }
    }

    candidates
}

/// Accumulate a contribution at a node and keep the best path.
fn record(
    candidates: &mut BTreeMap<EntryUid, GraphCandidate>,
    uid: EntryUid,
    contribution: f64,
    hops: u32,
    path: &[EntryUid],
) {
    match candidates.get_mut(&uid) {
        Some(candidate) => {
            candidate.graph_score += contribution;
            if is_better_path(hops, contribution, path, candidate) {
                candidate.hop_distance = hops;
                candidate.best_contribution = contribution;
                candidate.best_path = path.to_vec();
            }
        }
        None => {
            let _ = candidates.insert(
                uid,
                GraphCandidate {
                    graph_score: contribution,
                    hop_distance: hops,
                    best_path: path.to_vec(),
                    best_contribution: contribution,
                },
            );
        }
    }
}

/// Smaller hop count wins; then larger contribution; then the
/// lexicographically smaller uid sequence.
fn is_better_path(hops: u32, contribution: f64, path: &[EntryUid], current: &GraphCandidate) -> bool {
    if hops != current.hop_distance {
        return hops < current.hop_distance;
    }
    match contribution.total_cmp(&current.best_contribution) {
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Equal => path < current.best_path.as_slice(),
    }
}
