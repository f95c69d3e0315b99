//! The resolved link graph.
//!
//! A directed adjacency over entry uids, built once per corpus build from
//! externally-resolved wikilink targets. Edges are deduplicated and
//! self-loops excluded. Nodes are inserted in ascending uid order and
//! edges in ascending (source, target) order, so node indices, neighbor
//! iteration, and every metric computed downstream are independent of the
//! caller's collection order.
//!
//! Backed by a petgraph [`DiGraph`] (arena + index pattern) with a
//! uid → index side table, like a call graph keyed by function ids.

use std::collections::{BTreeMap, BTreeSet};

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};

use loreweave_core::EntryUid;

/// Directed, deduplicated link graph over entry uids.
#[derive(Debug, Default)]
pub struct LinkGraph {
    graph: DiGraph<EntryUid, ()>,
    index: BTreeMap<EntryUid, NodeIndex>,
}

impl LinkGraph {
    /// Build a graph from a set of entry uids and their resolved outbound
    /// link targets.
    ///
    /// Every uid becomes a node, linked or not. Targets that are not in
    /// the uid set are silently dropped; self-loops and duplicate edges
    /// are excluded.
    #[must_use]
    pub fn build(
        uids: impl IntoIterator<Item = EntryUid>,
        resolved: &BTreeMap<EntryUid, Vec<EntryUid>>,
    ) -> Self {
        let mut graph = DiGraph::new();
        let mut index = BTreeMap::new();

        let sorted: BTreeSet<EntryUid> = uids.into_iter().collect();
        for uid in &sorted {
            let node = graph.add_node(*uid);
            let _ = index.insert(*uid, node);
        }

        for (source, targets) in resolved {
            let Some(&from) = index.get(source) else {
                continue;
            };
            let deduped: BTreeSet<EntryUid> = targets.iter().copied().collect();
            for target in deduped {
                if target == *source {
                    continue;
                }
                if let Some(&to) = index.get(&target) {
                    let _ = graph.add_edge(from, to, ());
                }
            }
        }

        Self { graph, index }
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of (deduplicated) edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// True when the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// True when the uid is a node of this graph.
    #[must_use]
    pub fn contains(&self, uid: EntryUid) -> bool {
        self.index.contains_key(&uid)
    }

    /// Iterate all uids in ascending order.
    pub fn uids(&self) -> impl Iterator<Item = EntryUid> + '_ {
        self.index.keys().copied()
    }

    /// Position of a uid in the ascending node order.
    #[must_use]
    pub fn index_of(&self, uid: EntryUid) -> Option<usize> {
        self.index.get(&uid).map(|node| node.index())
    }

    /// Uid at a node position.
    #[must_use]
    pub fn uid_at(&self, position: usize) -> EntryUid {
        self.graph[NodeIndex::new(position)]
    }

    /// Outbound neighbors of a uid, ascending.
    #[must_use]
    pub fn successors(&self, uid: EntryUid) -> Vec<EntryUid> {
        let Some(&node) = self.index.get(&uid) else {
            return Vec::new();
        };
        let mut out: Vec<EntryUid> = self
            .graph
            .neighbors_directed(node, Direction::Outgoing)
            .map(|n| self.graph[n])
            .collect();
        out.sort_unstable();
        out
    }

    /// In-degree of a uid (0 for unknown uids).
    #[must_use]
    pub fn in_degree(&self, uid: EntryUid) -> usize {
        self.index.get(&uid).map_or(0, |&node| {
            self.graph.neighbors_directed(node, Direction::Incoming).count()
        })
    }

    /// Out-degree of a uid (0 for unknown uids).
    #[must_use]
    pub fn out_degree(&self, uid: EntryUid) -> usize {
        self.index.get(&uid).map_or(0, |&node| {
            self.graph.neighbors_directed(node, Direction::Outgoing).count()
        })
    }

    /// Outbound neighbor positions of a node position, ascending.
    pub(crate) fn successor_positions(&self, position: usize) -> Vec<usize> {
        let mut out: Vec<usize> = self
            .graph
            .neighbors_directed(NodeIndex::new(position), Direction::Outgoing)
            .map(NodeIndex::index)
            .collect();
        out.sort_unstable();
        out
    }

    /// Out-degree of a node position.
    pub(crate) fn out_degree_at(&self, position: usize) -> usize {
        self.graph
            .neighbors_directed(NodeIndex::new(position), Direction::Outgoing)
            .count()
    }

    /// In-degree of a node position.
    pub(crate) fn in_degree_at(&self, position: usize) -> usize {
        self.graph
            .neighbors_directed(NodeIndex::new(position), Direction::Incoming)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(value: u64) -> EntryUid {
        EntryUid::new(value)
    }

    fn links(pairs: &[(u64, &[u64])]) -> BTreeMap<EntryUid, Vec<EntryUid>> {
        pairs
            .iter()
            .map(|(source, targets)| {
                (uid(*source), targets.iter().map(|t| uid(*t)).collect())
            })
            .collect()
    }

    #[test]
    fn nodes_are_sorted_by_uid() {
        let graph = LinkGraph::build([uid(3), uid(1), uid(2)], &BTreeMap::new());
        let uids: Vec<u64> = graph.uids().map(EntryUid::get).collect();
        assert_eq!(uids, vec![1, 2, 3]);
        assert_eq!(graph.index_of(uid(1)), Some(0));
        assert_eq!(graph.uid_at(2), uid(3));
    }

    #[test]
    fn deduplicates_edges() {
        let graph = LinkGraph::build([uid(1), uid(2)], &links(&[(1, &[2, 2, 2])]));
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.out_degree(uid(1)), 1);
        assert_eq!(graph.in_degree(uid(2)), 1);
    }

    #[test]
    fn excludes_self_loops() {
        let graph = LinkGraph::build([uid(1)], &links(&[(1, &[1])]));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn drops_unknown_targets() {
        let graph = LinkGraph::build([uid(1)], &links(&[(1, &[99])]));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn successors_are_sorted() {
        let graph = LinkGraph::build(
            [uid(1), uid(2), uid(3)],
            &links(&[(1, &[3, 2])]),
        );
        assert_eq!(graph.successors(uid(1)), vec![uid(2), uid(3)]);
    }

    #[test]
    fn build_is_input_order_independent() {
        let resolved = links(&[(1, &[2]), (3, &[1, 2])]);
        let a = LinkGraph::build([uid(1), uid(2), uid(3)], &resolved);
        let b = LinkGraph::build([uid(3), uid(2), uid(1)], &resolved);
        for value in [1, 2, 3] {
            assert_eq!(a.successors(uid(value)), b.successors(uid(value)));
            assert_eq!(a.index_of(uid(value)), b.index_of(uid(value)));
        }
    }

    #[test]
    fn empty_graph() {
        let graph = LinkGraph::build([], &BTreeMap::new());
        assert!(graph.is_empty());
        assert_eq!(graph.successors(uid(1)), Vec::<EntryUid>::new());
    }
}
