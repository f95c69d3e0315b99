//! # loreweave-rank
//!
//! The importance ranker: computes a persistent integer `order` per entry
//! from link-graph topology and folder depth. Runs once per full corpus
//! rebuild.
//!
//! - **Link graph**: directed, deduplicated adjacency over entry uids,
//!   built from externally-resolved wikilink targets
//! - **Metrics**: BFS hierarchy depth from a root, in/out/total degree,
//!   PageRank, betweenness centrality, folder depth — each normalized by
//!   its corpus maximum
//! - **Scoring**: weighted linear sum with externally supplied weights,
//!   floored to an integer and clamped to ≥ 1
//! - **Tie-break**: deterministic (score, uid) group offsets so repeated
//!   runs on the same corpus are bit-identical in any input order
//!
//! The ranker is a stateless pure function: no process-wide caches, no
//! interior mutability, no I/O.

#![deny(unsafe_code)]

pub mod graph;
pub mod metrics;
pub mod ranker;
pub mod weights;

pub use graph::LinkGraph;
pub use ranker::{apply_order, rank, resolve_root};
pub use weights::RankWeights;
