//! # loreweave-core
//!
//! Foundation vocabulary for the loreweave retrieval core.
//!
//! This crate provides the shared types the ranker and assembler crates
//! depend on:
//!
//! - **Branded uids**: [`EntryUid`], [`DocumentUid`] as `u64` newtypes for
//!   type safety across the two id spaces
//! - **Entries**: [`Entry`] — a rankable, retrievable lore/world-info unit
//!   with keywords, content, and resolved link targets
//! - **Documents**: [`Document`] — a RAG-style retrievable unit
//! - **Scope packs**: [`ScopeContextPack`] — an immutable per-scope snapshot
//!   of entries and documents, validated at construction
//! - **Token math**: [`estimate_tokens`] and the query tokenizer in [`text`]
//!
//! Everything here is plain data plus pure functions — no I/O, no global
//! state, no async.

#![deny(unsafe_code)]

pub mod document;
pub mod entry;
pub mod errors;
pub mod ids;
pub mod pack;
pub mod text;
pub mod tokens;

pub use document::Document;
pub use entry::Entry;
pub use errors::PackError;
pub use ids::{DocumentUid, EntryUid};
pub use pack::ScopeContextPack;
pub use text::tokenize;
pub use tokens::estimate_tokens;
