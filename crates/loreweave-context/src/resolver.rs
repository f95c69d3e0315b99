//! Wikilink address resolution.
//!
//! Entries are addressable by their normalized title and keywords, plus
//! basenames and separator variants (space/hyphen/underscore are
//! interchangeable). Outbound wikilinks resolve through this table to
//! neighbor entry uids; targets that resolve to nothing are silently
//! dropped, and self-references are excluded.
//!
//! When two entries claim the same address, the smaller uid wins — the
//! table is built in ascending uid order and first insertion sticks, so
//! resolution never depends on input collection order.

use std::collections::{BTreeMap, BTreeSet};

use loreweave_core::{Entry, EntryUid};

/// Normalize a link target or address source.
///
/// Trims, lowercases, converts path separators to forward slashes, strips
/// a trailing `#heading` fragment, and strips a markdown-like suffix.
#[must_use]
pub fn normalize_target(raw: &str) -> String {
    let mut target = raw.trim().to_lowercase().replace('\\', "/");
    if let Some(position) = target.find('#') {
        target.truncate(position);
    }
    for suffix in [".md", ".markdown"] {
        if let Some(stripped) = target.strip_suffix(suffix) {
            target = stripped.to_string();
            break;
        }
    }
    target.trim().to_string()
}

/// Build the address table: normalized address → entry uid.
///
/// Each entry contributes its title and keywords, each address's basename,
/// and separator variants of all of those.
#[must_use]
pub fn build_address_table(entries: &[Entry]) -> BTreeMap<String, EntryUid> {
    let mut table: BTreeMap<String, EntryUid> = BTreeMap::new();

    let mut sorted: Vec<&Entry> = entries.iter().collect();
    sorted.sort_by_key(|entry| entry.uid);

    for entry in sorted {
        let mut addresses: BTreeSet<String> = BTreeSet::new();
        for source in std::iter::once(entry.title.as_str()).chain(entry.keywords()) {
            let normalized = normalize_target(source);
            if normalized.is_empty() {
                continue;
            }
            for address in with_basename(&normalized) {
                for variant in separator_variants(&address) {
                    let _ = addresses.insert(variant);
                }
            }
        }
        for address in addresses {
            let _ = table.entry(address).or_insert(entry.uid);
        }
    }
    table
}

/// Resolve every entry's outbound links to neighbor uids.
///
/// Targets are deduplicated, unresolvable ones dropped, self-references
/// excluded. The result maps each linking entry to its neighbors in
/// ascending uid order.
#[must_use]
pub fn resolve_links(entries: &[Entry]) -> BTreeMap<EntryUid, Vec<EntryUid>> {
    let table = build_address_table(entries);
    let mut resolved: BTreeMap<EntryUid, Vec<EntryUid>> = BTreeMap::new();

    for entry in entries {
        let mut neighbors: BTreeSet<EntryUid> = BTreeSet::new();
        for raw in &entry.outbound_links {
            let normalized = normalize_target(raw);
            if normalized.is_empty() {
                continue;
            }
            let target = table.get(&normalized).or_else(|| {
                // Path-style links may address an entry by basename only.
                normalized
                    .rsplit('/')
                    .next()
                    .and_then(|basename| table.get(basename))
            });
            if let Some(&uid) = target {
                if uid != entry.uid {
                    let _ = neighbors.insert(uid);
                }
            }
        }
        if !neighbors.is_empty() {
            let _ = resolved.insert(entry.uid, neighbors.into_iter().collect());
        }
    }
    resolved
}

/// An address plus its basename, when the address is path-like.
fn with_basename(address: &str) -> Vec<String> {
    let mut out = vec![address.to_string()];
    if let Some(basename) = address.rsplit('/').next() {
        if !basename.is_empty() && basename != address {
            out.push(basename.to_string());
        }
    }
    out
}

/// Space, hyphen, and underscore are interchangeable separators.
fn separator_variants(address: &str) -> Vec<String> {
    [' ', '-', '_']
        .iter()
        .map(|&separator| {
            address
                .chars()
                .map(|c| {
                    if c == ' ' || c == '-' || c == '_' {
                        separator
                    } else {
                        c
                    }
                })
                .collect()
        })
        .collect()
}
