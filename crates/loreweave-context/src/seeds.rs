//! Seed detection.
//!
//! A seed is an entry whose keywords or title directly match the query
//! text. Keywords containing a space are phrases and match by substring
//! containment; single-word keywords match by exact token-set membership.
//! Titles contribute a weaker signal, either as a whole-title substring
//! match or per title token.

use std::collections::BTreeSet;

use loreweave_core::{Entry, EntryUid, tokenize};

/// Score for a phrase keyword contained in the query.
pub const PHRASE_KEYWORD_SCORE: f64 = 150.0;
/// Score for a single-word keyword present in the query token set.
pub const TOKEN_KEYWORD_SCORE: f64 = 120.0;
/// Score for the whole title appearing in the query.
pub const TITLE_MATCH_SCORE: f64 = 70.0;
/// Score per matching title token.
pub const TITLE_TOKEN_SCORE: f64 = 18.0;

/// Minimum title length for the whole-title substring check.
const MIN_TITLE_LEN: usize = 3;
/// Minimum title token length for the per-token check.
const MIN_TITLE_TOKEN_LEN: usize = 4;

/// Title tokens too generic to count as a match.
const STOPWORDS: &[&str] = &[
    "the", "and", "for", "with", "into", "from", "that", "this", "then", "when", "where", "what",
    "who", "why", "how", "chapter", "scene", "notes", "story", "entry", "world",
];

/// A detected seed with its score and match provenance.
#[derive(Clone, Debug)]
pub struct SeedMatch {
    /// Seed entry uid.
    pub uid: EntryUid,
    /// Cumulative seed score.
    pub score: f64,
    /// Which keywords/title terms matched.
    pub reasons: Vec<String>,
}

/// Detect seeds across all entries.
///
/// Returns seeds sorted by descending score, ties broken by ascending uid.
/// `query_lower` must already be lowercased; `query_tokens` is its token
/// set from [`tokenize`].
#[must_use]
pub fn detect_seeds(
    entries: &[Entry],
    query_lower: &str,
    query_tokens: &BTreeSet<String>,
) -> Vec<SeedMatch> {
    if query_lower.is_empty() {
        return Vec::new();
    }

    let mut seeds: Vec<SeedMatch> = entries
        .iter()
        .filter_map(|entry| score_entry(entry, query_lower, query_tokens))
        .collect();
    seeds.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.uid.cmp(&b.uid))
    });
    seeds
}

/// Score one entry against the query; `None` when nothing matched.
fn score_entry(
    entry: &Entry,
    query_lower: &str,
    query_tokens: &BTreeSet<String>,
) -> Option<SeedMatch> {
    let mut score = 0.0;
    let mut reasons = Vec::new();

    // Keywords: primary then secondary, deduplicated after lowercasing.
    let mut seen: BTreeSet<String> = BTreeSet::new();
    for keyword in entry.keywords() {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() || !seen.insert(keyword.clone()) {
            continue;
        }
        if keyword.contains(' ') {
            if query_lower.contains(&keyword) {
                score += PHRASE_KEYWORD_SCORE;
                reasons.push(format!("phrase keyword \"{keyword}\""));
            }
        } else if query_tokens.contains(&keyword) {
            score += TOKEN_KEYWORD_SCORE;
            reasons.push(format!("keyword \"{keyword}\""));
        }
    }

    // Title: whole-title substring first, per-token fallback otherwise.
    let title = entry.title.trim().to_lowercase();
    if title.len() >= MIN_TITLE_LEN && query_lower.contains(&title) {
        score += TITLE_MATCH_SCORE;
        reasons.push(format!("title \"{title}\""));
    } else {
        for token in tokenize(&entry.title) {
            if token.len() >= MIN_TITLE_TOKEN_LEN
                && !STOPWORDS.contains(&token.as_str())
                && query_tokens.contains(&token)
            {
                score += TITLE_TOKEN_SCORE;
                reasons.push(format!("title token \"{token}\""));
            }
        }
    }

    (score > 0.0).then_some(SeedMatch {
        uid: entry.uid,
        score,
        reasons,
    })
}
