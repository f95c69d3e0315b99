//! RAG document scoring and fallback gating.
//!
//! Documents are scored lexically per query token — title beats path
//! beats content, first hit wins — plus a whole-query phrase bonus and an
//! optional externally computed semantic boost. Gating decides whether
//! documents are considered at all: `off` never, `always` whenever the
//! RAG sub-budget is positive, and `auto` only when lexical/graph seeding
//! is weak or absent — a fallback, not a default supplement.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use loreweave_core::{Document, DocumentUid};

use crate::options::RagFallbackPolicy;
use crate::types::RagGateTrace;

/// Score for a query token found in the title.
pub const TITLE_TOKEN_SCORE: f64 = 40.0;
/// Score for a query token found in the path (when not in the title).
pub const PATH_TOKEN_SCORE: f64 = 20.0;
/// Score for a query token found in the content (when nowhere else).
pub const CONTENT_TOKEN_SCORE: f64 = 10.0;
/// Bonus when the whole query appears in the content.
pub const QUERY_PHRASE_SCORE: f64 = 25.0;

/// Minimum query length for the whole-query phrase bonus.
const MIN_QUERY_PHRASE_LEN: usize = 4;

/// A scoring document with its match provenance.
#[derive(Clone, Debug)]
pub struct DocumentMatch {
    /// Index into the document slice handed to [`score_documents`].
    pub index: usize,
    /// The document's uid.
    pub uid: DocumentUid,
    /// Lexical score plus semantic boost.
    pub score: f64,
    /// Which tokens matched where.
    pub reasons: Vec<String>,
}

/// Score all documents against the query.
///
/// Returns only documents with score > 0, sorted by descending score with
/// (path, title, uid) ascending as the final deterministic tie-break.
/// A missing or partial boost map degrades to lexical-only scoring.
#[must_use]
pub fn score_documents(
    documents: &[Document],
    query_lower: &str,
    query_tokens: &BTreeSet<String>,
    boosts: Option<&HashMap<DocumentUid, f64>>,
) -> Vec<DocumentMatch> {
    let mut matches: Vec<DocumentMatch> = documents
        .iter()
        .enumerate()
        .filter_map(|(index, document)| {
            score_document(index, document, query_lower, query_tokens, boosts)
        })
        .collect();

    matches.sort_by(|a, b| {
        b.score.total_cmp(&a.score).then_with(|| {
            let left = &documents[a.index];
            let right = &documents[b.index];
            left.path
                .cmp(&right.path)
                .then_with(|| left.title.cmp(&right.title))
                .then_with(|| left.uid.cmp(&right.uid))
        })
    });
    matches
}

fn score_document(
    index: usize,
    document: &Document,
    query_lower: &str,
    query_tokens: &BTreeSet<String>,
    boosts: Option<&HashMap<DocumentUid, f64>>,
) -> Option<DocumentMatch> {
    let title = document.title.to_lowercase();
    let path = document.path.to_lowercase();
    let content = document.content.to_lowercase();

    let mut score = 0.0;
    let mut reasons = Vec::new();

    for token in query_tokens {
        if title.contains(token) {
            score += TITLE_TOKEN_SCORE;
            reasons.push(format!("token \"{token}\" in title"));
        } else if path.contains(token) {
            score += PATH_TOKEN_SCORE;
            reasons.push(format!("token \"{token}\" in path"));
        } else if content.contains(token) {
            score += CONTENT_TOKEN_SCORE;
            reasons.push(format!("token \"{token}\" in content"));
        }
    }

    if query_lower.len() >= MIN_QUERY_PHRASE_LEN && content.contains(query_lower) {
        score += QUERY_PHRASE_SCORE;
        reasons.push("query phrase in content".to_string());
    }

    if let Some(boost) = boosts.and_then(|map| map.get(&document.uid)) {
        if boost.is_finite() {
            score += boost;
            reasons.push(format!("semantic boost {boost:+.1}"));
        }
    }

    (score > 0.0).then_some(DocumentMatch {
        index,
        uid: document.uid,
        score,
        reasons,
    })
}

/// Decide whether documents are considered for this query.
#[must_use]
pub fn gate(
    policy: RagFallbackPolicy,
    rag_budget: usize,
    entries_selected: bool,
    seed_confidence: f64,
    threshold: f64,
) -> RagGateTrace {
    let enabled = match policy {
        RagFallbackPolicy::Off => false,
        RagFallbackPolicy::Always => rag_budget > 0,
        RagFallbackPolicy::Auto => !entries_selected || seed_confidence < threshold,
    };
    debug!(
        ?policy,
        enabled, seed_confidence, threshold, "RAG gate decision"
    );
    RagGateTrace {
        policy,
        enabled,
        seed_confidence,
        threshold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loreweave_core::tokenize;

    fn document(uid: u64, title: &str, path: &str, content: &str) -> Document {
        Document {
            uid: DocumentUid::new(uid),
            title: title.to_string(),
            path: path.to_string(),
            content: content.to_string(),
            scope: "world".to_string(),
        }
    }

    fn score_for(documents: &[Document], query: &str) -> Vec<DocumentMatch> {
        let lower = query.to_lowercase();
        let tokens = tokenize(&lower);
        score_documents(documents, &lower, &tokens, None)
    }

    // --- scoring ---

    #[test]
    fn title_hit_beats_path_and_content() {
        let docs = vec![document(1, "Aurelia", "notes/aurelia.md", "aurelia waits")];
        let matches = score_for(&docs, "aurelia");
        // First hit wins per token: only the title counts.
        assert!((matches[0].score - TITLE_TOKEN_SCORE).abs() < f64::EPSILON);
    }

    #[test]
    fn path_hit_when_not_in_title() {
        let docs = vec![document(1, "Notes", "world/aurelia.md", "")];
        let matches = score_for(&docs, "aurelia");
        assert!((matches[0].score - PATH_TOKEN_SCORE).abs() < f64::EPSILON);
    }

    #[test]
    fn content_hit_when_nowhere_else() {
        let docs = vec![document(1, "Notes", "world/misc.md", "aurelia waits")];
        let matches = score_for(&docs, "aurelia");
        assert!((matches[0].score - CONTENT_TOKEN_SCORE).abs() < f64::EPSILON);
    }

    #[test]
    fn whole_query_phrase_bonus() {
        let docs = vec![document(1, "Notes", "world/misc.md", "the gates of dawn opened")];
        let matches = score_for(&docs, "gates of dawn");
        // "gates" + "dawn" in content ("of" is a token too), plus phrase.
        let expected = 3.0 * CONTENT_TOKEN_SCORE + QUERY_PHRASE_SCORE;
        assert!((matches[0].score - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn short_queries_get_no_phrase_bonus() {
        let docs = vec![document(1, "Notes", "world/misc.md", "ab cd")];
        let matches = score_for(&docs, "ab");
        assert!((matches[0].score - CONTENT_TOKEN_SCORE).abs() < f64::EPSILON);
    }

    #[test]
    fn non_scoring_documents_are_excluded() {
        let docs = vec![document(1, "Notes", "world/misc.md", "nothing relevant")];
        assert!(score_for(&docs, "aurelia").is_empty());
    }

    #[test]
    fn semantic_boost_adds_to_lexical_score() {
        let docs = vec![document(1, "Notes", "world/misc.md", "aurelia waits")];
        let lower = "aurelia".to_string();
        let tokens = tokenize(&lower);
        let boosts: HashMap<DocumentUid, f64> = [(DocumentUid::new(1), 90.0)].into_iter().collect();
        let matches = score_documents(&docs, &lower, &tokens, Some(&boosts));
        assert!((matches[0].score - (CONTENT_TOKEN_SCORE + 90.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn non_finite_boost_is_ignored() {
        let docs = vec![document(1, "Notes", "world/misc.md", "aurelia waits")];
        let lower = "aurelia".to_string();
        let tokens = tokenize(&lower);
        let boosts: HashMap<DocumentUid, f64> =
            [(DocumentUid::new(1), f64::NAN)].into_iter().collect();
        let matches = score_documents(&docs, &lower, &tokens, Some(&boosts));
        assert!((matches[0].score - CONTENT_TOKEN_SCORE).abs() < f64::EPSILON);
    }

    #[test]
    fn boost_alone_can_qualify_a_document() {
        let docs = vec![document(1, "Notes", "world/misc.md", "nothing relevant")];
        let lower = "aurelia".to_string();
        let tokens = tokenize(&lower);
        let boosts: HashMap<DocumentUid, f64> = [(DocumentUid::new(1), 75.0)].into_iter().collect();
        let matches = score_documents(&docs, &lower, &tokens, Some(&boosts));
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn ties_break_on_path_then_title_then_uid() {
        let docs = vec![
            document(3, "Same", "b/doc.md", "aurelia"),
            document(1, "Same", "a/doc.md", "aurelia"),
            document(2, "Same", "a/doc.md", "aurelia"),
        ];
        let matches = score_for(&docs, "aurelia");
        let uids: Vec<u64> = matches.iter().map(|m| m.uid.get()).collect();
        assert_eq!(uids, vec![1, 2, 3]);
    }

    // --- gating ---

    #[test]
    fn off_never_enables() {
        assert!(!gate(RagFallbackPolicy::Off, 512, false, 0.0, 120.0).enabled);
    }

    #[test]
    fn always_enables_with_positive_budget() {
        assert!(gate(RagFallbackPolicy::Always, 1, true, 500.0, 120.0).enabled);
        assert!(!gate(RagFallbackPolicy::Always, 0, false, 0.0, 120.0).enabled);
    }

    #[test]
    fn auto_enables_without_selected_entries() {
        assert!(gate(RagFallbackPolicy::Auto, 512, false, 0.0, 120.0).enabled);
    }

    #[test]
    fn auto_enables_below_threshold() {
        assert!(gate(RagFallbackPolicy::Auto, 512, true, 100.0, 120.0).enabled);
    }

    #[test]
    fn auto_disables_with_confident_seeds() {
        assert!(!gate(RagFallbackPolicy::Auto, 512, true, 150.0, 120.0).enabled);
    }
}
