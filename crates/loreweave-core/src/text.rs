//! Query tokenization.
//!
//! Both seed detection and RAG scoring match against the same token set:
//! lowercase the text, take maximal `[a-z0-9][a-z0-9_-]*` runs, keep only
//! tokens of length ≥ 2, and deduplicate. A `BTreeSet` keeps iteration
//! order sorted and therefore deterministic.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Minimum length for a token to be kept.
const MIN_TOKEN_LEN: usize = 2;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[a-z0-9][a-z0-9_-]*").expect("valid regex"));

/// Tokenize text into a deduplicated, sorted token set.
#[must_use]
pub fn tokenize(text: &str) -> BTreeSet<String> {
    let lowered = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|token| token.len() >= MIN_TOKEN_LEN)
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<String> {
        tokenize(text).into_iter().collect()
    }

    #[test]
    fn lowercases_and_splits() {
        assert_eq!(tokens("Aurelia enters Yggdrasil"), vec!["aurelia", "enters", "yggdrasil"]);
    }

    #[test]
    fn keeps_hyphens_and_underscores_inside_runs() {
        assert_eq!(tokens("world-info and lore_entry"), vec!["and", "lore_entry", "world-info"]);
    }

    #[test]
    fn drops_single_char_tokens() {
        assert_eq!(tokens("a b cd"), vec!["cd"]);
    }

    #[test]
    fn runs_must_start_alphanumeric() {
        // A leading underscore is not part of a run.
        assert_eq!(tokens("_foo"), vec!["foo"]);
    }

    #[test]
    fn deduplicates() {
        assert_eq!(tokens("echo Echo ECHO"), vec!["echo"]);
    }

    #[test]
    fn empty_and_punctuation_only_yield_nothing() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("!!! ... ???").is_empty());
    }

    #[test]
    fn digits_are_tokens() {
        assert_eq!(tokens("chapter 42"), vec!["42", "chapter"]);
    }
}
