//! Token estimation for budget accounting.
//!
//! The assembler budgets in estimated tokens, not characters. The estimate
//! is the usual chars-per-token heuristic: `max(1, ceil(chars / 4))`.
//! Character count (not byte count) keeps the estimate stable for
//! non-ASCII content.

/// Estimate the token cost of a piece of text.
#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_costs_one_token() {
        assert_eq!(estimate_tokens(""), 1);
    }

    #[test]
    fn rounds_up() {
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcde"), 2);
    }

    #[test]
    fn counts_chars_not_bytes() {
        // Four 3-byte chars is still one token.
        assert_eq!(estimate_tokens("日本語字"), 1);
    }

    #[test]
    fn scales_linearly() {
        let text = "x".repeat(1024);
        assert_eq!(estimate_tokens(&text), 256);
    }
}
