//! Compiled regex patterns shared across the pipeline.
//!
//! All patterns are compiled once at first use with `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Boilerplate Detection Patterns
// =============================================================================

/// Matches class/id names indicating navigation elements.
///
/// `nav` only matches as a whole token or at a token edge so layout wrappers
/// like `in-page-nav-container` are left alone.
pub static NAVIGATION_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(^nav$|^nav[-_]|[-_]nav$|navbar|navigation|top[-_]?nav|main[-_]?menu|site[-_]?nav|\bmenu\b|site[-_]?footer|site[-_]?header|breadcrumbs?)",
    )
    .expect("NAVIGATION_CLASS regex")
});

/// Matches class/id names indicating advertisement elements.
pub static ADVERTISEMENT_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(ad|ads|advert|advertisement|sponsor|sponsored|promo)$")
        .expect("ADVERTISEMENT_CLASS regex")
});

/// Matches class/id names indicating boilerplate content.
pub static BOILERPLATE_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(comment|shar(?:e|ing)|social|related|recommend(?:ed)?|\bfooter\b|copyright|disclaimer|more[-_]?from|you[-_]?may[-_]?like|taboola|outbrain|cookie[-_]?(?:consent|notice|banner)|consent[-_]?banner|gdpr|\bsubscribe\b|newsletter|trending|most[-_]?read|tag[-_]?cloud|post[-_]?meta|entry[-_]?meta)",
    )
    .expect("BOILERPLATE_CLASS regex")
});

// =============================================================================
// Text Patterns
// =============================================================================

/// A word token, as counted by the summary-length check.
pub static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w+\b").expect("WORD regex"));

/// Runs of non-word characters, used to tokenize topics.
pub static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\W+").expect("NON_WORD regex"));

/// Runs of characters not allowed in a slug.
pub static SLUG_INVALID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("SLUG_INVALID regex"));

/// Matches leading/trailing horizontal whitespace on lines.
pub static LINE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]+|[ \t]+$").expect("LINE_WHITESPACE regex")
});

/// Matches runs of horizontal whitespace inside a line.
pub static INLINE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\u{a0}]+").expect("INLINE_WHITESPACE regex"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_class_edges() {
        assert!(NAVIGATION_CLASS.is_match("main-nav"));
        assert!(NAVIGATION_CLASS.is_match("navbar"));
        assert!(!NAVIGATION_CLASS.is_match("usa-in-page-nav-container"));
    }

    #[test]
    fn test_boilerplate_class() {
        assert!(BOILERPLATE_CLASS.is_match("share-buttons"));
        assert!(BOILERPLATE_CLASS.is_match("related-posts"));
        assert!(!BOILERPLATE_CLASS.is_match("article-body"));
    }

    #[test]
    fn test_word_counts_unicode() {
        assert_eq!(WORD.find_iter("Hello, wörld! 42").count(), 3);
    }

    #[test]
    fn test_non_word_split() {
        let parts: Vec<&str> = NON_WORD.split("rust-async, tokio").collect();
        assert_eq!(parts, vec!["rust", "async", "tokio"]);
    }
}
