//! Error types for rs-html2md.
//!
//! `Error` covers everything the pipeline can surface. Document validation has
//! its own `ValidationError` so callers can tell structural problems apart from
//! policy mismatches (summary length, keyword count).

/// Error type for pipeline operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Page could not be fetched (non-success status, proxy failure, headless failure).
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// Underlying HTTP client error.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Filesystem error while writing outputs or media.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization or payload parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// An extraction tier found no usable text.
    #[error("No extractable content found")]
    NoContent,

    /// An extraction tier failed outright.
    #[error("Extraction failed: {0}")]
    Extraction(String),

    /// Finished document failed structural validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A finished document violated one of the layout invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required heading is absent.
    #[error("Missing section: {section}")]
    MissingSection {
        /// The heading marker that was not found (e.g. `## Summary`).
        section: String,
    },

    /// All required headings exist but not in the required order.
    #[error("Sections are out of order")]
    SectionOrder,

    /// Summary word count is outside the configured range.
    #[error("Summary word count {words} out of range [{min}, {max}]")]
    SummaryLength { words: usize, min: usize, max: usize },

    /// Keyword count is outside the configured range.
    #[error("Keyword count {count} out of range [{min}, {max}]")]
    KeywordCount { count: usize, min: usize, max: usize },

    /// The Sources section lacks a required field.
    #[error("Sources missing {field}")]
    MissingMetadata {
        /// Human-readable name of the missing field.
        field: String,
    },
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
