//! # rs-html2md
//!
//! Turn a web page into a self-contained, validated Markdown document.
//!
//! The pipeline fetches a page, extracts its main text, metadata, images,
//! videos and links, optionally keeps only blocks about a topic, tags each
//! block with its language, downloads media, and assembles a document with
//! media spread evenly between paragraphs. Finished documents can be checked
//! with [`validate_document`].
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_html2md::{build_content_markdown, extract, media_lines};
//!
//! let html = r#"<html><head><title>My Article</title></head>
//! <body><article><p>First.</p><p>Second.</p><img src="/pic.png"></article></body></html>"#;
//!
//! let content = extract(html, "https://example.com/post");
//! let paragraphs: Vec<String> = content.text_blocks.iter().map(|b| b.text.clone()).collect();
//! let media = media_lines(&content.images, &content.videos);
//!
//! let body = build_content_markdown(&paragraphs, &media, &content.links);
//! assert_eq!(body, "First.\n\nSecond.\n\n### Media\n\n![image](https://example.com/pic.png)");
//! ```
//!
//! ## Features
//!
//! - **Tiered extraction**: content heuristics first, Readability (`dom_smoothie`) second,
//!   the raw `<title>` as the last title source
//! - **Media interleaving**: deterministic placement of images and video snapshots
//! - **Validation**: section order, summary length, keyword count, source fields
//! - **Pluggable collaborators**: fetcher, media fetcher, language detector,
//!   translator and renderer are traits

mod error;
mod options;
mod patterns;
mod result;

/// Page extraction tiers and media harvesting.
pub mod extractor;

/// Metadata extraction (JSON-LD, HTML meta tags, DOM heuristics).
pub mod metadata;

/// URL utilities for resolution, scheme checks and naming.
pub mod url_utils;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Block-level topic filtering.
pub mod topic;

/// Language detection and translation of blocks.
pub mod normalize;

/// Media and link deduplication.
pub mod resolver;

/// Content body assembly with media interleaving.
pub mod assembler;

/// Document structure validation.
pub mod validate;

/// Summary and keyword section updates.
pub mod markdown;

/// Document rendering.
pub mod render;

/// Page fetching.
pub mod fetch;

/// Image downloads and video snapshots.
pub mod media;

/// Output file naming.
pub mod output;

/// End-to-end conversion.
pub mod pipeline;

// Public API - re-exports
pub use assembler::{build_content_markdown, insertion_positions, media_lines};
pub use error::{Error, Result, ValidationError};
pub use extractor::{extract, extract_with_options};
pub use markdown::update_summary_and_keywords;
pub use options::{Options, ValidationOptions};
pub use pipeline::{run_pipeline, Pipeline};
pub use resolver::{unique_links, unique_media_links};
pub use result::{
    ContentBlock, ExtractedContent, MediaItem, MediaKind, RenderInput, SkillResult, Sources,
    SummaryResult, UNTITLED,
};
pub use topic::filter_by_topic;
pub use validate::validate_document;

/// Extract content from HTML bytes, decoding them first.
///
/// The charset comes from `content_type` (a `Content-Type` header value) when
/// given, else from the page's `<meta>` declaration, else UTF-8.
///
/// # Example
///
/// ```rust
/// use rs_html2md::extract_bytes;
///
/// let html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body><article><p>Caf\xE9</p></article></body></html>";
/// let content = extract_bytes(html, None, "https://example.com/");
/// assert_eq!(content.text_blocks[0].text, "Café");
/// ```
#[must_use]
pub fn extract_bytes(html: &[u8], content_type: Option<&str>, canonical_url: &str) -> ExtractedContent {
    let html = encoding::decode_html(html, content_type);
    extract(&html, canonical_url)
}
