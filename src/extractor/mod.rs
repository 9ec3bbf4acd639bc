//! Page extraction: text, metadata, media references and links.
//!
//! Body text comes from an ordered list of tiers, each returning its own
//! [`TierOutput`]. The first tier that yields text wins; earlier tiers still
//! contribute metadata. A tier that fails is logged and skipped.
//!
//! # Module Structure
//!
//! - `content`: content-focused heuristic extraction (primary tier)
//! - `fallback`: readability extraction via `dom_smoothie` (needs the `readability` feature)
//! - `media`: `<img>`, `<video>` and `<a>` harvesting over the whole page
//!
//! Media and links are harvested from the full DOM whether or not any tier
//! produced text.

pub mod content;
pub mod fallback;
pub mod media;

use dom_query::Document;
use tracing::debug;
use url::Url;

use crate::metadata::raw_title;
use crate::result::{ContentBlock, ExtractedContent, UNTITLED};
use crate::{Options, Result};

pub use content::ContentExtractor;
#[cfg(feature = "readability")]
pub use fallback::ReadabilityExtractor;
pub use media::{harvest_media, HarvestedMedia};

/// What a single extraction tier found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierOutput {
    pub title: Option<String>,
    pub author: Option<String>,
    /// `YYYY-MM-DD`
    pub publish_date: Option<String>,
    /// Newline-separated body text; empty when the tier found nothing.
    pub text: String,
}

/// One way of getting body text out of a page.
pub trait ExtractionStrategy {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Run the tier on raw HTML.
    ///
    /// Each tier parses its own copy of the page, so tiers that prune the DOM
    /// do not affect one another.
    fn extract(&self, html: &str, options: &Options) -> Result<TierOutput>;
}

/// Tiers tried in order for the given options.
#[must_use]
pub fn strategies(options: &Options) -> Vec<Box<dyn ExtractionStrategy>> {
    let mut tiers: Vec<Box<dyn ExtractionStrategy>> = vec![Box::new(ContentExtractor)];

    #[cfg(feature = "readability")]
    {
        if options.use_readability_fallback {
            tiers.push(Box::new(ReadabilityExtractor));
        }
    }

    #[cfg(not(feature = "readability"))]
    let _ = options;

    tiers
}

/// Extract content from `html` with default options.
///
/// # Example
///
/// ```rust
/// use rs_html2md::extract;
///
/// let html = r#"<html><head><title>Notes</title></head>
/// <body><article><p>First line.</p><p>Second line.</p>
/// <img src="/a.png"></article></body></html>"#;
///
/// let content = extract(html, "https://example.com/post");
/// assert_eq!(content.text_blocks.len(), 2);
/// assert_eq!(content.images[0].url, "https://example.com/a.png");
/// ```
#[must_use]
pub fn extract(html: &str, canonical_url: &str) -> ExtractedContent {
    extract_with_options(html, canonical_url, &Options::default())
}

/// Extract content from `html` using the tiers selected by `options`.
///
/// Never fails: a page nothing can be extracted from yields no text blocks
/// and the [`UNTITLED`] title.
#[must_use]
pub fn extract_with_options(html: &str, canonical_url: &str, options: &Options) -> ExtractedContent {
    let mut found = TierOutput::default();

    for tier in strategies(options) {
        match tier.extract(html, options) {
            Ok(output) => {
                found.title = found.title.or(output.title);
                found.author = found.author.or(output.author);
                found.publish_date = found.publish_date.or(output.publish_date);

                if output.text.trim().chars().count() >= options.min_extracted_len.max(1) {
                    debug!(tier = tier.name(), chars = output.text.len(), "tier produced text");
                    found.text = output.text;
                    break;
                }
                debug!(tier = tier.name(), "tier produced no text");
            }
            Err(e) => debug!(tier = tier.name(), error = %e, "tier failed"),
        }
    }

    let doc = Document::from(html);

    let title = found
        .title
        .filter(|t| !t.trim().is_empty())
        .or_else(|| raw_title(&doc))
        .unwrap_or_else(|| UNTITLED.to_string());

    let text_blocks: Vec<ContentBlock> = found.text.lines().filter_map(ContentBlock::new).collect();

    let base = Url::parse(canonical_url).ok();
    let HarvestedMedia { images, videos, links } = harvest_media(&doc, base.as_ref());

    ExtractedContent {
        title,
        author: found.author,
        publish_date: found.publish_date,
        canonical_url: canonical_url.to_string(),
        text_blocks,
        images,
        videos,
        links,
    }
}
