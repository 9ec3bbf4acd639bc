//! Readability fallback tier via `dom_smoothie`.
//!
//! Used when the primary tier finds no text. Its short title only fills a
//! title the primary tier left unset; the boilerplate-stripped article HTML
//! is flattened to newline-joined text.

use dom_query::{Document, NodeRef};
#[cfg(feature = "readability")]
use dom_query::Selection;

#[cfg(feature = "readability")]
use crate::{Error, Options, Result};

#[cfg(feature = "readability")]
use super::{ExtractionStrategy, TierOutput};
use super::content::block_lines;

/// CSS selector for social share plugin elements removed before Readability runs.
#[cfg(feature = "readability")]
static SHARE_PLUGIN_SELECTOR: &str = "[class*=\"dpsp-\"], [class*=\"wabtn\"], [class*=\"addtoany\"], \
    [class*=\"shareaholic\"], [class*=\"share-wrapper\"], [class*=\"social-share\"], \
    [class*=\"share-buttons\"], [id*=\"share-buttons\"], [class*=\"post-share\"], [class*=\"entry-share\"]";

/// Readability tier.
#[cfg(feature = "readability")]
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadabilityExtractor;

#[cfg(feature = "readability")]
impl ExtractionStrategy for ReadabilityExtractor {
    fn name(&self) -> &'static str {
        "readability"
    }

    fn extract(&self, html: &str, _options: &Options) -> Result<TierOutput> {
        use dom_smoothie::Readability;

        let doc = Document::from(html);
        remove_share_plugins(&doc);

        let mut reader = Readability::with_document(doc, None, None)
            .map_err(|e| Error::Extraction(e.to_string()))?;
        let article = reader.parse().map_err(|e| Error::Extraction(e.to_string()))?;

        let title = article.title.to_string();
        let title = title.trim();

        Ok(TierOutput {
            title: (!title.is_empty()).then(|| title.to_string()),
            text: html_to_text(&article.content),
            ..TierOutput::default()
        })
    }
}

/// Drop social share widgets in place.
#[cfg(feature = "readability")]
fn remove_share_plugins(doc: &Document) {
    let share_elements = doc.select(SHARE_PLUGIN_SELECTOR).nodes().to_vec();
    for node in share_elements.into_iter().rev() {
        Selection::from(node).remove();
    }
}

/// Flatten an HTML fragment to plain text, one line per block.
///
/// Every block is kept, repeated lines and link-only blocks included.
/// Fragments without block elements fall back to one line per text node.
#[must_use]
pub fn html_to_text(html: &str) -> String {
    let doc = Document::from(html);
    let body = doc.select("body");

    let lines = block_lines(&body, false);
    if !lines.is_empty() {
        return lines.join("\n");
    }

    body.nodes()
        .iter()
        .flat_map(NodeRef::descendants)
        .filter(NodeRef::is_text)
        .map(|n| n.text().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
