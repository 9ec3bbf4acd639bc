//! Page metadata for the primary extraction tier.
//!
//! Title, author and publication date are looked up in three sources, each
//! filling only what the previous left empty:
//! 1. JSON-LD (Schema.org structured data)
//! 2. HTML meta tags (Open Graph, Twitter cards, Dublin Core, ...)
//! 3. DOM heuristics (`<h1>`, bylines, `<time>` elements, `<title>`)

pub mod dom_extraction;
pub mod json_ld;
pub mod meta_tags;

use chrono::{DateTime, Utc};
use dom_query::Document;

pub use dom_extraction::{examine_title_element, raw_title};
pub use meta_tags::{parse_meta_date, validate_metadata_name};

/// Metadata fields the pipeline cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

impl PageMetadata {
    /// Publication date in the `YYYY-MM-DD` form stored on extracted content.
    #[must_use]
    pub fn publish_date(&self) -> Option<String> {
        self.date.map(|d| d.format("%Y-%m-%d").to_string())
    }
}

/// Extract all metadata from a document.
#[must_use]
pub fn extract_metadata(doc: &Document) -> PageMetadata {
    let metadata = PageMetadata::default();

    let metadata = json_ld::extract_json_ld(doc, metadata);
    let metadata = meta_tags::examine_meta(doc, metadata);
    let metadata = dom_extraction::extract_dom_title(doc, metadata);
    let metadata = dom_extraction::extract_dom_author(doc, metadata);
    let metadata = dom_extraction::extract_dom_date(doc, metadata);

    post_process_metadata(metadata)
}

/// Trim text fields and drop the ones left empty.
fn post_process_metadata(metadata: PageMetadata) -> PageMetadata {
    fn clean(value: Option<String>) -> Option<String> {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    PageMetadata {
        title: clean(metadata.title),
        author: clean(metadata.author),
        date: metadata.date,
    }
}
