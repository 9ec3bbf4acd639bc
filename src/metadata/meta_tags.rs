//! HTML Meta Tag Extraction
//!
//! Title, author and date from `<meta>` tags: standard names, Open Graph,
//! Twitter cards, Dublin Core and a few CMS-specific variants.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use dom_query::{Document, Selection};

use super::PageMetadata;

/// Date layouts tried after RFC 3339.
const DATE_FORMATS: &[&str] = &[
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Fill missing fields from `<meta>` tags, first match per field wins.
#[must_use]
pub fn examine_meta(doc: &Document, original: PageMetadata) -> PageMetadata {
    let mut result = original;

    for node in doc.select("meta").nodes() {
        let meta = Selection::from(*node);

        let name = meta
            .attr("name")
            .or_else(|| meta.attr("property"))
            .or_else(|| meta.attr("itemprop"))
            .map(|n| n.to_lowercase())
            .unwrap_or_default();
        let content = meta.attr("content").map(|c| c.trim().to_string()).unwrap_or_default();

        if name.is_empty() || content.is_empty() {
            continue;
        }

        match name.as_str() {
            "og:title" | "twitter:title" | "dc.title" | "sailthru.title" | "parsely-title"
            | "title" => {
                if result.title.is_none() {
                    result.title = Some(content);
                }
            }

            "author" | "article:author" | "dc.creator" | "byl" | "sailthru.author"
            | "parsely-author" => {
                if result.author.is_none() && validate_metadata_name(&content) {
                    result.author = Some(content);
                }
            }

            "article:published_time" | "og:article:published_time" | "article:published"
            | "date" | "dc.date" | "dc.date.issued" | "dcterms.date" | "dcterms.created"
            | "datepublished" | "sailthru.date" | "parsely-pub-date" | "pubdate"
            | "publish_date" | "publishdate" => {
                if result.date.is_none() {
                    result.date = parse_meta_date(&content);
                }
            }

            _ => {}
        }
    }

    result
}

/// Whether a string plausibly names a person rather than a URL, handle or id.
#[must_use]
pub fn validate_metadata_name(name: &str) -> bool {
    let name = name.trim();

    if name.len() < 2 || name.len() > 120 {
        return false;
    }

    // Long single tokens are slugs or ids
    if name.len() > 20 && !name.contains(' ') {
        return false;
    }

    let lower = name.to_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("www.") {
        return false;
    }
    if [".com", ".org", ".net"].iter().any(|tld| lower.contains(tld)) {
        return false;
    }
    if name.starts_with('{') || name.starts_with('[') {
        return false;
    }

    let digits = name.chars().filter(char::is_ascii_digit).count();
    let specials = name
        .chars()
        .filter(|c| !c.is_alphanumeric() && !c.is_whitespace() && !matches!(c, '-' | '\'' | '.'))
        .count();

    digits <= 3 && specials <= 2
}

/// Parse a date string from meta tags or DOM elements.
///
/// Supports RFC 3339, ISO 8601 without zone, plain dates and a handful of
/// written-out formats.
#[must_use]
pub fn parse_meta_date(date_str: &str) -> Option<DateTime<Utc>> {
    let date_str = date_str.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc());
    }

    // Date-only prefix of a longer ISO-like string ("2024-01-15 10:00", "2024-01-15T10:00+0100")
    if let Some(prefix) = date_str.get(..10) {
        if let Ok(date) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    DATE_FORMATS.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(date_str, fmt)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    })
}
