//! DOM-based Metadata Extraction
//!
//! Fallback lookups in the document body when structured data and meta tags
//! are silent.

use dom_query::{Document, Selection};
use regex::Regex;
use std::sync::LazyLock;

use super::meta_tags::{parse_meta_date, validate_metadata_name};
use super::PageMetadata;

/// Separators between an article title and the site name in `<title>`.
#[allow(clippy::expect_used)]
static TITLE_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*[\|–—·]\s*|\s+-\s+|\s*:\s+").expect("valid regex")
});

/// Email addresses and social handles inside bylines.
#[allow(clippy::expect_used)]
static BYLINE_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+|@\w+").expect("valid regex"));

const AUTHOR_SELECTORS: &[&str] = &[
    "[rel='author']",
    "[itemprop='author'] [itemprop='name']",
    "[itemprop='author']",
    "[class*='byline'] [class*='author']",
    "[class*='author-name']",
    "[class*='byline']",
    ".author",
];

const DATE_SELECTORS: &[&str] = &[
    "[itemprop='datePublished']",
    "[class*='publish-date']",
    "[class*='date-publish']",
    "[class*='post-date']",
    "[class*='entry-date']",
    "[class*='article-date']",
];

/// Trimmed text of the `<title>` element, exactly as written.
#[must_use]
pub fn raw_title(doc: &Document) -> Option<String> {
    let title = doc.select("title").first().text().trim().to_string();
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

/// `<title>` text with a trailing or leading site name split off.
///
/// Keeps the longest separator-delimited part when it is substantial,
/// otherwise the full title.
#[must_use]
pub fn examine_title_element(doc: &Document) -> Option<String> {
    let title = raw_title(doc)?;

    let longest = TITLE_SEPARATOR
        .split(&title)
        .map(str::trim)
        .max_by_key(|part| part.chars().count())
        .unwrap_or("");

    if longest.chars().count() > 10 && longest != title {
        return Some(longest.to_string());
    }

    Some(title)
}

/// Title from the first reasonable `<h1>`, then from `<title>`.
#[must_use]
pub fn extract_dom_title(doc: &Document, original: PageMetadata) -> PageMetadata {
    let mut result = original;

    if result.title.is_some() {
        return result;
    }

    for node in doc.select("h1").nodes() {
        let text = normalize_space(&Selection::from(*node).text());
        let len = text.chars().count();
        if len > 5 && len < 200 {
            result.title = Some(text);
            return result;
        }
    }

    result.title = examine_title_element(doc);
    result
}

/// Author from byline-like elements.
#[must_use]
pub fn extract_dom_author(doc: &Document, original: PageMetadata) -> PageMetadata {
    let mut result = original;

    if result.author.is_some() {
        return result;
    }

    for selector in AUTHOR_SELECTORS {
        for node in doc.select(selector).nodes().iter().take(3) {
            let text = clean_byline(&Selection::from(*node).text());
            if validate_metadata_name(&text) {
                result.author = Some(text);
                return result;
            }
        }
    }

    result
}

/// Date from `<time>` elements and date-classed elements.
#[must_use]
pub fn extract_dom_date(doc: &Document, original: PageMetadata) -> PageMetadata {
    let mut result = original;

    if result.date.is_some() {
        return result;
    }

    let candidates = DATE_SELECTORS.iter().copied().chain(std::iter::once("time"));
    for selector in std::iter::once("time[datetime]").chain(candidates) {
        for node in doc.select(selector).nodes().iter().take(3) {
            let el = Selection::from(*node);
            let text = el.text().trim().to_string();

            let found = el
                .attr("datetime")
                .and_then(|v| parse_meta_date(&v))
                .or_else(|| el.attr("content").and_then(|v| parse_meta_date(&v)))
                .or_else(|| {
                    if text.is_empty() || text.chars().count() >= 100 {
                        None
                    } else {
                        parse_meta_date(&text)
                    }
                });

            if found.is_some() {
                result.date = found;
                return result;
            }
        }
    }

    result
}

/// Strip "By", emails and handles from a byline.
fn clean_byline(text: &str) -> String {
    let text = normalize_space(text);
    let text = ["By ", "by ", "BY ", "Written by ", "written by "]
        .iter()
        .find_map(|prefix| text.strip_prefix(prefix))
        .unwrap_or(&text);
    normalize_space(&BYLINE_NOISE.replace_all(text, ""))
}

fn normalize_space(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
