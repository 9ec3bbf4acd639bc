//! Content-focused extraction, the primary tier.
//!
//! Reads page metadata first, then strips chrome (scripts, navigation, asides,
//! boilerplate-classed containers), picks the most likely article container
//! and collects its block-level text one line per block. A JSON-LD
//! `articleBody` is used when the DOM yields nothing.

use dom_query::{Document, NodeRef, Selection};
use serde_json::Value;

use crate::metadata::extract_metadata;
use crate::patterns::{
    ADVERTISEMENT_CLASS, BOILERPLATE_CLASS, INLINE_WHITESPACE, LINE_WHITESPACE, NAVIGATION_CLASS,
};
use crate::{Options, Result};

use super::{ExtractionStrategy, TierOutput};

/// Elements never part of article text.
const CLEANING_SELECTOR: &str = "script, style, noscript, template, svg, canvas, iframe, \
     form, button, select, input, textarea, nav, aside, footer, header, menu, \
     [role='navigation'], [role='banner'], [role='contentinfo'], [aria-hidden='true'], \
     [hidden]";

/// Containers tried in order when looking for the article.
const CONTENT_SELECTORS: &[&str] = &[
    "article",
    "[itemprop='articleBody']",
    "main",
    "[role='main']",
    ".entry-content",
    ".post-content",
    ".article-content",
    ".article-body",
    "#content",
];

/// Elements whose text becomes one line each.
pub(crate) const BLOCK_SELECTOR: &str =
    "p, h1, h2, h3, h4, h5, h6, li, blockquote, pre, td, th, dt, dd, figcaption";

/// Structural elements never removed by class-based cleaning.
const PROTECTED_TAGS: &[&str] = &["html", "head", "body", "article", "main"];

/// Primary tier.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentExtractor;

impl ExtractionStrategy for ContentExtractor {
    fn name(&self) -> &'static str {
        "content"
    }

    fn extract(&self, html: &str, _options: &Options) -> Result<TierOutput> {
        let doc = Document::from(html);

        // Metadata and JSON-LD live in <head> and <script>, read before cleaning
        let metadata = extract_metadata(&doc);
        let article_body = extract_json_ld_article_body(&doc);

        clean_document(&doc);

        let root = find_content_root(&doc);
        let mut text = collect_block_text(&root);

        if text.is_empty() {
            text = collect_wild_text(&root);
        }
        if text.is_empty() {
            text = article_body.unwrap_or_default();
        }

        Ok(TierOutput {
            publish_date: metadata.publish_date(),
            title: metadata.title,
            author: metadata.author,
            text,
        })
    }
}

/// Remove page chrome in place.
pub fn clean_document(doc: &Document) {
    let discarded = doc.select(CLEANING_SELECTOR).nodes().to_vec();
    for node in discarded.into_iter().rev() {
        Selection::from(node).remove();
    }

    let classed = doc.select("[class], [id]").nodes().to_vec();
    for node in classed.into_iter().rev() {
        let sel = Selection::from(node);
        let tag = node.node_name().map(|t| t.to_ascii_lowercase()).unwrap_or_default();
        if PROTECTED_TAGS.contains(&tag.as_str()) {
            continue;
        }
        if is_boilerplate(&sel) {
            sel.remove();
        }
    }
}

/// Whether the element's class or id marks it as navigation, ads or boilerplate.
fn is_boilerplate(sel: &Selection) -> bool {
    let class = sel.attr("class").map(|c| c.to_string()).unwrap_or_default();
    let id = sel.attr("id").map(|i| i.to_string()).unwrap_or_default();

    class.split_whitespace().chain(std::iter::once(id.as_str())).any(|token| {
        !token.is_empty()
            && (NAVIGATION_CLASS.is_match(token)
                || ADVERTISEMENT_CLASS.is_match(token)
                || BOILERPLATE_CLASS.is_match(token))
    })
}

/// The first matching content container with text, else `<body>`.
fn find_content_root(doc: &Document) -> Selection<'_> {
    for selector in CONTENT_SELECTORS {
        let best = doc
            .select(selector)
            .nodes()
            .iter()
            .map(|node| (*node, text_length(&Selection::from(*node))))
            .filter(|(_, len)| *len > 0)
            .max_by_key(|(_, len)| *len);

        if let Some((node, _)) = best {
            return Selection::from(node);
        }
    }

    let body = doc.select("body");
    if body.length() > 0 {
        body
    } else {
        doc.select("html")
    }
}

/// One line per innermost block element, skipping link lists.
///
/// Consecutive duplicate lines are dropped.
pub(crate) fn collect_block_text(root: &Selection) -> String {
    let mut lines = block_lines(root, true);
    lines.dedup();
    lines.join("\n")
}

/// Text of every innermost block element under `root`, in document order.
///
/// Blank blocks are skipped; with `skip_link_lists` so are link-dense ones.
/// Repeated lines are kept.
pub(crate) fn block_lines(root: &Selection, skip_link_lists: bool) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    for node in root.select(BLOCK_SELECTOR).nodes() {
        let el = Selection::from(*node);

        // Outer blocks are covered by their inner ones
        if el.select(BLOCK_SELECTOR).length() > 0 {
            continue;
        }
        if skip_link_lists && link_density_test(&el) {
            continue;
        }

        let is_pre = node.node_name().is_some_and(|t| t.eq_ignore_ascii_case("pre"));
        let text = if is_pre {
            LINE_WHITESPACE.replace_all(el.text().as_ref(), "").trim().to_string()
        } else {
            collapse_whitespace(&el.text())
        };

        if !text.is_empty() {
            lines.push(text);
        }
    }

    lines
}

/// Text nodes outside any block element, one line each.
fn collect_wild_text(root: &Selection) -> String {
    let Some(root_node) = root.nodes().first() else {
        return String::new();
    };

    root_node
        .descendants()
        .into_iter()
        .filter(NodeRef::is_text)
        .map(|n| collapse_whitespace(&n.text()))
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check whether an element is mostly link text (menus, tag lists, "read more").
///
/// Short elements are judged by the share of link text and of short links;
/// a single long link covering nearly all the text also counts.
#[must_use]
pub fn link_density_test(element: &Selection) -> bool {
    let links = element.select("a");
    let n_links = links.length();

    if n_links == 0 {
        return false;
    }

    let text_length = text_length(element);

    if n_links == 1 {
        if let Some(link_node) = links.nodes().first() {
            let link_text_length = text_length_of(*link_node);
            if link_text_length > 100 && (link_text_length as f64) > (text_length as f64) * 0.9 {
                return true;
            }
        }
    }

    let has_next_sibling = element
        .nodes()
        .first()
        .and_then(NodeRef::next_element_sibling)
        .is_some();
    let is_paragraph = element
        .nodes()
        .first()
        .and_then(NodeRef::node_name)
        .is_some_and(|t| t.eq_ignore_ascii_case("p"));

    let limit_length: usize = if is_paragraph {
        if has_next_sibling { 30 } else { 60 }
    } else if has_next_sibling {
        100
    } else {
        300
    };

    if text_length >= limit_length {
        return false;
    }

    let (link_length, n_short_links, n_non_empty_links) = collect_link_info(&links);

    if n_non_empty_links == 0 {
        return true;
    }
    if (link_length as f64) > (text_length as f64) * 0.8 {
        return true;
    }

    n_non_empty_links > 1 && (n_short_links as f64) / (n_non_empty_links as f64) > 0.8
}

/// `(total_link_length, short_links, non_empty_links)`
fn collect_link_info(links: &Selection) -> (usize, usize, usize) {
    let mut link_length = 0;
    let mut n_short_links = 0;
    let mut n_non_empty_links = 0;

    for link in links.nodes() {
        let len = text_length_of(*link);
        if len == 0 {
            continue;
        }
        link_length += len;
        if len < 10 {
            n_short_links += 1;
        }
        n_non_empty_links += 1;
    }

    (link_length, n_short_links, n_non_empty_links)
}

/// `articleBody` from the first JSON-LD block carrying one.
///
/// HTML inside the value is flattened to block lines.
#[must_use]
pub fn extract_json_ld_article_body(doc: &Document) -> Option<String> {
    for script in doc.select(r#"script[type="application/ld+json"]"#).nodes() {
        let json_text = Selection::from(*script).text().trim().to_string();
        let Ok(data) = serde_json::from_str::<Value>(&json_text) else {
            continue;
        };

        let Some(body) = find_article_body(&data) else {
            continue;
        };
        let body = body.trim();
        if body.is_empty() {
            continue;
        }

        if body.contains("<p") {
            let fragment = Document::from(format!("<div>{body}</div>"));
            let text = collect_block_text(&fragment.select("div"));
            if !text.is_empty() {
                return Some(text);
            }
        }
        return Some(body.to_string());
    }

    None
}

/// Depth-first search for an `articleBody` string.
fn find_article_body(value: &Value) -> Option<&str> {
    match value {
        Value::Object(map) => map.iter().find_map(|(key, val)| {
            if key.eq_ignore_ascii_case("articlebody") {
                val.as_str()
            } else {
                find_article_body(val)
            }
        }),
        Value::Array(arr) => arr.iter().find_map(find_article_body),
        _ => None,
    }
}

fn collapse_whitespace(text: &str) -> String {
    let text = text.replace(['\n', '\r'], " ");
    INLINE_WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

fn text_length(sel: &Selection) -> usize {
    sel.text().trim().chars().count()
}

fn text_length_of(node: NodeRef) -> usize {
    node.text().trim().chars().count()
}
