//! Media and link harvesting over the full page.
//!
//! Runs on the unmodified DOM, independent of which tier produced text.
//! References are resolved against the canonical URL but not filtered or
//! deduplicated here.

use dom_query::{Document, Selection};
use url::Url;

use crate::result::MediaItem;
use crate::url_utils::resolve_url;

/// Every image, video and anchor reference of a page, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarvestedMedia {
    pub images: Vec<MediaItem>,
    pub videos: Vec<MediaItem>,
    pub links: Vec<String>,
}

/// Collect `<img>`, `<video>` and `<a href>` references.
///
/// - images: `src`, or `data-src` when `src` is missing or empty
/// - videos: the element's own `src`, else its first `<source src>`
/// - links: every `href`, resolved, duplicates and any scheme kept
#[must_use]
pub fn harvest_media(doc: &Document, base: Option<&Url>) -> HarvestedMedia {
    let images = doc
        .select("img")
        .nodes()
        .iter()
        .filter_map(|node| {
            let img = Selection::from(*node);
            non_empty_attr(&img, "src").or_else(|| non_empty_attr(&img, "data-src"))
        })
        .map(|src| resolve_url(&src, base))
        .filter(|url| !url.is_empty())
        .map(MediaItem::image)
        .collect();

    let videos = doc
        .select("video")
        .nodes()
        .iter()
        .filter_map(|node| {
            let video = Selection::from(*node);
            non_empty_attr(&video, "src").or_else(|| {
                let source = video.select("source").first();
                non_empty_attr(&source, "src")
            })
        })
        .map(|src| resolve_url(&src, base))
        .filter(|url| !url.is_empty())
        .map(MediaItem::video)
        .collect();

    let links = doc
        .select("a[href]")
        .nodes()
        .iter()
        .filter_map(|node| non_empty_attr(&Selection::from(*node), "href"))
        .map(|href| resolve_url(&href, base))
        .filter(|url| !url.is_empty())
        .collect();

    HarvestedMedia { images, videos, links }
}

fn non_empty_attr(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
