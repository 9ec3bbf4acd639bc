//! Media and outbound link selection.
//!
//! Both passes keep input order and let the first occurrence win. They look
//! only at the references themselves, not at whether a download succeeded.

use std::collections::HashSet;

use crate::result::{MediaItem, MediaKind};
use crate::url_utils::{is_http_scheme, scheme};

/// Tracking-pixel marker excluded from media.
const TRACKER_MARKER: &str = "adsct";

/// The reference a media item should be displayed with.
///
/// Local copies win over the remote URL: the downloaded file for images, the
/// captured keyframe for videos.
#[must_use]
pub fn preferred_link(item: &MediaItem) -> &str {
    let local = match item.kind {
        MediaKind::Image => item.local_path.as_deref(),
        MediaKind::Video => item.snapshot_path.as_deref(),
    };
    local.filter(|l| !l.is_empty()).unwrap_or(&item.url)
}

/// Distinct display links for a list of media items.
///
/// `data:` URIs and tracker references are dropped. Running the output back
/// through the same selection changes nothing.
#[must_use]
pub fn unique_media_links(items: &[MediaItem]) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .map(preferred_link)
        .filter(|link| !link.is_empty())
        .filter(|link| scheme(link).as_deref() != Some("data"))
        .filter(|link| !link.contains(TRACKER_MARKER))
        .filter(|link| seen.insert(*link))
        .map(str::to_string)
        .collect()
}

/// Distinct http(s) links, compared by exact string.
#[must_use]
pub fn unique_links(links: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    links
        .iter()
        .filter(|link| is_http_scheme(link))
        .filter(|link| seen.insert(link.as_str()))
        .cloned()
        .collect()
}
