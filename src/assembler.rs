//! Assembly of the Markdown content body.
//!
//! Paragraphs come first and stay in order. Media lines are spread evenly
//! between them under a single `### Media` heading, and a `### Links` list
//! closes the body.

use std::collections::BTreeMap;

use crate::resolver::{unique_links, unique_media_links};
use crate::result::MediaItem;

pub const MEDIA_HEADING: &str = "### Media";
pub const LINKS_HEADING: &str = "### Links";

/// Paragraph index after which each media line goes.
///
/// Line `i` (1-based) of `m` lands after paragraph `floor(i * p / (m + 1))`.
/// Positions never decrease with `i` and stay within `0..p`. With more media
/// than paragraphs, several lines share a position.
///
/// Returns an empty list when either count is zero.
#[must_use]
pub fn insertion_positions(paragraphs: usize, media: usize) -> Vec<usize> {
    if paragraphs == 0 || media == 0 {
        return Vec::new();
    }
    (1..=media).map(|i| i * paragraphs / (media + 1)).collect()
}

/// Display lines for media: images first, then numbered video snapshots.
#[must_use]
pub fn media_lines(images: &[MediaItem], videos: &[MediaItem]) -> Vec<String> {
    let image_lines = unique_media_links(images)
        .into_iter()
        .map(|link| format!("![image]({link})"));

    let video_lines = unique_media_links(videos)
        .into_iter()
        .enumerate()
        .map(|(idx, link)| format!("![video snapshot {}]({link})", idx + 1));

    image_lines.chain(video_lines).collect()
}

/// Build the content body from paragraphs, media lines and raw links.
///
/// Blank paragraphs are ignored. Sections are joined with a blank line.
///
/// # Example
///
/// ```rust
/// use rs_html2md::build_content_markdown;
///
/// let paragraphs = vec!["A".to_string(), "B".to_string(), "C".to_string()];
/// let media = vec!["M1".to_string(), "M2".to_string()];
///
/// let body = build_content_markdown(&paragraphs, &media, &[]);
/// assert_eq!(body, "A\n\nB\n\n### Media\n\nM1\n\nC\n\nM2");
/// ```
#[must_use]
pub fn build_content_markdown(paragraphs: &[String], media: &[String], links: &[String]) -> String {
    let paragraphs: Vec<&str> = paragraphs
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect();

    let mut insertion_map: BTreeMap<usize, Vec<&str>> = BTreeMap::new();
    for (position, line) in insertion_positions(paragraphs.len(), media.len())
        .into_iter()
        .zip(media.iter().map(String::as_str))
    {
        insertion_map.entry(position).or_default().push(line);
    }

    let mut sections: Vec<&str> = Vec::new();
    let mut media_heading_added = false;

    for (idx, &paragraph) in paragraphs.iter().enumerate() {
        sections.push(paragraph);
        if let Some(lines) = insertion_map.get(&idx) {
            if !media_heading_added {
                sections.push(MEDIA_HEADING);
                media_heading_added = true;
            }
            sections.extend(lines.iter().copied());
        }
    }

    if paragraphs.is_empty() && !media.is_empty() {
        sections.push(MEDIA_HEADING);
        sections.extend(media.iter().map(String::as_str));
    }

    let link_lines: Vec<String> = unique_links(links)
        .into_iter()
        .map(|link| format!("- {link}"))
        .collect();
    if !link_lines.is_empty() {
        sections.push(LINKS_HEADING);
        sections.extend(link_lines.iter().map(String::as_str));
    }

    sections
        .into_iter()
        .filter(|s| !s.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}
