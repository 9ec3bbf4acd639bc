//! Block-level topic filtering.

use crate::patterns::NON_WORD;
use crate::result::ContentBlock;

/// Keep blocks that mention any word of `topic`.
///
/// The topic is split on non-word characters and lower-cased; a block matches
/// when its lower-cased text contains any token as a substring. A missing or
/// token-less topic leaves the list unchanged, and so does a topic that would
/// filter out every block.
///
/// # Example
///
/// ```rust
/// use rs_html2md::{filter_by_topic, ContentBlock};
///
/// let blocks: Vec<ContentBlock> = ["Tokio runtime", "Weather today"]
///     .iter()
///     .filter_map(|t| ContentBlock::new(t))
///     .collect();
///
/// let kept = filter_by_topic(&blocks, Some("async tokio"));
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept[0].text, "Tokio runtime");
/// ```
#[must_use]
pub fn filter_by_topic(blocks: &[ContentBlock], topic: Option<&str>) -> Vec<ContentBlock> {
    let tokens = topic.map(topic_tokens).unwrap_or_default();
    if tokens.is_empty() {
        return blocks.to_vec();
    }

    let kept: Vec<ContentBlock> = blocks
        .iter()
        .filter(|block| {
            let text = block.text.to_lowercase();
            tokens.iter().any(|token| text.contains(token.as_str()))
        })
        .cloned()
        .collect();

    if kept.is_empty() {
        blocks.to_vec()
    } else {
        kept
    }
}

/// Lower-cased word tokens of a topic string.
#[must_use]
pub fn topic_tokens(topic: &str) -> Vec<String> {
    NON_WORD
        .split(&topic.to_lowercase())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
