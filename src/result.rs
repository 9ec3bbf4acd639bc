//! Value records shared by every pipeline stage.
//!
//! Records are built once and never edited in place: stages that "change" a
//! record (topic filtering, language normalization, media acquisition) build a
//! new one from the old.

use serde::{Deserialize, Serialize};

/// Title used when no source yields one.
pub const UNTITLED: &str = "Untitled";

/// One line of extracted body text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Trimmed, non-empty text.
    pub text: String,

    /// Detected language tag, set by normalization.
    pub language: Option<String>,

    /// Relevance score, if a scorer assigned one.
    pub score: Option<f64>,
}

impl ContentBlock {
    /// Builds a block from raw text, or `None` when the text is blank.
    #[must_use]
    pub fn new(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            language: None,
            score: None,
        })
    }

    /// Returns a copy carrying `language` and `text`, keeping the score.
    #[must_use]
    pub fn normalized(&self, text: String, language: String) -> Self {
        Self {
            text,
            language: Some(language),
            score: self.score,
        }
    }
}

/// Kind of media reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// An image or video referenced by the page.
///
/// Identity is the resolved `url`. `local_path` and `snapshot_path` are filled
/// in by media acquisition; the remote `url` is kept either way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    #[serde(rename = "type")]
    pub kind: MediaKind,

    /// Absolute URL, resolved against the canonical page URL.
    pub url: String,

    /// Downloaded file, relative to the output directory.
    pub local_path: Option<String>,

    /// Captured keyframe, relative to the output directory.
    pub snapshot_path: Option<String>,
}

impl MediaItem {
    #[must_use]
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Image,
            url: url.into(),
            local_path: None,
            snapshot_path: None,
        }
    }

    #[must_use]
    pub fn video(url: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Video,
            url: url.into(),
            local_path: None,
            snapshot_path: None,
        }
    }

    /// Returns a copy with `local_path` set.
    #[must_use]
    pub fn with_local_path(&self, path: impl Into<String>) -> Self {
        Self {
            local_path: Some(path.into()),
            ..self.clone()
        }
    }

    /// Returns a copy with `snapshot_path` set.
    #[must_use]
    pub fn with_snapshot_path(&self, path: impl Into<String>) -> Self {
        Self {
            snapshot_path: Some(path.into()),
            ..self.clone()
        }
    }
}

/// Everything the extractor pulls out of one page.
///
/// `title` is never empty; it falls back to [`UNTITLED`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedContent {
    pub title: String,
    pub author: Option<String>,
    /// Publication date as `YYYY-MM-DD`.
    pub publish_date: Option<String>,
    pub canonical_url: String,
    pub text_blocks: Vec<ContentBlock>,
    pub images: Vec<MediaItem>,
    pub videos: Vec<MediaItem>,
    /// Raw resolved hrefs; duplicates and non-http schemes included.
    pub links: Vec<String>,
}

/// Provenance shown in the Sources section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sources {
    pub url: String,
    /// Empty when the page has no publication date.
    pub publish_date: String,
    pub generated_date: String,
}

/// The record handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderInput {
    pub title: String,
    pub summary: String,
    pub keywords: Vec<String>,
    pub sources: Sources,
    /// Assembled body (paragraphs, interleaved media, links).
    pub content_markdown: String,
    pub images: Vec<MediaItem>,
    pub videos: Vec<MediaItem>,
}

/// Summary and keywords produced after conversion, used to fill the
/// corresponding sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Where a run wrote its outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillResult {
    pub markdown_path: String,
    pub assets_dir: String,
    pub metadata_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_block_rejects_blank_text() {
        assert!(ContentBlock::new("   \t ").is_none());
        assert!(ContentBlock::new("").is_none());
    }

    #[test]
    fn test_content_block_trims() {
        let block = ContentBlock::new("  hello  ");
        assert_eq!(block.map(|b| b.text), Some("hello".to_string()));
    }

    #[test]
    fn test_normalized_keeps_score() {
        let block = ContentBlock {
            text: "Bonjour".to_string(),
            language: None,
            score: Some(0.5),
        };
        let out = block.normalized("Bonjour".to_string(), "fr".to_string());

        assert_eq!(out.language.as_deref(), Some("fr"));
        assert_eq!(out.score, Some(0.5));
        // Original untouched
        assert!(block.language.is_none());
    }

    #[test]
    fn test_media_item_updates_build_new_records() {
        let item = MediaItem::image("https://example.com/a.png");
        let fetched = item.with_local_path("media/image-1.png");

        assert!(item.local_path.is_none());
        assert_eq!(fetched.local_path.as_deref(), Some("media/image-1.png"));
        assert_eq!(fetched.url, item.url);
    }

    #[test]
    fn test_media_item_serializes_kind_as_type() {
        let item = MediaItem::video("https://example.com/v.mp4");
        let json = serde_json::to_value(&item).unwrap_or_default();

        assert_eq!(json["type"], "video");
        assert_eq!(json["url"], "https://example.com/v.mp4");
    }

    #[test]
    fn test_summary_result_defaults_missing_fields() {
        let parsed: SummaryResult = serde_json::from_str(r#"{"summary": "Short."}"#).unwrap_or_default();
        assert_eq!(parsed.summary, "Short.");
        assert!(parsed.keywords.is_empty());
    }
}
