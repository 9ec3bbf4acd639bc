//! Configuration options for the conversion pipeline and the validator.
//!
//! Both structs have public fields and a `Default` impl, so callers override
//! only what they need with struct-update syntax.

use std::time::Duration;

/// Configuration options for a conversion run.
///
/// # Example
///
/// ```rust
/// use rs_html2md::Options;
///
/// let options = Options {
///     topic: Some("rust async".to_string()),
///     skip_media: true,
///     ..Options::default()
/// };
/// assert_eq!(options.max_images, 20);
/// ```
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct Options {
    /// Keep only blocks mentioning any word of this topic.
    ///
    /// Default: `None`
    pub topic: Option<String>,

    /// Language blocks are normalized towards.
    ///
    /// Default: `"en"`
    pub target_language: String,

    /// Cap on images handed to the media fetcher (`0` = unlimited).
    ///
    /// Default: `20`
    pub max_images: usize,

    /// Cap on videos handed to the media fetcher (`0` = unlimited).
    ///
    /// Default: `5`
    pub max_videos: usize,

    /// Skip media acquisition entirely and reference remote URLs.
    ///
    /// Default: `false`
    pub skip_media: bool,

    /// Allow the headless browser render on 401/403 responses.
    ///
    /// Default: `false`
    pub use_headless: bool,

    /// Timeout for the page request.
    ///
    /// Default: 20 seconds
    pub fetch_timeout: Duration,

    /// Timeout for each image download.
    ///
    /// Default: 12 seconds
    pub media_timeout: Duration,

    /// Time budget for the headless render.
    ///
    /// Default: 30 seconds
    pub headless_timeout: Duration,

    /// Name of the assets subdirectory under the output directory.
    ///
    /// Default: `"media"`
    pub assets_dir_name: String,

    /// Use the readability tier when the primary extraction yields nothing.
    ///
    /// Requires `readability` feature flag.
    ///
    /// Default: `true`
    pub use_readability_fallback: bool,

    /// Minimum characters for the primary extraction to count as usable.
    ///
    /// Default: `1`
    pub min_extracted_len: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            topic: None,
            target_language: "en".to_string(),
            max_images: 20,
            max_videos: 5,
            skip_media: false,
            use_headless: false,
            fetch_timeout: Duration::from_secs(20),
            media_timeout: Duration::from_secs(12),
            headless_timeout: Duration::from_secs(30),
            assets_dir_name: "media".to_string(),
            use_readability_fallback: true,
            min_extracted_len: 1,
        }
    }
}

/// Bounds checked by [`crate::validate::validate_document`].
///
/// All ranges are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Default: `30`
    pub summary_min_words: usize,
    /// Default: `300`
    pub summary_max_words: usize,
    /// Default: `3`
    pub keywords_min: usize,
    /// Default: `10`
    pub keywords_max: usize,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            summary_min_words: 30,
            summary_max_words: 300,
            keywords_min: 3,
            keywords_max: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = Options::default();

        assert!(opts.topic.is_none());
        assert_eq!(opts.target_language, "en");
        assert_eq!(opts.max_images, 20);
        assert_eq!(opts.max_videos, 5);
        assert!(!opts.skip_media);
        assert!(!opts.use_headless);
        assert_eq!(opts.fetch_timeout, Duration::from_secs(20));
        assert_eq!(opts.media_timeout, Duration::from_secs(12));
        assert_eq!(opts.assets_dir_name, "media");
        assert!(opts.use_readability_fallback);
    }

    #[test]
    fn test_struct_update_syntax() {
        let opts = Options {
            max_images: 0,
            skip_media: true,
            ..Options::default()
        };

        assert_eq!(opts.max_images, 0);
        assert!(opts.skip_media);
        // Untouched fields keep their defaults
        assert_eq!(opts.max_videos, 5);
    }

    #[test]
    fn test_default_validation_bounds() {
        let opts = ValidationOptions::default();

        assert!(opts.summary_min_words <= opts.summary_max_words);
        assert!(opts.keywords_min <= opts.keywords_max);
        assert_eq!(opts.keywords_min, 3);
    }
}
