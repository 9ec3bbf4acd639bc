//! Orchestration of a full conversion run.
//!
//! fetch -> extract -> topic filter -> normalize -> media -> assemble ->
//! render -> write `{stem}.md` and `{stem}.json`.
//!
//! Every collaborator is a trait object so any stage can be swapped out;
//! [`Pipeline::new`] wires up the defaults.

use std::fs;
use std::path::Path;

use chrono::Utc;
use tracing::{info, warn};

use crate::assembler::{build_content_markdown, media_lines};
use crate::extractor::extract_with_options;
use crate::fetch::{FetchedPage, Fetcher, HttpFetcher};
use crate::media::{capture_video_snapshots, download_images, HttpMediaFetcher, MediaFetcher};
use crate::normalize::{normalize_blocks, LanguageDetector, PassthroughTranslator, Translator, WhatlangDetector};
use crate::output::{build_output_basename, reserve_free_stem};
use crate::render::{MarkdownRenderer, Renderer};
use crate::result::{ExtractedContent, MediaItem, RenderInput, SkillResult, Sources};
use crate::topic::filter_by_topic;
use crate::{Options, Result};

const MARKDOWN_EXT: &str = ".md";
const METADATA_EXT: &str = ".json";

/// A configured conversion pipeline.
///
/// # Example
///
/// ```rust,no_run
/// use rs_html2md::{Options, Pipeline};
///
/// let pipeline = Pipeline::new(Options::default())?;
/// let result = pipeline.run("https://example.com/article", "out".as_ref())?;
/// println!("{}", result.markdown_path);
/// # Ok::<(), rs_html2md::Error>(())
/// ```
pub struct Pipeline {
    options: Options,
    fetcher: Box<dyn Fetcher>,
    detector: Box<dyn LanguageDetector>,
    translator: Box<dyn Translator>,
    renderer: Box<dyn Renderer>,
    /// `None` builds an [`HttpMediaFetcher`] for each run's assets directory.
    media_fetcher: Option<Box<dyn MediaFetcher>>,
    /// Fixed generation date, mainly for reproducible output.
    generated_date: Option<String>,
}

impl Pipeline {
    /// Pipeline with the default collaborators.
    pub fn new(options: Options) -> Result<Self> {
        let fetcher = HttpFetcher::new(&options)?;
        Ok(Self {
            options,
            fetcher: Box::new(fetcher),
            detector: Box::new(WhatlangDetector),
            translator: Box::new(PassthroughTranslator),
            renderer: Box::new(MarkdownRenderer),
            media_fetcher: None,
            generated_date: None,
        })
    }

    #[must_use]
    pub fn with_fetcher(mut self, fetcher: Box<dyn Fetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    #[must_use]
    pub fn with_detector(mut self, detector: Box<dyn LanguageDetector>) -> Self {
        self.detector = detector;
        self
    }

    #[must_use]
    pub fn with_translator(mut self, translator: Box<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }

    #[must_use]
    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    #[must_use]
    pub fn with_media_fetcher(mut self, media_fetcher: Box<dyn MediaFetcher>) -> Self {
        self.media_fetcher = Some(media_fetcher);
        self
    }

    /// Use `date` (`YYYY-MM-DD`) instead of today's UTC date.
    #[must_use]
    pub fn with_generated_date(mut self, date: impl Into<String>) -> Self {
        self.generated_date = Some(date.into());
        self
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Fetch `url` and convert it into `out_dir`.
    pub fn run(&self, url: &str, out_dir: &Path) -> Result<SkillResult> {
        info!(url, "fetching page");
        let page = self.fetcher.fetch(url)?;
        self.convert(&page, out_dir)
    }

    /// Convert an already fetched page into `out_dir`.
    pub fn convert(&self, page: &FetchedPage, out_dir: &Path) -> Result<SkillResult> {
        let options = &self.options;
        let assets_dir = out_dir.join(&options.assets_dir_name);
        fs::create_dir_all(&assets_dir)?;

        let extracted = extract_with_options(&page.html, &page.canonical_url, options);
        info!(
            title = %extracted.title,
            blocks = extracted.text_blocks.len(),
            images = extracted.images.len(),
            videos = extracted.videos.len(),
            "extracted page"
        );

        let blocks = filter_by_topic(&extracted.text_blocks, options.topic.as_deref());
        if blocks.len() != extracted.text_blocks.len() {
            info!(kept = blocks.len(), total = extracted.text_blocks.len(), "filtered by topic");
        }
        let blocks = normalize_blocks(
            &blocks,
            self.detector.as_ref(),
            self.translator.as_ref(),
            &options.target_language,
        );

        let (images, videos) = self.acquire_media(&extracted, &assets_dir)?;

        let generated_date = self
            .generated_date
            .clone()
            .unwrap_or_else(|| Utc::now().date_naive().format("%Y-%m-%d").to_string());
        let sources = Sources {
            url: extracted.canonical_url.clone(),
            publish_date: extracted.publish_date.clone().unwrap_or_default(),
            generated_date,
        };

        let paragraphs: Vec<String> = blocks.into_iter().map(|b| b.text).collect();
        let content_markdown =
            build_content_markdown(&paragraphs, &media_lines(&images, &videos), &extracted.links);

        let render_input = RenderInput {
            title: extracted.title.clone(),
            summary: String::new(),
            keywords: Vec::new(),
            sources,
            content_markdown,
            images,
            videos,
        };
        let markdown = self.renderer.render(&render_input);

        let base_name = build_output_basename(
            &extracted.title,
            &extracted.canonical_url,
            extracted.publish_date.as_deref(),
            &render_input.sources.generated_date,
        );
        let stem = reserve_free_stem(out_dir, &base_name, &[MARKDOWN_EXT, METADATA_EXT]);

        let markdown_path = out_dir.join(format!("{stem}{MARKDOWN_EXT}"));
        fs::write(&markdown_path, markdown)?;

        let metadata_path = out_dir.join(format!("{stem}{METADATA_EXT}"));
        fs::write(&metadata_path, serde_json::to_string_pretty(&extracted)?)?;

        info!(path = %markdown_path.display(), "wrote document");

        Ok(SkillResult {
            markdown_path: path_string(&markdown_path),
            assets_dir: path_string(&assets_dir),
            metadata_path: Some(path_string(&metadata_path)),
        })
    }

    /// Images and videos for rendering, fetched locally unless media is skipped.
    fn acquire_media(
        &self,
        extracted: &ExtractedContent,
        assets_dir: &Path,
    ) -> Result<(Vec<MediaItem>, Vec<MediaItem>)> {
        let options = &self.options;

        if options.skip_media {
            return Ok((extracted.images.clone(), extracted.videos.clone()));
        }

        let built;
        let fetcher: &dyn MediaFetcher = match &self.media_fetcher {
            Some(fetcher) => fetcher.as_ref(),
            None => {
                built = HttpMediaFetcher::new(assets_dir, options.media_timeout)?;
                &built
            }
        };

        let images = download_images(&extracted.images, fetcher, options.max_images);
        let videos = capture_video_snapshots(&extracted.videos, fetcher, options.max_videos);

        let missing = images.iter().filter(|i| i.local_path.is_none()).count()
            + videos.iter().filter(|v| v.snapshot_path.is_none()).count();
        if missing > 0 {
            warn!(missing, "some media kept remote URLs");
        }

        Ok((images, videos))
    }
}

/// Run a conversion with the default collaborators.
pub fn run_pipeline(url: &str, out_dir: &Path, options: Options) -> Result<SkillResult> {
    Pipeline::new(options)?.run(url, out_dir)
}

fn path_string(path: &Path) -> String {
    path.display().to_string()
}
