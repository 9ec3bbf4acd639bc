//! Command-line front end: convert a page, validate a document, or fill in
//! its summary and keywords.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;

use rs_html2md::{
    run_pipeline, update_summary_and_keywords, validate_document, Options, ValidationOptions,
};

#[derive(Parser, Debug)]
#[command(
    name = "html2md",
    version,
    about = "Turn a web page into a validated, self-contained Markdown document"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch a page and write `{stem}.md`, `{stem}.json` and a media directory
    Convert {
        /// Page URL
        #[arg(long)]
        url: String,

        /// Output directory
        #[arg(long)]
        out: PathBuf,

        /// Keep only paragraphs mentioning a word of this topic
        #[arg(long)]
        topic: Option<String>,

        /// Target language for block normalization
        #[arg(long, default_value = "en")]
        lang: String,

        /// Maximum images to download (0 = unlimited)
        #[arg(long, default_value_t = 20)]
        max_images: usize,

        /// Maximum videos to snapshot (0 = unlimited)
        #[arg(long, default_value_t = 5)]
        max_videos: usize,

        /// Reference remote media instead of downloading it
        #[arg(long)]
        no_media: bool,

        /// Try a headless browser render when the site refuses access
        #[arg(long)]
        headless: bool,
    },

    /// Check a document's section layout, summary length and keyword count
    Validate {
        /// Markdown file
        file: PathBuf,

        #[arg(long, default_value_t = 30)]
        summary_min: usize,

        #[arg(long, default_value_t = 300)]
        summary_max: usize,

        #[arg(long, default_value_t = 3)]
        keywords_min: usize,

        #[arg(long, default_value_t = 10)]
        keywords_max: usize,
    },

    /// Rewrite the Summary and Keywords sections of a document in place
    Update {
        /// Markdown file
        #[arg(long)]
        markdown: PathBuf,

        /// JSON object like {"summary": "..."}
        #[arg(long)]
        summary_json: String,

        /// JSON object like {"keywords": ["k1", "k2"]}
        #[arg(long)]
        keywords_json: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Commands::Convert {
            url,
            out,
            topic,
            lang,
            max_images,
            max_videos,
            no_media,
            headless,
        } => {
            let options = Options {
                topic: topic.filter(|t| !t.trim().is_empty()),
                target_language: lang,
                max_images,
                max_videos,
                skip_media: no_media,
                use_headless: headless,
                ..Options::default()
            };

            let result = run_pipeline(&url, &out, options)
                .with_context(|| format!("failed to convert {url}"))?;

            println!("{}", result.markdown_path);
            println!("{}", result.assets_dir);
            if let Some(metadata_path) = result.metadata_path {
                println!("{metadata_path}");
            }
        }

        Commands::Validate {
            file,
            summary_min,
            summary_max,
            keywords_min,
            keywords_max,
        } => {
            let markdown = fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let options = ValidationOptions {
                summary_min_words: summary_min,
                summary_max_words: summary_max,
                keywords_min,
                keywords_max,
            };

            validate_document(&markdown, &options)
                .with_context(|| format!("{} failed validation", file.display()))?;
            println!("{}: ok", file.display());
        }

        Commands::Update {
            markdown,
            summary_json,
            keywords_json,
        } => {
            let summary = parse_summary(&summary_json)?;
            let keywords = parse_keywords(&keywords_json)?;

            let document = fs::read_to_string(&markdown)
                .with_context(|| format!("failed to read {}", markdown.display()))?;
            let updated = update_summary_and_keywords(&document, &summary, &keywords);
            fs::write(&markdown, updated)
                .with_context(|| format!("failed to write {}", markdown.display()))?;
        }
    }

    Ok(())
}

/// `summary` field of the payload; absent means empty.
fn parse_summary(payload: &str) -> Result<String> {
    let value: Value = serde_json::from_str(payload).context("invalid summary JSON")?;
    match value.get("summary") {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.trim().to_string()),
        Some(other) => bail!("summary must be a string, got {other}"),
    }
}

/// `keywords` field of the payload; absent means none.
fn parse_keywords(payload: &str) -> Result<Vec<String>> {
    let value: Value = serde_json::from_str(payload).context("invalid keywords JSON")?;
    let keywords = match value.get("keywords") {
        None => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => bail!("keywords must be a list"),
    };

    Ok(keywords
        .iter()
        .map(|k| match k {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect())
}
