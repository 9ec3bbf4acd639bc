//! Rendering a [`RenderInput`] into the final document.

use std::fmt::Write as _;

use crate::result::RenderInput;
use crate::validate::{CONTENT_HEADING, KEYWORDS_HEADING, SOURCES_HEADING, SUMMARY_HEADING};

/// Turns a render record into a finished document.
pub trait Renderer {
    fn render(&self, input: &RenderInput) -> String;
}

/// Fixed-template Markdown renderer.
///
/// ```text
/// # {title}
///
/// ## Sources
/// - Source URL: {url}
/// - Publish Date: {publish_date}      (omitted when empty)
/// - Generated Date: {generated_date}
///
/// ## Summary
/// {summary}
///
/// ## Keywords
/// {keywords, comma separated}
///
/// ## Content
/// {content}
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, input: &RenderInput) -> String {
        let sources = &input.sources;
        let mut out = String::new();

        let _ = writeln!(out, "# {}", input.title.trim());
        let _ = writeln!(out);
        let _ = writeln!(out, "{SOURCES_HEADING}");
        let _ = writeln!(out, "- Source URL: {}", sources.url);
        if !sources.publish_date.is_empty() {
            let _ = writeln!(out, "- Publish Date: {}", sources.publish_date);
        }
        let _ = writeln!(out, "- Generated Date: {}", sources.generated_date);
        let _ = writeln!(out);
        let _ = writeln!(out, "{SUMMARY_HEADING}");
        let _ = writeln!(out, "{}", input.summary.trim());
        let _ = writeln!(out);
        let _ = writeln!(out, "{KEYWORDS_HEADING}");
        let _ = writeln!(out, "{}", input.keywords.join(", "));
        let _ = writeln!(out);
        let _ = writeln!(out, "{CONTENT_HEADING}");
        let _ = writeln!(out, "{}", input.content_markdown.trim());

        let mut out = out.trim_end().to_string();
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::Sources;

    fn input(publish_date: &str) -> RenderInput {
        RenderInput {
            title: "A Title".to_string(),
            summary: String::new(),
            keywords: Vec::new(),
            sources: Sources {
                url: "https://example.com/a".to_string(),
                publish_date: publish_date.to_string(),
                generated_date: "2024-06-01".to_string(),
            },
            content_markdown: "Para one\n\nPara two".to_string(),
            images: Vec::new(),
            videos: Vec::new(),
        }
    }

    #[test]
    fn test_render_layout() {
        let md = MarkdownRenderer.render(&input("2024-05-01"));
        assert_eq!(
            md,
            "# A Title\n\n## Sources\n- Source URL: https://example.com/a\n- Publish Date: 2024-05-01\n\
             - Generated Date: 2024-06-01\n\n## Summary\n\n\n## Keywords\n\n\n## Content\nPara one\n\nPara two\n"
        );
    }

    #[test]
    fn test_publish_date_line_omitted_when_empty() {
        let md = MarkdownRenderer.render(&input(""));
        assert!(!md.contains("Publish Date"));
        assert!(md.contains("- Generated Date: 2024-06-01"));
    }

    #[test]
    fn test_keywords_joined() {
        let mut record = input("");
        record.keywords = vec!["rust".to_string(), "html".to_string()];
        let md = MarkdownRenderer.render(&record);
        assert!(md.contains("## Keywords\nrust, html\n"));
    }
}
