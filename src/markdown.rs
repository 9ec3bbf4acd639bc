//! Rewriting sections of a finished Markdown document.
//!
//! Conversion leaves the Summary and Keywords sections empty; they are filled
//! in afterwards from a [`SummaryResult`].

use crate::result::SummaryResult;
use crate::validate::{KEYWORDS_HEADING, SUMMARY_HEADING};

/// Replace the Summary and Keywords section bodies.
///
/// A section starts at its heading line, trailing whitespace ignored, and runs
/// until the next line starting with `## `. A missing section is appended at
/// the end after a blank line. The result is trimmed and ends with a single
/// newline.
///
/// # Examples
///
/// ```
/// use rs_html2md::update_summary_and_keywords;
///
/// let md = "# T\n\n## Summary\n\n## Keywords\n\n## Content\nBody\n";
/// let out = update_summary_and_keywords(md, "  Short summary. ", &["a".into(), "b".into()]);
///
/// assert_eq!(out, "# T\n\n## Summary\nShort summary.\n\n## Keywords\na, b\n\n## Content\nBody\n");
/// ```
#[must_use]
pub fn update_summary_and_keywords(markdown: &str, summary: &str, keywords: &[String]) -> String {
    let mut lines: Vec<String> = markdown.lines().map(str::to_string).collect();

    replace_section(&mut lines, SUMMARY_HEADING, summary.trim());
    replace_section(&mut lines, KEYWORDS_HEADING, &keywords.join(", "));

    let mut out = lines.join("\n").trim().to_string();
    out.push('\n');
    out
}

/// [`update_summary_and_keywords`] with both values taken from `result`.
#[must_use]
pub fn apply_summary(markdown: &str, result: &SummaryResult) -> String {
    update_summary_and_keywords(markdown, &result.summary, &result.keywords)
}

/// Swap the body of `heading` for `body`, leaving one blank line after it.
fn replace_section(lines: &mut Vec<String>, heading: &str, body: &str) {
    let block = [heading.to_string(), body.to_string()];

    let Some(start) = lines.iter().position(|l| l.trim_end() == heading) else {
        lines.push(String::new());
        lines.extend(block);
        return;
    };

    let end = lines
        .iter()
        .enumerate()
        .skip(start + 1)
        .find(|(_, line)| line.starts_with("## "))
        .map_or(lines.len(), |(idx, _)| idx);

    lines.splice(start..end, block.into_iter().chain(std::iter::once(String::new())));
}
