//! Structural validation of finished documents.
//!
//! A document needs, in this order: a `# ` title line, then `## Sources`,
//! `## Summary`, `## Keywords` and `## Content` headings. Headings only count
//! at the start of a line. The summary and keyword sections must also fit the
//! configured size bounds, and Sources must name the URL and a date.

use crate::error::ValidationError;
use crate::options::ValidationOptions;
use crate::patterns::WORD;

pub const TITLE_MARKER: &str = "# ";
pub const SOURCES_HEADING: &str = "## Sources";
pub const SUMMARY_HEADING: &str = "## Summary";
pub const KEYWORDS_HEADING: &str = "## Keywords";
pub const CONTENT_HEADING: &str = "## Content";

/// Required headings in document order.
pub const REQUIRED_SECTIONS: [&str; 5] = [
    TITLE_MARKER,
    SOURCES_HEADING,
    SUMMARY_HEADING,
    KEYWORDS_HEADING,
    CONTENT_HEADING,
];

/// Check a finished document against the layout and size rules.
///
/// Checks run in a fixed order and the first failure is returned: missing
/// heading, heading order, summary length, keyword count, Sources fields.
///
/// # Example
///
/// ```rust
/// use rs_html2md::{validate_document, ValidationError, ValidationOptions};
///
/// let doc = "# T\n\n## Sources\n- Source URL: u\n- Generated Date: d\n\n\
///            ### Summary\none two three\n\n## Keywords\na, b, c\n\n## Content\nBody\n";
/// let bounds = ValidationOptions { summary_min_words: 1, ..ValidationOptions::default() };
///
/// assert!(validate_document(doc, &bounds).is_ok());
/// assert_eq!(
///     validate_document("# T\n", &bounds),
///     Err(ValidationError::MissingSection { section: "## Sources".to_string() })
/// );
/// ```
pub fn validate_document(markdown: &str, options: &ValidationOptions) -> Result<(), ValidationError> {
    let mut positions = Vec::with_capacity(REQUIRED_SECTIONS.len());
    for section in REQUIRED_SECTIONS {
        let position = find_heading(markdown, section).ok_or_else(|| ValidationError::MissingSection {
            section: section.to_string(),
        })?;
        positions.push(position);
    }

    if !positions.windows(2).all(|w| w[0] <= w[1]) {
        return Err(ValidationError::SectionOrder);
    }

    let summary = extract_section(markdown, SUMMARY_HEADING, KEYWORDS_HEADING);
    let words = WORD.find_iter(summary).count();
    if words < options.summary_min_words || words > options.summary_max_words {
        return Err(ValidationError::SummaryLength {
            words,
            min: options.summary_min_words,
            max: options.summary_max_words,
        });
    }

    let count = split_keywords(extract_section(markdown, KEYWORDS_HEADING, CONTENT_HEADING)).len();
    if count < options.keywords_min || count > options.keywords_max {
        return Err(ValidationError::KeywordCount {
            count,
            min: options.keywords_min,
            max: options.keywords_max,
        });
    }

    let sources = extract_section(markdown, SOURCES_HEADING, SUMMARY_HEADING);
    if !sources.contains("Source URL") {
        return Err(ValidationError::MissingMetadata {
            field: "Source URL".to_string(),
        });
    }
    if !sources.contains("Publish Date") && !sources.contains("Generated Date") {
        return Err(ValidationError::MissingMetadata {
            field: "Publish Date or Generated Date".to_string(),
        });
    }

    Ok(())
}

/// Byte offset of the first line carrying `marker`.
///
/// A marker ending in a space (the title) matches as a line prefix; other
/// markers must make up the whole line apart from trailing whitespace.
#[must_use]
pub fn find_heading(markdown: &str, marker: &str) -> Option<usize> {
    let mut offset = 0;
    for line in markdown.split_inclusive('\n') {
        let matched = if marker.ends_with(' ') {
            line.starts_with(marker)
        } else {
            line.trim_end() == marker
        };
        if matched {
            return Some(offset);
        }
        offset += line.len();
    }
    None
}

/// Trimmed text between the `start` heading line and the `end` heading.
///
/// Empty when either heading is missing or `end` comes first.
#[must_use]
pub fn extract_section<'a>(markdown: &'a str, start: &str, end: &str) -> &'a str {
    let (Some(start_idx), Some(end_idx)) = (find_heading(markdown, start), find_heading(markdown, end)) else {
        return "";
    };
    markdown
        .get(start_idx + start.len()..end_idx)
        .map_or("", str::trim)
}

/// Comma-separated keywords, trimmed, empties dropped.
#[must_use]
pub fn split_keywords(text: &str) -> Vec<&str> {
    text.split(',').map(str::trim).filter(|k| !k.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(summary: &str, keywords: &str) -> String {
        format!(
            "# Title\n\n## Sources\n- Source URL: https://e.com\n- Generated Date: 2024-01-01\n\n\
             ## Summary\n{summary}\n\n## Keywords\n{keywords}\n\n## Content\nBody text\n"
        )
    }

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_valid_document() {
        let md = doc(&words(40), "a, b, c");
        assert_eq!(validate_document(&md, &ValidationOptions::default()), Ok(()));
    }

    #[test]
    fn test_missing_section() {
        let md = doc(&words(40), "a, b, c").replace("## Keywords\n", "");
        assert_eq!(
            validate_document(&md, &ValidationOptions::default()),
            Err(ValidationError::MissingSection {
                section: KEYWORDS_HEADING.to_string()
            })
        );
    }

    #[test]
    fn test_any_swapped_pair_is_rejected() {
        let base = doc(&words(40), "a, b, c");
        let headings = &REQUIRED_SECTIONS[1..];
        for i in 0..headings.len() {
            for j in (i + 1)..headings.len() {
                let swapped = base
                    .replace(headings[i], "@@A@@")
                    .replace(headings[j], headings[i])
                    .replace("@@A@@", headings[j]);
                assert!(
                    validate_document(&swapped, &ValidationOptions::default()).is_err(),
                    "swap {} and {}",
                    headings[i],
                    headings[j]
                );
            }
        }
    }

    #[test]
    fn test_title_after_sources_is_out_of_order() {
        let md = doc(&words(40), "a, b, c").replacen("# Title\n\n", "", 1) + "# Late title\n";
        assert_eq!(
            validate_document(&md, &ValidationOptions::default()),
            Err(ValidationError::SectionOrder)
        );
    }

    #[test]
    fn test_summary_bounds_are_inclusive() {
        let opts = ValidationOptions::default();
        assert!(validate_document(&doc(&words(30), "a, b, c"), &opts).is_ok());
        assert!(validate_document(&doc(&words(300), "a, b, c"), &opts).is_ok());
        assert_eq!(
            validate_document(&doc(&words(29), "a, b, c"), &opts),
            Err(ValidationError::SummaryLength { words: 29, min: 30, max: 300 })
        );
        assert!(validate_document(&doc(&words(301), "a, b, c"), &opts).is_err());
    }

    #[test]
    fn test_empty_summary_fails_by_default() {
        let md = doc("", "a, b, c");
        assert!(matches!(
            validate_document(&md, &ValidationOptions::default()),
            Err(ValidationError::SummaryLength { words: 0, .. })
        ));
    }

    #[test]
    fn test_keyword_count() {
        let opts = ValidationOptions::default();
        assert_eq!(
            validate_document(&doc(&words(40), "a, , b"), &opts),
            Err(ValidationError::KeywordCount { count: 2, min: 3, max: 10 })
        );
        let eleven = (0..11).map(|i| format!("k{i}")).collect::<Vec<_>>().join(", ");
        assert!(validate_document(&doc(&words(40), &eleven), &opts).is_err());
    }

    #[test]
    fn test_sources_fields() {
        let opts = ValidationOptions::default();
        let no_url = doc(&words(40), "a, b, c").replace("Source URL", "Origin");
        assert!(matches!(
            validate_document(&no_url, &opts),
            Err(ValidationError::MissingMetadata { .. })
        ));

        let publish_only = doc(&words(40), "a, b, c").replace("Generated Date", "Publish Date");
        assert!(validate_document(&publish_only, &opts).is_ok());

        let no_date = doc(&words(40), "a, b, c").replace("Generated Date", "Fetched");
        assert!(validate_document(&no_date, &opts).is_err());
    }

    #[test]
    fn test_headings_only_count_at_line_start() {
        assert_eq!(find_heading("text ## Summary\n## Summary\n", SUMMARY_HEADING), Some(16));
        assert_eq!(find_heading("## Summary of things\n", SUMMARY_HEADING), None);
        assert_eq!(find_heading("## Sources\n# Title\n", TITLE_MARKER), Some(11));
    }

    #[test]
    fn test_extract_section() {
        let md = "## Summary\n  hello world \n## Keywords\nx";
        assert_eq!(extract_section(md, SUMMARY_HEADING, KEYWORDS_HEADING), "hello world");
        assert_eq!(extract_section(md, KEYWORDS_HEADING, SUMMARY_HEADING), "");
        assert_eq!(extract_section(md, SUMMARY_HEADING, CONTENT_HEADING), "");
    }
}
