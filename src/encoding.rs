//! Character set detection for fetched pages.
//!
//! A response body is decoded with the charset named in its `Content-Type`
//! header when present, otherwise with the one declared in the page's own
//! `<meta>` tags, otherwise as UTF-8.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// Match `<meta charset="...">`
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>;]+)"#).expect("valid regex")
});

/// Match `charset=...` inside a Content-Type value
#[allow(clippy::expect_used)]
static HEADER_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).expect("valid regex")
});

/// Bytes of the document head scanned for a `<meta>` declaration.
const SNIFF_LEN: usize = 1024;

/// Encoding named by a `Content-Type` header value, if recognised.
#[must_use]
pub fn encoding_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    HEADER_CHARSET_RE
        .captures(content_type)
        .and_then(|c| c.get(1))
        .and_then(|m| Encoding::for_label(m.as_str().as_bytes()))
}

/// Encoding declared by the document's `<meta>` tags, if recognised.
///
/// Covers both `<meta charset>` and the `http-equiv="Content-Type"` form,
/// since the latter also carries a `charset=` token.
#[must_use]
pub fn sniff_meta_encoding(html: &[u8]) -> Option<&'static Encoding> {
    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LEN)]);
    CHARSET_META_RE
        .captures(&head)
        .and_then(|c| c.get(1))
        .and_then(|m| Encoding::for_label(m.as_str().as_bytes()))
}

/// Decode a page body to UTF-8.
///
/// Invalid sequences become U+FFFD instead of failing.
#[must_use]
pub fn decode_html(body: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(encoding_from_content_type)
        .or_else(|| sniff_meta_encoding(body))
        .unwrap_or(UTF_8);

    if encoding == UTF_8 {
        return String::from_utf8_lossy(body).into_owned();
    }

    let (decoded, _encoding_used, _had_errors) = encoding.decode(body);
    decoded.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_charset_wins_over_meta() {
        let body = b"<html><head><meta charset=\"utf-8\"></head><body>Caf\xE9</body></html>";
        let text = decode_html(body, Some("text/html; charset=ISO-8859-1"));
        assert!(text.contains("Café"));
    }

    #[test]
    fn meta_charset_used_without_header() {
        let body = b"<html><head><meta charset=\"windows-1252\"></head><body>\x93Hi\x94</body></html>";
        let text = decode_html(body, Some("text/html"));
        assert!(text.contains("\u{201C}Hi\u{201D}"));
    }

    #[test]
    fn http_equiv_declaration_is_detected() {
        let body = br#"<meta http-equiv="Content-Type" content="text/html; charset=ISO-8859-1">"#;
        let encoding = sniff_meta_encoding(body);
        // encoding_rs maps ISO-8859-1 to windows-1252 per WHATWG
        assert_eq!(encoding.map(Encoding::name), Some("windows-1252"));
    }

    #[test]
    fn defaults_to_utf8() {
        let text = decode_html("<p>naïve</p>".as_bytes(), None);
        assert_eq!(text, "<p>naïve</p>");
    }

    #[test]
    fn invalid_bytes_are_replaced() {
        let text = decode_html(b"<p>ok \xFF\xFE end</p>", None);
        assert!(text.contains("ok"));
        assert!(text.contains("end"));
    }

    #[test]
    fn unknown_header_label_falls_through() {
        assert!(encoding_from_content_type("text/html; charset=klingon").is_none());
    }
}
