//! URL Utility Functions
//!
//! Resolution of page-relative references, scheme checks used by link
//! selection, and the host and extension helpers used to name output files.

use url::Url;

/// Schemes that are kept verbatim instead of being joined onto the base.
const OPAQUE_SCHEMES: &[&str] = &["data:", "javascript:", "mailto:", "tel:"];

/// Check if a string is a valid absolute http(s) URL with a host.
///
/// # Returns
/// * `(is_absolute, parsed_url)` - Whether URL is absolute and the parsed URL if valid
#[must_use]
pub fn is_absolute_url(s: &str) -> (bool, Option<Url>) {
    let s = s.trim();

    if s.is_empty() {
        return (false, None);
    }

    if !s.starts_with("http://") && !s.starts_with("https://") {
        return (false, None);
    }

    match Url::parse(s) {
        Ok(url) if url.host().is_some() => (true, Some(url)),
        _ => (false, None),
    }
}

/// Resolve a reference found in the page against the page URL.
///
/// Absolute http(s) references and opaque schemes (`data:`, `javascript:`,
/// `mailto:`, `tel:`) are returned unchanged. Without a usable base the
/// reference is returned trimmed but otherwise untouched.
///
/// # Examples
/// ```
/// use rs_html2md::url_utils::resolve_url;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/blog/post").ok();
/// assert_eq!(resolve_url("/img/a.png", base.as_ref()), "https://example.com/img/a.png");
/// assert_eq!(resolve_url("b.png", base.as_ref()), "https://example.com/blog/b.png");
/// assert_eq!(resolve_url("javascript:void(0)", base.as_ref()), "javascript:void(0)");
/// ```
#[must_use]
pub fn resolve_url(reference: &str, base: Option<&Url>) -> String {
    let reference = reference.trim();

    if reference.is_empty() {
        return String::new();
    }

    let lower = reference.to_ascii_lowercase();
    if OPAQUE_SCHEMES.iter().any(|scheme| lower.starts_with(scheme)) {
        return reference.to_string();
    }

    let (is_abs, _) = is_absolute_url(reference);
    if is_abs {
        return reference.to_string();
    }

    match base.map(|b| b.join(reference)) {
        Some(Ok(resolved)) => resolved.to_string(),
        _ => reference.to_string(),
    }
}

/// Lower-cased scheme of a URL-like string, if it has one.
///
/// Follows RFC 3986: a letter followed by letters, digits, `+`, `-` or `.`,
/// terminated by `:`.
#[must_use]
pub fn scheme(s: &str) -> Option<String> {
    let (candidate, _) = s.trim().split_once(':')?;
    let mut chars = candidate.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        return None;
    }
    Some(candidate.to_ascii_lowercase())
}

/// Whether the string uses the `http` or `https` scheme.
#[must_use]
pub fn is_http_scheme(s: &str) -> bool {
    matches!(scheme(s).as_deref(), Some("http" | "https"))
}

/// Extract the lower-cased hostname from an absolute URL.
#[must_use]
pub fn extract_hostname(url_str: &str) -> Option<String> {
    let (is_abs, parsed) = is_absolute_url(url_str);
    if !is_abs {
        return None;
    }
    parsed
        .and_then(|url| url.host_str().map(str::to_ascii_lowercase))
        .filter(|host| !host.is_empty())
}

/// File extension of the URL path, lower-cased.
///
/// Returns `None` when the path has no dot or the suffix is longer than five
/// characters (query-string noise, hashes).
#[must_use]
pub fn path_extension(url: &str) -> Option<String> {
    let path = Url::parse(url)
        .map(|u| u.path().to_string())
        .unwrap_or_else(|_| url.split(['?', '#']).next().unwrap_or(url).to_string());

    let (_, ext) = path.rsplit_once('.')?;
    if ext.is_empty() || ext.len() > 5 || ext.contains('/') {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Option<Url> {
        Url::parse("https://example.com/news/story.html").ok()
    }

    #[test]
    fn test_is_absolute_url() {
        assert!(is_absolute_url("https://example.com/path").0);
        assert!(!is_absolute_url("/relative/path").0);
        assert!(!is_absolute_url("example.com").0);
    }

    #[test]
    fn test_resolve_relative_and_protocol_relative() {
        assert_eq!(resolve_url("img/a.png", base().as_ref()), "https://example.com/news/img/a.png");
        assert_eq!(resolve_url("//cdn.example.net/v.mp4", base().as_ref()), "https://cdn.example.net/v.mp4");
        assert_eq!(resolve_url("../up", base().as_ref()), "https://example.com/up");
    }

    #[test]
    fn test_resolve_keeps_absolute_and_opaque() {
        assert_eq!(resolve_url("https://other.org", base().as_ref()), "https://other.org");
        assert_eq!(resolve_url("data:image/gif;base64,R0lG", base().as_ref()), "data:image/gif;base64,R0lG");
        assert_eq!(resolve_url("mailto:me@example.com", base().as_ref()), "mailto:me@example.com");
    }

    #[test]
    fn test_resolve_without_base() {
        assert_eq!(resolve_url(" /a ", None), "/a");
    }

    #[test]
    fn test_scheme_detection() {
        assert_eq!(scheme("HTTPS://example.com").as_deref(), Some("https"));
        assert_eq!(scheme("javascript:void(0)").as_deref(), Some("javascript"));
        assert_eq!(scheme("/path:with-colon"), None);
        assert!(is_http_scheme("http://example.com"));
        assert!(!is_http_scheme("ftp://example.com"));
        assert!(!is_http_scheme("#top"));
    }

    #[test]
    fn test_extract_hostname() {
        assert_eq!(extract_hostname("https://WWW.Example.com/a").as_deref(), Some("www.example.com"));
        assert_eq!(extract_hostname("not a url"), None);
    }

    #[test]
    fn test_path_extension() {
        assert_eq!(path_extension("https://example.com/a/photo.JPG?x=1").as_deref(), Some("jpg"));
        assert_eq!(path_extension("https://example.com/a/photo"), None);
        assert_eq!(path_extension("https://example.com/a/file.verylong"), None);
        assert_eq!(path_extension("https://example.com/v1.2/photo"), None);
    }
}
