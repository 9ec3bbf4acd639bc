//! Page fetching.
//!
//! [`HttpFetcher`] does a plain GET with browser-like headers. When the site
//! answers 401 or 403 it tries a headless browser render (if enabled) and
//! then a public read proxy. The canonical URL comes from
//! `<link rel="canonical">` when the page declares one.

use std::process::Command;
use std::time::Duration;

use dom_query::Document;
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, CONTENT_TYPE};
use reqwest::StatusCode;
use tracing::{debug, info, warn};
use url::Url;

use crate::encoding::decode_html;
use crate::url_utils::resolve_url;
use crate::{Error, Options, Result};

/// Desktop Chrome on macOS.
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.9";

/// Read proxy used when a site refuses direct access.
pub const READ_PROXY_PREFIX: &str = "https://r.jina.ai/";

/// A fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// Decoded HTML.
    pub html: String,
    /// Canonical URL declared by the page, else the requested URL.
    pub canonical_url: String,
}

/// Fetches the HTML of a page.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<FetchedPage>;
}

/// Renders a page in a headless browser and returns its serialized DOM.
#[derive(Debug, Clone)]
pub struct HeadlessBrowser {
    /// Browser executable.
    pub binary: String,
    /// Time budget for the render.
    pub timeout: Duration,
}

impl HeadlessBrowser {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            binary: "chromium".to_string(),
            timeout,
        }
    }

    /// Dump the rendered DOM of `url`.
    pub fn render(&self, url: &str) -> Result<String> {
        let budget = self.timeout.as_millis().to_string();
        let output = Command::new(&self.binary)
            .args(["--headless", "--disable-gpu", "--dump-dom"])
            .arg(format!("--virtual-time-budget={budget}"))
            .arg(format!("--timeout={budget}"))
            .arg(url)
            .output()
            .map_err(|e| Error::Fetch(format!("cannot run {}: {e}", self.binary)))?;

        if !output.status.success() {
            return Err(Error::Fetch(format!(
                "{} exited with {}",
                self.binary, output.status
            )));
        }

        let html = String::from_utf8_lossy(&output.stdout).into_owned();
        if html.trim().is_empty() {
            return Err(Error::Fetch(format!("{} returned an empty DOM", self.binary)));
        }
        Ok(html)
    }
}

/// Blocking HTTP fetcher with headless and read-proxy fallbacks.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    headless: Option<HeadlessBrowser>,
}

impl HttpFetcher {
    /// Build a fetcher from the run options.
    pub fn new(options: &Options) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(options.fetch_timeout)
            .build()?;

        let headless = options
            .use_headless
            .then(|| HeadlessBrowser::new(options.headless_timeout));

        Ok(Self { client, headless })
    }

    /// Replace the headless browser (e.g. a different Chromium binary).
    #[must_use]
    pub fn with_headless(mut self, browser: HeadlessBrowser) -> Self {
        self.headless = Some(browser);
        self
    }

    fn get(&self, url: &str) -> Result<Response> {
        Ok(self.client.get(url).send()?)
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedPage> {
        let mut response = self.get(url)?;

        if matches!(response.status(), StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            warn!(url, status = %response.status(), "access refused");

            if let Some(browser) = &self.headless {
                match browser.render(url) {
                    Ok(html) => {
                        info!(url, "fetched with headless browser");
                        return Ok(page_from_html(html, url));
                    }
                    Err(e) => warn!(url, error = %e, "headless render failed"),
                }
            }

            let proxy_url = read_proxy_url(url);
            debug!(proxy_url = %proxy_url, "retrying through read proxy");
            response = self.get(&proxy_url)?;
        }

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!("{url} returned {status}")));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes()?;
        let html = decode_html(&body, content_type.as_deref());

        Ok(page_from_html(html, url))
    }
}

fn page_from_html(html: String, requested_url: &str) -> FetchedPage {
    let canonical_url = canonical_url(&html, requested_url);
    FetchedPage { html, canonical_url }
}

/// Read-proxy address for `url`; a bare host is treated as `http://`.
///
/// # Examples
/// ```
/// use rs_html2md::fetch::read_proxy_url;
///
/// assert_eq!(read_proxy_url("https://a.com/x"), "https://r.jina.ai/https://a.com/x");
/// assert_eq!(read_proxy_url("a.com/x"), "https://r.jina.ai/http://a.com/x");
/// ```
#[must_use]
pub fn read_proxy_url(url: &str) -> String {
    if url.starts_with("https://") || url.starts_with("http://") {
        format!("{READ_PROXY_PREFIX}{url}")
    } else {
        format!("{READ_PROXY_PREFIX}http://{url}")
    }
}

/// Canonical URL declared by the page, resolved against `requested_url`,
/// else `requested_url` itself.
#[must_use]
pub fn canonical_url(html: &str, requested_url: &str) -> String {
    let doc = Document::from(html);
    let href = doc
        .select("link[rel~='canonical'][href]")
        .first()
        .attr("href")
        .map(|h| h.trim().to_string())
        .unwrap_or_default();

    if href.is_empty() {
        return requested_url.to_string();
    }

    let base = Url::parse(requested_url).ok();
    resolve_url(&href, base.as_ref())
}
