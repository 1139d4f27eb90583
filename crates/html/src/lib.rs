//! # slidemix-html: Page Fetching and Scraping
//!
//! This crate owns the two collaborators the metadata extractor talks to:
//! an HTTP client that retrieves a page body as text, and a thin query layer
//! over a parsed HTML document (CSS selectors, attributes, text nodes).

use regex::Regex;
use scraper::{Html, Selector};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Default timeout applied to every page fetch.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default `User-Agent` header sent with page fetches.
pub const DEFAULT_USER_AGENT: &str = concat!("slidemix/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum HtmlError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),
    #[error("Failed to fetch content: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("Request to {url} failed with status {status}")]
    Status { url: String, status: u16 },
    #[error("Invalid selector '{0}'")]
    Selector(String),
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// Retrieves remote pages as text.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Builds a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, HtmlError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(HtmlError::ClientBuild)?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Performs a GET and returns the body. Non-2xx responses are errors.
    pub async fn fetch_html(&self, url: &str) -> Result<String, HtmlError> {
        info!("Fetching page: {url}");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(HtmlError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.text().await?;
        debug!("Fetched {} bytes from {url}", body.len());
        Ok(body)
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::with_client(reqwest::Client::new())
    }
}

/// A parsed HTML page that still keeps the raw text around, since some
/// fields only exist inside inline scripts.
///
/// `scraper::Html` is not `Send`; build one, query it, and drop it before
/// the next `.await`.
pub struct HtmlPage {
    raw: String,
    document: Html,
}

impl HtmlPage {
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let document = Html::parse_document(&raw);
        Self { raw, document }
    }

    /// Text content of the first element matching `selector`.
    pub fn first_text(&self, selector: &str) -> Result<Option<String>, HtmlError> {
        let selector = parse_selector(selector)?;
        Ok(self
            .document
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>()))
    }

    /// Attribute `attr` of the first element matching `selector`.
    pub fn first_attr(&self, selector: &str, attr: &str) -> Result<Option<String>, HtmlError> {
        let selector = parse_selector(selector)?;
        Ok(self
            .document
            .select(&selector)
            .next()
            .and_then(|el| el.value().attr(attr))
            .map(str::to_string))
    }

    /// Finds the first `region` element whose `key_attr` equals `key`, then
    /// returns `attr` of the first `inner` element inside it.
    ///
    /// `key` is compared as a plain string and never spliced into a
    /// selector, so arbitrary values are safe.
    pub fn attr_in_region(
        &self,
        region: &str,
        key_attr: &str,
        key: &str,
        inner: &str,
        attr: &str,
    ) -> Result<Option<String>, HtmlError> {
        let region = parse_selector(region)?;
        let inner = parse_selector(inner)?;
        let found = self
            .document
            .select(&region)
            .find(|el| el.value().attr(key_attr) == Some(key))
            .and_then(|el| el.select(&inner).next())
            .and_then(|el| el.value().attr(attr))
            .map(str::to_string);
        Ok(found)
    }

    pub fn script_field(&self, field: &str) -> Result<Option<String>, HtmlError> {
        script_field(&self.raw, field)
    }
}

/// Scans raw page text for a JSON-ish `"field":"value"` fragment and returns
/// the first value.
///
/// Upstream pages embed some data only inside inline `<script>` JSON, so this
/// is a text search rather than a DOM query.
pub fn script_field(raw: &str, field: &str) -> Result<Option<String>, HtmlError> {
    let pattern = format!(r#""{}":"([^"]+?)""#, regex::escape(field));
    let re = Regex::new(&pattern)?;
    Ok(re
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string()))
}

fn parse_selector(selector: &str) -> Result<Selector, HtmlError> {
    Selector::parse(selector).map_err(|e| HtmlError::Selector(format!("{selector}: {e}")))
}
