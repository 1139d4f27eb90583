use async_trait::async_trait;
use slidemix_html::{HtmlError, HttpFetcher};

/// Retrieves the raw body of a remote page.
///
/// Errors are plain strings: the extractor only needs to know that the
/// upstream was unavailable and why.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, String>;
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, String> {
        self.fetch_html(url).await.map_err(|e| match e {
            HtmlError::Fetch(err) if err.is_timeout() => format!("timed out: {err}"),
            other => other.to_string(),
        })
    }
}
