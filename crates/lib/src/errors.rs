use thiserror::Error;

/// Failures of the backing cache store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache store is unavailable: {0}")]
    Unavailable(String),
}

/// Errors produced while resolving an oEmbed document.
#[derive(Error, Debug)]
pub enum OembedError {
    #[error("URL is not a recognised slide page: {0}")]
    InvalidUrl(String),
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("Source page {url} is unavailable: {reason}")]
    UpstreamUnavailable { url: String, reason: String },
    #[error("Source page {url} is malformed: missing {field}")]
    MalformedSource { url: String, field: &'static str },
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
    #[error("Failed to encode response: {0}")]
    Encode(String),
    #[error("Page fetcher is missing")]
    MissingFetcher,
}

impl OembedError {
    /// Whether the caller sent a request that can never succeed.
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            OembedError::InvalidUrl(_) | OembedError::UnsupportedFormat(_)
        )
    }
}

impl From<serde_json::Error> for OembedError {
    fn from(err: serde_json::Error) -> Self {
        OembedError::Encode(err.to_string())
    }
}
