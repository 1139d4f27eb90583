//! # Slide Mix
//!
//! This crate resolves slide page URLs into oEmbed documents and manages
//! slide mixes, ordered lists of those URLs shown as one presentation.
//!
//! The pieces, leaves first: `matcher` parses slide URLs, `cache` provides a
//! read-through page cache, `extractor` scrapes metadata from fetched pages,
//! and `oembed` encodes the result as JSON or XML. `OembedService` wires them
//! together.

pub mod cache;
pub mod constants;
pub mod errors;
pub mod extractor;
pub mod fetch;
pub mod matcher;
pub mod mix;
pub mod oembed;
pub mod provider;

pub use cache::{CacheStore, MemoryCacheStore, ReadThroughCache};
pub use errors::{CacheError, OembedError};
pub use extractor::MetadataExtractor;
pub use fetch::PageFetcher;
pub use matcher::{SlideReference, SlideUrlMatcher};
pub use mix::{MemoryMixStore, MixDraft, MixError, MixStore, SlideMix, ValidationErrors};
pub use oembed::{EncodedResponse, Format, OembedResponse};
pub use provider::Provider;

use std::sync::Arc;
use tracing::info;

/// Matches, extracts and encodes oEmbed documents for slide URLs.
pub struct OembedService {
    matcher: SlideUrlMatcher,
    extractor: MetadataExtractor,
}

impl OembedService {
    pub fn matcher(&self) -> &SlideUrlMatcher {
        &self.matcher
    }

    /// Validates `url` and returns the extracted metadata.
    pub async fn lookup(&self, url: &str) -> Result<OembedResponse, OembedError> {
        let reference = self
            .matcher
            .matches(url)
            .ok_or_else(|| OembedError::InvalidUrl(url.to_string()))?;
        self.extractor.extract(&reference, url).await
    }

    /// Resolves `url` into an encoded document. The URL is checked before
    /// anything is fetched.
    pub async fn resolve(
        &self,
        url: &str,
        format: Format,
    ) -> Result<EncodedResponse, OembedError> {
        info!("Resolving oEmbed document for {url} as {format}");
        self.lookup(url).await?.encode(format)
    }
}

/// A builder for `OembedService`.
#[derive(Default)]
pub struct OembedServiceBuilder {
    provider: Option<Provider>,
    cache: Option<Arc<ReadThroughCache>>,
    fetcher: Option<Arc<dyn PageFetcher>>,
}

impl OembedServiceBuilder {
    /// Creates a new `OembedServiceBuilder`.
    ///
    /// # Examples
    ///
    /// ```
    /// use slidemix::OembedServiceBuilder;
    ///
    /// let builder = OembedServiceBuilder::new();
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the slide provider. Defaults to SlideShare.
    pub fn provider(mut self, provider: Provider) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Sets the page cache. Defaults to a fresh in-memory cache.
    pub fn cache(mut self, cache: Arc<ReadThroughCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Sets the fetcher used on cache misses.
    pub fn fetcher(mut self, fetcher: Arc<dyn PageFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Builds the `OembedService`.
    ///
    /// Fails if no fetcher was supplied or the provider URL cannot be turned
    /// into a matcher.
    pub fn build(self) -> Result<OembedService, OembedError> {
        let fetcher = self.fetcher.ok_or(OembedError::MissingFetcher)?;
        let provider = self.provider.unwrap_or_default();
        let matcher = SlideUrlMatcher::new(&provider)
            .map_err(|e| OembedError::InvalidUrl(format!("{}: {e}", provider.url)))?;
        let cache = self
            .cache
            .unwrap_or_else(|| Arc::new(ReadThroughCache::in_memory()));
        Ok(OembedService {
            matcher,
            extractor: MetadataExtractor::new(provider, cache, fetcher),
        })
    }
}
