//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup. The `AppState` holds all shared resources, such
//! as the configuration, the oEmbed service with its page cache, and the mix
//! store, making them accessible to all request handlers.

use crate::config::AppConfig;
use slidemix::{
    MemoryMixStore, MixStore, OembedService, OembedServiceBuilder, PageFetcher, ReadThroughCache,
};
use slidemix_html::HttpFetcher;
use std::sync::Arc;
use tracing::info;

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub config: Arc<AppConfig>,
    /// Resolves slide URLs into oEmbed documents. Owns the page cache.
    pub oembed: Arc<OembedService>,
    /// Storage for slide mixes.
    pub mixes: Arc<dyn MixStore>,
}

/// Builds the shared application state from the configuration, fetching
/// pages over HTTP.
pub fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let fetcher = HttpFetcher::new(config.fetch.timeout(), &config.fetch.user_agent)?;
    build_app_state_with_fetcher(config, Arc::new(fetcher))
}

/// Builds the shared application state around a caller-supplied page fetcher.
pub fn build_app_state_with_fetcher(
    config: AppConfig,
    fetcher: Arc<dyn PageFetcher>,
) -> anyhow::Result<AppState> {
    let cache = Arc::new(ReadThroughCache::in_memory());
    info!(
        "Page cache ready (ttl: {}s), provider: {}",
        cache.ttl().as_secs(),
        config.provider.url
    );

    let oembed = OembedServiceBuilder::new()
        .provider(config.provider.clone().into())
        .cache(cache)
        .fetcher(fetcher)
        .build()?;

    Ok(AppState {
        config: Arc::new(config),
        oembed: Arc::new(oembed),
        mixes: Arc::new(MemoryMixStore::new()),
    })
}
