//! # Metadata Extraction
//!
//! Turns a matched slide URL into an `OembedResponse`: the page body comes
//! from the read-through cache (fetching on a miss), then every field is
//! scraped from it. A missing field fails the whole extraction.

use crate::{
    cache::ReadThroughCache,
    constants::{OEMBED_TYPE, OEMBED_VERSION},
    errors::OembedError,
    fetch::PageFetcher,
    matcher::SlideReference,
    oembed::OembedResponse,
    provider::Provider,
};
use slidemix_html::{HtmlError, HtmlPage};
use std::sync::Arc;
use tracing::{info, warn};

const SLIDE_REGION: &str = "div.slide";
const SLIDE_INDEX_ATTR: &str = "data-index";
const SLIDE_IMAGE_ATTR: &str = "data-normal";
const AUTHOR_FIELD: &str = "user_name";

pub struct MetadataExtractor {
    provider: Provider,
    cache: Arc<ReadThroughCache>,
    fetcher: Arc<dyn PageFetcher>,
}

impl MetadataExtractor {
    pub fn new(
        provider: Provider,
        cache: Arc<ReadThroughCache>,
        fetcher: Arc<dyn PageFetcher>,
    ) -> Self {
        Self {
            provider,
            cache,
            fetcher,
        }
    }

    pub async fn extract(
        &self,
        reference: &SlideReference,
        raw_url: &str,
    ) -> Result<OembedResponse, OembedError> {
        let html = self
            .cache
            .get_or_fetch(raw_url, || async {
                self.fetcher.fetch(raw_url).await.map_err(|reason| {
                    warn!("Fetching {raw_url} failed: {reason}");
                    OembedError::UpstreamUnavailable {
                        url: raw_url.to_string(),
                        reason,
                    }
                })
            })
            .await?;

        let metadata = self.scrape(reference, raw_url, html)?;
        info!(
            "Extracted metadata for {raw_url} (owner: {}, page: {})",
            reference.owner_id, reference.page
        );
        Ok(metadata)
    }

    /// Scrapes the fields out of an already fetched page.
    pub fn scrape(
        &self,
        reference: &SlideReference,
        raw_url: &str,
        html: String,
    ) -> Result<OembedResponse, OembedError> {
        let page = HtmlPage::parse(html);
        let require = |value: Result<Option<String>, HtmlError>,
                       field: &'static str|
         -> Result<String, OembedError> {
            let missing = || {
                warn!("Page {raw_url} has no {field}");
                OembedError::MalformedSource {
                    url: raw_url.to_string(),
                    field,
                }
            };
            value.map_err(|_| missing())?.ok_or_else(missing)
        };

        // The author only appears in JSON embedded in an inline script.
        let author_name = require(page.script_field(AUTHOR_FIELD), "author_name")?;
        let url = require(
            page.attr_in_region(
                SLIDE_REGION,
                SLIDE_INDEX_ATTR,
                &reference.page,
                "img",
                SLIDE_IMAGE_ATTR,
            ),
            "slide image",
        )?;
        let title = require(page.first_text("title"), "title")?;
        let description = require(
            page.first_attr("meta[name='description']", "content"),
            "description",
        )?;

        Ok(OembedResponse {
            kind: OEMBED_TYPE.to_string(),
            version: OEMBED_VERSION.to_string(),
            author_name,
            author_url: self.provider.author_url(&reference.owner_id),
            provider_name: self.provider.name.clone(),
            provider_url: self.provider.url.clone(),
            url,
            width: self.provider.width,
            height: self.provider.height,
            title,
            description,
        })
    }
}
