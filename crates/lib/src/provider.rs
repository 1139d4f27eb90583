//! # Slide Provider
//!
//! Describes the single external site slides are pulled from. The defaults
//! describe SlideShare; overriding them is only useful for pointing the
//! service at a stand-in upstream.

use crate::constants::{EMBED_HEIGHT, EMBED_WIDTH, PROVIDER_NAME, PROVIDER_URL};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub name: String,
    /// Scheme and host, without a trailing slash.
    pub url: String,
    pub width: u32,
    pub height: u32,
}

impl Provider {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Profile URL for an owner on this provider.
    pub fn author_url(&self, owner_id: &str) -> String {
        format!("{}/{}", self.url, owner_id)
    }
}

impl Default for Provider {
    fn default() -> Self {
        Self {
            name: PROVIDER_NAME.to_string(),
            url: PROVIDER_URL.to_string(),
            width: EMBED_WIDTH,
            height: EMBED_HEIGHT,
        }
    }
}
