//! # Shared Constants
//!
//! This module provides a centralized location for constants that are shared across
//! the `slidemix` workspace. Using these constants helps to avoid "magic strings"
//! and ensures consistency between the library, the server and the CLI.

use std::time::Duration;

/// How long a fetched page stays in the metadata cache.
pub const CACHE_TTL: Duration = Duration::from_secs(60 * 60 * 24);

/// The oEmbed `type` reported for every slide.
pub const OEMBED_TYPE: &str = "rich";

/// The oEmbed specification version.
pub const OEMBED_VERSION: &str = "1.0";

/// Display name of the slide source site.
pub const PROVIDER_NAME: &str = "SlideShare";

/// Scheme and host every slide URL must start with.
pub const PROVIDER_URL: &str = "http://www.slideshare.net";

/// Embed width in pixels.
pub const EMBED_WIDTH: u32 = 638;

/// Embed height in pixels.
pub const EMBED_HEIGHT: u32 = 442;

/// Upper bound on the number of URLs in a single mix.
pub const MAX_MIX_URLS: usize = 50;

/// Upper bound on a mix title, in characters.
pub const MAX_TITLE_LENGTH: usize = 100;

/// Number of mixes returned by the "recent" listing.
pub const RECENT_MIX_LIMIT: usize = 10;
