//! # Application Configuration
//!
//! This module defines the configuration structure for the `slidemix-server` and
//! provides the logic for loading it from a `config.yml` file and environment
//! variables. Every key has a programmatic default, so the file is optional.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use regex::Regex;
use serde::Deserialize;
use slidemix::constants::{
    EMBED_HEIGHT, EMBED_WIDTH, PROVIDER_NAME, PROVIDER_URL, RECENT_MIX_LIMIT,
};
use slidemix::Provider;
use std::env;
use std::fs;
use std::time::Duration;
use tracing::info;

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates a required configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// The site slides are pulled from.
    pub provider: ProviderConfig,
    /// Settings for the HTTP client that fetches slide pages.
    pub fetch: FetchConfig,
    pub mixes: MixesConfig,
}

/// Provides a default value for the `port` field if not set in the environment.
fn default_port() -> u16 {
    9090
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    pub name: String,
    pub url: String,
    pub width: u32,
    pub height: u32,
}

impl From<ProviderConfig> for Provider {
    fn from(config: ProviderConfig) -> Self {
        Provider {
            width: config.width,
            height: config.height,
            ..Provider::new(config.name, config.url)
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct MixesConfig {
    /// How many mixes `GET /mixes` returns.
    pub recent_limit: usize,
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(e.to_string()))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration from defaults, a file, and environment variables.
///
/// - Layer 1: programmatic defaults for every key.
/// - Layer 2: `config.yml` next to this crate's manifest, or `config_path_override`
///   (which must exist). `${VAR}` placeholders are substituted from the environment.
/// - Layer 3: top-level keys like `port` are overridden by `PORT`.
/// - Layer 4: nested keys are overridden by `SLIDEMIX_...` variables
///   (e.g., `SLIDEMIX_FETCH__TIMEOUT_SECS`).
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let base_path = env!("CARGO_MANIFEST_DIR");
    let mut builder = ConfigBuilder::builder()
        .set_default("port", i64::from(default_port()))?
        .set_default("provider.name", PROVIDER_NAME)?
        .set_default("provider.url", PROVIDER_URL)?
        .set_default("provider.width", i64::from(EMBED_WIDTH))?
        .set_default("provider.height", i64::from(EMBED_HEIGHT))?
        .set_default("fetch.timeout_secs", 10_i64)?
        .set_default("fetch.user_agent", slidemix_html::DEFAULT_USER_AGENT)?
        .set_default("mixes.recent_limit", RECENT_MIX_LIMIT as i64)?;

    let config_path = match config_path_override {
        Some(path) => {
            let content = read_and_substitute(path)?.ok_or_else(|| {
                ConfigError::NotFound(format!("Config file not found at '{path}'."))
            })?;
            Some((path.to_string(), content))
        }
        None => {
            let user_config_path = format!("{base_path}/config.yml");
            read_and_substitute(&user_config_path)?.map(|content| (user_config_path, content))
        }
    };
    if let Some((path, content)) = config_path {
        info!("Loading configuration from '{path}'.");
        builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
    }

    let settings = builder
        .add_source(Environment::default())
        .add_source(
            Environment::with_prefix("SLIDEMIX")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
