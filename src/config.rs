//! Addon-wide configuration.
//!
//! [`Config`] is read once at start-up and handed to every client explicitly.
//! Defaults match the public subt.is deployment; a TOML file can override
//! any subset of them.
//!
//! # Examples
//!
//! ```rust
//! use subtis::config::{Config, ConfigBuilder};
//! use std::time::Duration;
//!
//! let config = ConfigBuilder::default()
//!     .api_base("http://localhost:8080/v1")
//!     .search_timeout(Duration::from_secs(2))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_base, "http://localhost:8080/v1");
//! assert_eq!(config.download_timeout, Duration::from_secs(30));
//!
//! let config = Config::from_toml_str("language = \"en\"").unwrap();
//! assert_eq!(config.language, "en");
//! ```

use derive_builder::Builder;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::types::ApiVariant;

pub const DEFAULT_API_BASE: &str = "https://api.subt.is/v1";
pub const DEFAULT_ADDON_ID: &str = "service.subtitles.subtis";
pub const DEFAULT_LANGUAGE: &str = "es";
pub const SEARCH_TIMEOUT_SECS: u64 = 10;
pub const DOWNLOAD_TIMEOUT_SECS: u64 = 30;
pub const NOTIFICATION_DURATION_MS: u64 = 10_000;

/// Immutable configuration shared by the search and download clients.
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(setter(into), default)]
pub struct Config {
    /// Base URL of the subtitle API, without a trailing slash
    pub api_base: String,

    /// `User-Agent` sent with every request
    pub user_agent: String,

    /// Timeout for search lookups and id resolution
    pub search_timeout: Duration,

    /// Timeout for subtitle content fetches
    pub download_timeout: Duration,

    /// Language code reported when the API omits one
    pub language: String,

    /// Plugin id used in `plugin://` download URLs
    pub addon_id: String,

    /// Directory downloaded subtitles are written to
    pub temp_dir: PathBuf,

    /// Which download reference shape the backend hands out
    pub api_variant: ApiVariant,

    /// Player media types the search refuses to handle
    pub unsupported_media_types: Vec<String>,

    /// How long notifications stay on screen
    pub notification_duration: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            user_agent: default_user_agent(),
            search_timeout: Duration::from_secs(SEARCH_TIMEOUT_SECS),
            download_timeout: Duration::from_secs(DOWNLOAD_TIMEOUT_SECS),
            language: DEFAULT_LANGUAGE.to_string(),
            addon_id: DEFAULT_ADDON_ID.to_string(),
            temp_dir: std::env::temp_dir().join("subtis"),
            api_variant: ApiVariant::default(),
            unsupported_media_types: vec!["episode".to_string(), "tvshow".to_string()],
            notification_duration: Duration::from_millis(NOTIFICATION_DURATION_MS),
        }
    }
}

/// `User-Agent` identifying the addon and its version.
pub fn default_user_agent() -> String {
    format!("Kodi Subtis Addon/{}", env!("CARGO_PKG_VERSION"))
}

/// On-disk shape of the config file; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    api_base: Option<String>,
    user_agent: Option<String>,
    search_timeout_secs: Option<u64>,
    download_timeout_secs: Option<u64>,
    language: Option<String>,
    addon_id: Option<String>,
    temp_dir: Option<PathBuf>,
    api_variant: Option<ApiVariant>,
    unsupported_media_types: Option<Vec<String>>,
    notification_duration_ms: Option<u64>,
}

impl Config {
    /// Parses a TOML document, keeping defaults for absent keys.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Self::from_toml_str_or(contents, Config::default())
    }

    /// Parses a TOML document over `defaults`; absent keys keep the value
    /// from `defaults`.
    pub fn from_toml_str_or(contents: &str, defaults: Config) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents)?;

        let config = Config {
            api_base: file
                .api_base
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            user_agent: file.user_agent.unwrap_or(defaults.user_agent),
            search_timeout: file
                .search_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.search_timeout),
            download_timeout: file
                .download_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.download_timeout),
            language: file.language.unwrap_or(defaults.language),
            addon_id: file.addon_id.unwrap_or(defaults.addon_id),
            temp_dir: file.temp_dir.unwrap_or(defaults.temp_dir),
            api_variant: file.api_variant.unwrap_or(defaults.api_variant),
            unsupported_media_types: file
                .unsupported_media_types
                .unwrap_or(defaults.unsupported_media_types),
            notification_duration: file
                .notification_duration_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.notification_duration),
        };

        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML config file.
    pub async fn load(path: &Path) -> Result<Self> {
        Self::load_or(path, Config::default()).await
    }

    /// Reads a TOML config file over `defaults`.
    pub async fn load_or(path: &Path, defaults: Config) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path).await?;
        Self::from_toml_str_or(&contents, defaults)
    }

    /// Returns a copy writing downloads to `temp_dir`.
    pub fn with_temp_dir(mut self, temp_dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = temp_dir.into();
        self
    }

    /// Whether the player media type is one the search skips.
    pub fn is_unsupported_media_type(&self, media_type: &str) -> bool {
        self.unsupported_media_types
            .iter()
            .any(|unsupported| unsupported.eq_ignore_ascii_case(media_type))
    }

    fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api_base)
            .map_err(|e| Error::config(format!("Invalid api_base '{}': {}", self.api_base, e)))?;

        if self.search_timeout.is_zero() || self.download_timeout.is_zero() {
            return Err(Error::config("Timeouts must be greater than zero"));
        }

        Ok(())
    }
}
