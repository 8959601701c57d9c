//! Configuration for the news API client.
//!
//! Read from `~/.config/gazette/config.toml` at startup. If the file doesn't
//! exist, a default configuration with comments is created. The API key can
//! also be supplied via the `GAZETTE_API_KEY` environment variable, which
//! takes precedence over the file.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use crate::fetcher::http_client::SortBy;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// News API key, as issued at newsapi.org.
    pub api_key: String,
    /// Search endpoint.
    pub base_url: String,
    /// Article language filter.
    pub language: String,
    /// Sort order for search results.
    pub sort_by: SortBy,
    /// Articles per page.
    pub page_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://newsapi.org/v2/everything".into(),
            language: "en".into(),
            sort_by: SortBy::PublishedAt,
            page_size: 20,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("No API key configured (set GAZETTE_API_KEY or api_key in config.toml)")]
    MissingApiKey,
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// Creates a commented default file on first run. Missing fields use
    /// default values; the env var override for the API key is applied last.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        let mut config = if config_path.exists() {
            let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
                path: config_path.clone(),
                source: e,
            })?;

            toml::from_str(&content).map_err(|e| ConfigError::Parse {
                path: config_path,
                source: e,
            })?
        } else {
            Self::create_default_config(&config_path)?;
            Self::default()
        };

        if let Ok(key) = std::env::var("GAZETTE_API_KEY") {
            config.api_key = key;
        }

        if config.api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        Ok(config)
    }

    /// Get the default config file path: `~/.config/gazette/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("gazette").join("config.toml"))
    }

    fn create_default_config(path: &PathBuf) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;

        Ok(())
    }

    fn default_config_content() -> String {
        r##"# Gazette configuration
#
# api_key: your newsapi.org key. Can also be set via the GAZETTE_API_KEY
# environment variable, which takes precedence.
#
# sort_by: one of "publishedAt", "relevancy", "popularity"

api_key = ""
base_url = "https://newsapi.org/v2/everything"
language = "en"
sort_by = "publishedAt"
page_size = 20
"##
        .to_string()
    }
}
