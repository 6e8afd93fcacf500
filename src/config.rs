//! Configuration loading
//!
//! Reads `config.toml` from the platform config directory
//! (`~/.config/storefront/config.toml` on Linux). A missing file means
//! defaults; a broken file means defaults plus a warning for the status line.

mod types;

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;

use crate::error::StorefrontError;

pub use types::{Config, DEFAULT_BASE_URL, SearchConfig};

/// Loaded configuration plus a warning to show the user, if any
#[derive(Debug, Clone)]
pub struct ConfigResult {
    pub config: Config,
    pub warning: Option<String>,
}

/// Default location of the config file
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("storefront").join("config.toml"))
}

/// Load the config from the default location
pub fn load_config() -> ConfigResult {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => ConfigResult {
            config: Config::default(),
            warning: None,
        },
    }
}

/// Load the config from `path`, falling back to defaults on any problem
pub fn load_config_from(path: &Path) -> ConfigResult {
    if !path.exists() {
        return ConfigResult {
            config: Config::default(),
            warning: None,
        };
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            return ConfigResult {
                config: Config::default(),
                warning: Some(format!("Failed to read {}: {}", path.display(), e)),
            };
        }
    };

    match toml::from_str::<Config>(&content) {
        Ok(config) => ConfigResult {
            config,
            warning: None,
        },
        Err(e) => ConfigResult {
            config: Config::default(),
            warning: Some(format!(
                "Invalid config {}: {}. Using defaults.",
                path.display(),
                e.message()
            )),
        },
    }
}

impl Config {
    /// Parsed storefront base URL
    ///
    /// The path always ends in `/` so API and page paths are joined below
    /// it rather than replacing its last segment.
    pub fn base_url(&self) -> Result<Url, StorefrontError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| StorefrontError::InvalidBaseUrl {
            url: self.base_url.clone(),
            message: e.to_string(),
        })?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
