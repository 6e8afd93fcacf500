// Configuration type definitions

use serde::Deserialize;

use crate::suggest::{DEFAULT_BLUR_GRACE_MS, DEFAULT_DEBOUNCE_MS, MIN_QUERY_LEN};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_MAX_VISIBLE: usize = 8;

/// Search suggestion configuration section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before a lookup is sent
    pub debounce_ms: u64,
    /// Minimum trimmed query length that triggers a lookup
    pub min_query_len: usize,
    /// Delay between input blur and hiding the overlay
    pub blur_grace_ms: u64,
    /// Maximum number of rows drawn at once
    pub max_visible: usize,
    /// Only render the response of the most recently issued lookup
    pub guard_stale_responses: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            min_query_len: MIN_QUERY_LEN,
            blur_grace_ms: DEFAULT_BLUR_GRACE_MS,
            max_visible: DEFAULT_MAX_VISIBLE,
            guard_stale_responses: true,
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storefront origin, e.g. `https://shop.example.com`
    pub base_url: String,
    /// Value sent as `X-CSRFToken` on cart mutations
    pub csrf_token: Option<String>,
    pub request_timeout_ms: u64,
    pub search: SearchConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: DEFAULT_BASE_URL.to_string(),
            csrf_token: None,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            search: SearchConfig::default(),
        }
    }
}
