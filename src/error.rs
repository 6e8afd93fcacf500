use thiserror::Error;

use crate::cart::CartError;
use crate::dashboard::DashboardError;
use crate::suggest::FetchError;

/// Custom error types for storefront
#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("Invalid base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error("Search unavailable: {0}")]
    Search(#[from] FetchError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Dashboard(#[from] DashboardError),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
