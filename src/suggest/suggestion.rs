//! Suggestion data model
//!
//! Wire format of `GET /api/search/?q=...`:
//! `{"results": [{"id": 1, "name": "Lamp", "image": "/x.jpg", "price": 9.99}]}`

use std::fmt;

use serde::Deserialize;

/// Minimum trimmed query length (in characters) before suggestions are fetched
pub const MIN_QUERY_LEN: usize = 2;

/// Product price as sent by the server
///
/// The search endpoint sends a number, older endpoints send a preformatted string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Amount(f64),
    Text(String),
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Amount(amount) => write!(f, "{:.2}", amount),
            Price::Text(text) => write!(f, "{}", text),
        }
    }
}

/// A single product suggestion
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Suggestion {
    pub id: u64,
    pub name: String,
    #[serde(rename = "image", default)]
    pub image_url: Option<String>,
    pub price: Price,
}

impl Suggestion {
    pub fn new(id: u64, name: impl Into<String>, price: Price) -> Self {
        Self {
            id,
            name: name.into(),
            image_url: None,
            price,
        }
    }

    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Storefront path of this product's detail page
    pub fn product_path(&self) -> String {
        product_path(self.id)
    }

    /// Image reference, treating an empty string as absent
    pub fn image(&self) -> Option<&str> {
        self.image_url.as_deref().filter(|url| !url.is_empty())
    }
}

/// Body of a search response
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResults {
    pub results: Vec<Suggestion>,
}

pub fn product_path(id: u64) -> String {
    format!("/product/{}/", id)
}

/// Trim raw input into the query that would be sent
pub fn normalize_query(raw: &str) -> &str {
    raw.trim()
}

/// Whether a trimmed query is long enough to fetch suggestions for
pub fn is_searchable(query: &str, min_len: usize) -> bool {
    query.chars().count() >= min_len
}

#[cfg(test)]
#[path = "suggestion_tests.rs"]
mod suggestion_tests;
