//! Cart API client
//!
//! Background add/update calls against the storefront cart endpoints, plus
//! the small pieces of UI state that follow from their answers (the cart
//! count badge and the toast text).

use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::suggest::Price;

pub const ADD_PATH: &str = "api/cart/add/";
pub const UPDATE_PATH: &str = "api/cart/update/";
pub const CSRF_HEADER: &str = "X-CSRFToken";

#[derive(Debug, Error)]
pub enum CartError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error ({code})")]
    Status { code: u16 },

    #[error("Parse error: {0}")]
    Parse(String),

    /// The server answered `success: false`
    #[error("{0}")]
    Rejected(String),
}

/// Which cart mutation was attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    Add,
    Update,
}

impl CartAction {
    pub fn success_message(self) -> &'static str {
        match self {
            CartAction::Add => "Product added to cart!",
            CartAction::Update => "Cart updated!",
        }
    }

    /// Shown when the server rejects the call without saying why
    pub fn failure_message(self) -> &'static str {
        match self {
            CartAction::Add => "Error adding to cart",
            CartAction::Update => "Error updating cart",
        }
    }

    fn path(self) -> &'static str {
        match self {
            CartAction::Add => ADD_PATH,
            CartAction::Update => UPDATE_PATH,
        }
    }
}

/// Body returned by both cart endpoints
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CartResponse {
    pub success: bool,
    #[serde(default)]
    pub cart_count: Option<u64>,
    #[serde(default)]
    pub cart_total: Option<Price>,
    #[serde(default)]
    pub item_total: Option<Price>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
struct AddRequest {
    product_id: u64,
}

#[derive(Debug, Serialize)]
struct UpdateRequest {
    item_id: u64,
    quantity: u32,
}

/// Cart count badge
///
/// Appears once the count goes above zero. A later zero updates the count
/// but leaves the badge as it was.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartBadge {
    count: u64,
    visible: bool,
}

impl CartBadge {
    pub fn new(count: u64) -> Self {
        Self {
            count,
            visible: count > 0,
        }
    }

    pub fn apply(&mut self, count: u64) {
        self.count = count;
        if count > 0 {
            self.visible = true;
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Short status message shown after a cart call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

impl Toast {
    /// Server rejections keep their message; transport failures get the generic one
    pub fn for_result(action: CartAction, result: &Result<CartResponse, CartError>) -> Self {
        match result {
            Ok(_) => Self {
                message: action.success_message().to_string(),
                kind: ToastKind::Success,
            },
            Err(CartError::Rejected(message)) => Self {
                message: message.clone(),
                kind: ToastKind::Error,
            },
            Err(_) => Self {
                message: action.failure_message().to_string(),
                kind: ToastKind::Error,
            },
        }
    }
}

/// HTTP client for the cart endpoints
#[derive(Debug, Clone)]
pub struct CartClient {
    http: reqwest::Client,
    base_url: Url,
    csrf_token: Option<String>,
}

impl CartClient {
    pub fn new(
        base_url: Url,
        timeout: Duration,
        csrf_token: Option<String>,
    ) -> Result<Self, CartError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CartError::Network(e.to_string()))?;
        Ok(Self::with_client(http, base_url, csrf_token))
    }

    pub fn with_client(http: reqwest::Client, base_url: Url, csrf_token: Option<String>) -> Self {
        Self {
            http,
            base_url,
            csrf_token,
        }
    }

    pub async fn add_to_cart(&self, product_id: u64) -> Result<CartResponse, CartError> {
        self.post(CartAction::Add, &AddRequest { product_id }).await
    }

    pub async fn update_cart(
        &self,
        item_id: u64,
        quantity: u32,
    ) -> Result<CartResponse, CartError> {
        self.post(CartAction::Update, &UpdateRequest { item_id, quantity })
            .await
    }

    async fn post<B: Serialize>(
        &self,
        action: CartAction,
        body: &B,
    ) -> Result<CartResponse, CartError> {
        let url = self
            .base_url
            .join(action.path())
            .map_err(|e| CartError::Network(format!("invalid cart URL: {}", e)))?;
        log::debug!("POST {}", url);

        let mut request = self
            .http
            .post(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(body);
        if let Some(token) = &self.csrf_token {
            request = request.header(CSRF_HEADER, token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CartError::Network(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| CartError::Network(e.to_string()))?;

        let parsed = match serde_json::from_str::<CartResponse>(&text) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(CartError::Status {
                    code: status.as_u16(),
                });
            }
            Err(e) => return Err(CartError::Parse(e.to_string())),
        };

        if !parsed.success {
            let message = parsed
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| action.failure_message().to_string());
            log::warn!("Cart {:?} rejected: {}", action, message);
            return Err(CartError::Rejected(message));
        }

        Ok(parsed)
    }
}

#[cfg(test)]
#[path = "cart/cart_tests.rs"]
mod cart_tests;
