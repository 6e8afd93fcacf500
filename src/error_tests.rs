//! Tests for StorefrontError type

use super::*;

#[test]
fn test_invalid_base_url_display() {
    let error = StorefrontError::InvalidBaseUrl {
        url: "shop".to_string(),
        message: "relative URL without a base".to_string(),
    };
    let msg = error.to_string();
    assert!(msg.contains("Invalid base URL 'shop'"));
    assert!(msg.contains("relative URL without a base"));
}

#[test]
fn test_search_error_from_fetch_error() {
    let error = StorefrontError::from(FetchError::Status { code: 502 });
    assert!(matches!(error, StorefrontError::Search(_)));
    assert_eq!(error.to_string(), "Search unavailable: HTTP error (502)");
}

#[test]
fn test_cart_error_is_transparent() {
    let error = StorefrontError::from(CartError::Rejected("Product out of stock".to_string()));
    assert_eq!(error.to_string(), "Product out of stock");
}

#[test]
fn test_dashboard_error_is_transparent() {
    let error = StorefrontError::from(DashboardError::Status { code: 403 });
    assert!(matches!(error, StorefrontError::Dashboard(_)));
    assert_eq!(error.to_string(), "HTTP error (403)");
}

#[test]
fn test_error_debug() {
    let error = StorefrontError::Search(FetchError::Cancelled);
    let debug_str = format!("{:?}", error);
    assert!(debug_str.contains("Search"));
    assert!(debug_str.contains("Cancelled"));
}
