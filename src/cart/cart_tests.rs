//! Tests for the cart client

use super::*;
use crate::test_utils::test_helpers::{StubResponse, StubServer, loopback_http};
use serde_json::{Value, json};

fn client_for(server: &StubServer, csrf_token: Option<&str>) -> CartClient {
    CartClient::with_client(
        loopback_http(),
        server.base_url(),
        csrf_token.map(str::to_string),
    )
}

fn body_json(body: &str) -> Value {
    serde_json::from_str(body).unwrap()
}

#[tokio::test]
async fn test_add_to_cart_posts_product_id() {
    let server = StubServer::start(|_| StubResponse::json(r#"{"success":true,"cart_count":3}"#));
    let client = client_for(&server, Some("tok123"));

    let response = client.add_to_cart(7).await.unwrap();

    assert!(response.success);
    assert_eq!(response.cart_count, Some(3));

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.target, "/api/cart/add/");
    assert_eq!(request.header("x-csrftoken"), Some("tok123"));
    assert_eq!(request.header("content-type"), Some("application/json"));
    assert_eq!(body_json(&request.body), json!({"product_id": 7}));
}

#[tokio::test]
async fn test_csrf_header_omitted_without_token() {
    let server = StubServer::start(|_| StubResponse::json(r#"{"success":true,"cart_count":1}"#));
    let client = client_for(&server, None);

    client.add_to_cart(1).await.unwrap();

    assert_eq!(server.requests()[0].header(CSRF_HEADER), None);
}

#[tokio::test]
async fn test_update_cart_posts_item_and_quantity() {
    let server = StubServer::start(|_| {
        StubResponse::json(
            r#"{"success":true,"cart_count":4,"cart_total":1299.5,"item_total":"450.00"}"#,
        )
    });
    let client = client_for(&server, None);

    let response = client.update_cart(12, 2).await.unwrap();

    assert_eq!(response.cart_count, Some(4));
    assert_eq!(response.cart_total, Some(Price::Amount(1299.5)));
    assert_eq!(response.item_total, Some(Price::Text("450.00".to_string())));

    let request = &server.requests()[0];
    assert_eq!(request.target, "/api/cart/update/");
    assert_eq!(
        body_json(&request.body),
        json!({"item_id": 12, "quantity": 2})
    );
}

#[tokio::test]
async fn test_rejection_surfaces_server_message() {
    let server = StubServer::start(|_| {
        StubResponse::json(r#"{"success":false,"message":"Only 2 left in stock"}"#)
    });
    let client = client_for(&server, None);

    let err = client.add_to_cart(7).await.unwrap_err();

    assert!(matches!(err, CartError::Rejected(_)));
    assert_eq!(err.to_string(), "Only 2 left in stock");
}

#[tokio::test]
async fn test_rejection_without_message_uses_default() {
    let server = StubServer::start(|_| StubResponse::json(r#"{"success":false}"#));
    let client = client_for(&server, None);

    let add_err = client.add_to_cart(7).await.unwrap_err();
    let update_err = client.update_cart(1, 1).await.unwrap_err();

    assert_eq!(add_err.to_string(), "Error adding to cart");
    assert_eq!(update_err.to_string(), "Error updating cart");
}

#[tokio::test]
async fn test_error_status_with_json_body_is_rejection() {
    let server = StubServer::start(|_| StubResponse {
        status: 403,
        body: r#"{"success":false,"message":"CSRF verification failed"}"#.to_string(),
        delay: std::time::Duration::ZERO,
    });
    let client = client_for(&server, None);

    let err = client.add_to_cart(7).await.unwrap_err();

    assert_eq!(err.to_string(), "CSRF verification failed");
}

#[tokio::test]
async fn test_error_status_without_json_is_status_error() {
    let server = StubServer::start(|_| StubResponse::status(500));
    let client = client_for(&server, None);

    let err = client.update_cart(1, 1).await.unwrap_err();

    assert!(matches!(err, CartError::Status { code: 500 }));
}

#[tokio::test]
async fn test_malformed_success_body_is_parse_error() {
    let server = StubServer::start(|_| StubResponse::json("<html>oops</html>"));
    let client = client_for(&server, None);

    let err = client.add_to_cart(7).await.unwrap_err();

    assert!(matches!(err, CartError::Parse(_)));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let base = Url::parse(&format!("http://127.0.0.1:{}", port)).unwrap();
    let client = CartClient::with_client(loopback_http(), base, None);

    let err = client.add_to_cart(7).await.unwrap_err();

    assert!(matches!(err, CartError::Network(_)));
}

#[test]
fn test_action_messages() {
    assert_eq!(CartAction::Add.success_message(), "Product added to cart!");
    assert_eq!(CartAction::Update.success_message(), "Cart updated!");
    assert_eq!(CartAction::Add.failure_message(), "Error adding to cart");
    assert_eq!(CartAction::Update.failure_message(), "Error updating cart");
}

#[test]
fn test_badge_appears_once_count_is_positive() {
    let mut badge = CartBadge::new(0);
    assert!(!badge.is_visible());

    badge.apply(0);
    assert!(!badge.is_visible());

    badge.apply(2);
    assert!(badge.is_visible());
    assert_eq!(badge.count(), 2);
}

#[test]
fn test_badge_zero_count_keeps_visibility() {
    let mut badge = CartBadge::new(3);
    assert!(badge.is_visible());

    badge.apply(0);
    assert_eq!(badge.count(), 0);
    assert!(badge.is_visible());
}

#[test]
fn test_toast_for_success() {
    let response = CartResponse {
        success: true,
        cart_count: Some(1),
        cart_total: None,
        item_total: None,
        message: None,
    };
    let toast = Toast::for_result(CartAction::Add, &Ok(response));

    assert_eq!(toast.kind, ToastKind::Success);
    assert_eq!(toast.message, "Product added to cart!");
}

#[test]
fn test_toast_keeps_rejection_message() {
    let result = Err(CartError::Rejected("Out of stock".to_string()));
    let toast = Toast::for_result(CartAction::Update, &result);

    assert_eq!(toast.kind, ToastKind::Error);
    assert_eq!(toast.message, "Out of stock");
}

#[test]
fn test_toast_hides_transport_details() {
    let result = Err(CartError::Network("connection reset".to_string()));
    let toast = Toast::for_result(CartAction::Update, &result);

    assert_eq!(toast.kind, ToastKind::Error);
    assert_eq!(toast.message, "Error updating cart");
}
