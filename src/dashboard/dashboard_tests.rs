//! Tests for the dashboard client

use super::*;
use crate::test_utils::test_helpers::{StubResponse, StubServer, loopback_http};

fn client_for(server: &StubServer, csrf_token: Option<&str>) -> DashboardClient {
    DashboardClient::with_client(
        loopback_http(),
        server.base_url(),
        csrf_token.map(str::to_string),
    )
}

fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

#[tokio::test]
async fn test_chart_data_requests_period() {
    let server = StubServer::start(|_| {
        StubResponse::json(r#"{"labels":["Mon","Tue"],"values":[120.5,"80.00"]}"#)
    });
    let client = client_for(&server, None);

    let data = client.chart_data("weekly").await.unwrap();

    assert_eq!(data.labels, vec!["Mon", "Tue"]);
    assert_eq!(
        data.values,
        vec![Price::Amount(120.5), Price::Text("80.00".to_string())]
    );
    let requests = server.requests();
    assert_eq!(requests[0].method, "GET");
    assert_eq!(
        requests[0].target,
        "/admin/dashboard/chart-data/?period=weekly"
    );
}

#[tokio::test]
async fn test_switch_chart_period_replaces_data() {
    let server = StubServer::start(|_| StubResponse::json(r#"{"labels":["Jan"],"values":[9]}"#));
    let client = client_for(&server, None);
    let mut chart = ChartState::default();

    let switched = client.switch_chart_period(&mut chart, "monthly").await.unwrap();

    assert!(switched);
    assert_eq!(chart.period(), "monthly");
    assert_eq!(chart.data().labels, vec!["Jan"]);
    assert_eq!(chart.data().values, vec![Price::Amount(9.0)]);
}

#[tokio::test]
async fn test_switch_to_current_period_sends_nothing() {
    let server = StubServer::start(|_| StubResponse::json(r#"{"labels":[],"values":[]}"#));
    let client = client_for(&server, None);
    let data = ChartData {
        labels: vec!["Mon".to_string()],
        values: vec![Price::Amount(1.0)],
    };
    let mut chart = ChartState::new(DEFAULT_CHART_PERIOD, data.clone());

    let switched = client
        .switch_chart_period(&mut chart, DEFAULT_CHART_PERIOD)
        .await
        .unwrap();

    assert!(!switched);
    assert_eq!(chart.data(), &data);
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_failed_switch_keeps_old_data() {
    let server = StubServer::start(|_| StubResponse::status(500));
    let client = client_for(&server, None);
    let data = ChartData {
        labels: vec!["Mon".to_string()],
        values: vec![Price::Amount(3.0)],
    };
    let mut chart = ChartState::new("daily", data.clone());

    let result = client.switch_chart_period(&mut chart, "yearly").await;

    assert!(matches!(result, Err(DashboardError::Status { code: 500 })));
    assert_eq!(chart.period(), "yearly");
    assert_eq!(chart.data(), &data);
}

#[tokio::test]
async fn test_active_sessions_returns_markup() {
    let server = StubServer::start(|_| StubResponse::json(r#"{"html":"<tr><td>alice</td></tr>"}"#));
    let client = client_for(&server, None);

    let sessions = client.active_sessions().await.unwrap();

    assert_eq!(sessions.markup(), Some("<tr><td>alice</td></tr>"));
    assert_eq!(
        server.requests()[0].target,
        "/admin/dashboard/active-sessions/"
    );
}

#[tokio::test]
async fn test_active_sessions_without_html_has_no_markup() {
    let server = StubServer::start(|_| StubResponse::json(r#"{"html":""}"#));
    let client = client_for(&server, None);

    let sessions = client.active_sessions().await.unwrap();

    assert_eq!(sessions.markup(), None);
}

#[tokio::test]
async fn test_terminate_session_posts_with_csrf() {
    let server = StubServer::start(|_| StubResponse::json(r#"{"success":true}"#));
    let client = client_for(&server, Some("tok123"));

    let result = client.terminate_session("abc123").await;

    assert!(result.is_ok());
    let requests = server.requests();
    let request = &requests[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.target, "/admin/terminate-session/abc123/");
    assert_eq!(request.header("x-csrftoken"), Some("tok123"));
    assert_eq!(request.header("content-type"), Some("application/json"));

    let toast = terminate_toast(&result);
    assert_eq!(toast.message, TERMINATED_MESSAGE);
    assert_eq!(toast.kind, ToastKind::Success);
}

#[tokio::test]
async fn test_terminate_session_escapes_id() {
    let server = StubServer::start(|_| StubResponse::json(r#"{"success":true}"#));
    let client = client_for(&server, None);

    client.terminate_session("a/b?c").await.unwrap();

    assert_eq!(
        server.requests()[0].target,
        "/admin/terminate-session/a%2Fb%3Fc/"
    );
}

#[tokio::test]
async fn test_rejected_terminate_uses_server_message() {
    let server = StubServer::start(|_| {
        StubResponse::json(r#"{"success":false,"message":"Cannot end your own session"}"#)
    });
    let client = client_for(&server, None);

    let result = client.terminate_session("7").await;
    let toast = terminate_toast(&result);

    assert_eq!(toast.message, "Cannot end your own session");
    assert_eq!(toast.kind, ToastKind::Error);
}

#[tokio::test]
async fn test_rejected_terminate_without_message_uses_default() {
    let server = StubServer::start(|_| StubResponse::json(r#"{"success":false}"#));
    let client = client_for(&server, None);

    let result = client.terminate_session("7").await;

    assert_eq!(terminate_toast(&result).message, TERMINATE_FAILURE_MESSAGE);
}

#[tokio::test]
async fn test_unreadable_terminate_answer_is_network_error() {
    let server = StubServer::start(|_| StubResponse::status(502));
    let client = client_for(&server, None);

    let result = client.terminate_session("7").await;

    assert!(matches!(result, Err(DashboardError::Status { code: 502 })));
    let toast = terminate_toast(&result);
    assert_eq!(toast.message, NETWORK_FAILURE_MESSAGE);
    assert_eq!(toast.kind, ToastKind::Error);
}

#[test]
fn test_export_url_adds_csv_flag() {
    let exported = export_url(&url("https://shop.example.com/admin/orders/?status=paid"));
    assert_eq!(
        exported.as_str(),
        "https://shop.example.com/admin/orders/?status=paid&export=csv"
    );
}

#[test]
fn test_export_url_replaces_existing_flag() {
    let exported = export_url(&url(
        "https://shop.example.com/admin/orders/?export=xlsx&page=2",
    ));
    assert_eq!(
        exported.as_str(),
        "https://shop.example.com/admin/orders/?export=csv&page=2"
    );
}

#[test]
fn test_export_url_without_query() {
    let exported = export_url(&url("https://shop.example.com/admin/"));
    assert_eq!(exported.as_str(), "https://shop.example.com/admin/?export=csv");
}

#[test]
fn test_chart_state_skips_same_period() {
    let mut chart = ChartState::default();
    assert_eq!(chart.period(), "daily");

    assert!(!chart.begin_switch("daily"));
    assert!(chart.begin_switch("weekly"));
    assert_eq!(chart.period(), "weekly");
    assert!(!chart.begin_switch("weekly"));
}
