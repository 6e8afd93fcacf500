//! Admin dashboard client
//!
//! Sales chart data per period, the active sessions table, session
//! termination and the CSV export link.

use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::cart::{CSRF_HEADER, Toast, ToastKind};
use crate::sorting::QueryParams;
use crate::suggest::Price;

pub const CHART_DATA_PATH: &str = "admin/dashboard/chart-data/";
pub const ACTIVE_SESSIONS_PATH: &str = "admin/dashboard/active-sessions/";
pub const TERMINATE_SESSION_PATH: &str = "admin/terminate-session/";

/// Period the chart shows when the dashboard opens
pub const DEFAULT_CHART_PERIOD: &str = "daily";
/// How often the sessions table is reloaded
pub const SESSION_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

pub const TERMINATED_MESSAGE: &str = "Session terminated successfully";
pub const TERMINATE_FAILURE_MESSAGE: &str = "Error terminating session";
pub const NETWORK_FAILURE_MESSAGE: &str = "Network error occurred";

#[derive(Debug, Error)]
pub enum DashboardError {
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

/// Labels and values of the sales chart
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChartData {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub values: Vec<Price>,
}

/// Body of the active sessions endpoint
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ActiveSessions {
    #[serde(default)]
    pub html: Option<String>,
}

impl ActiveSessions {
    /// Table markup, if the server sent any
    pub fn markup(&self) -> Option<&str> {
        self.html.as_deref().filter(|html| !html.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct TerminateResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

/// The chart currently on screen
///
/// Switching to the period already shown is a no-op. Otherwise the period
/// changes right away and the data follows once it has been fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartState {
    period: String,
    data: ChartData,
}

impl ChartState {
    pub fn new(period: impl Into<String>, data: ChartData) -> Self {
        Self {
            period: period.into(),
            data,
        }
    }

    pub fn period(&self) -> &str {
        &self.period
    }

    pub fn data(&self) -> &ChartData {
        &self.data
    }

    /// Move to `period`; returns false if it is already current
    pub fn begin_switch(&mut self, period: &str) -> bool {
        if self.period == period {
            return false;
        }
        self.period = period.to_string();
        true
    }

    /// Replace labels and values with freshly fetched ones
    pub fn replace_data(&mut self, data: ChartData) {
        self.data = data;
    }
}

impl Default for ChartState {
    fn default() -> Self {
        Self::new(DEFAULT_CHART_PERIOD, ChartData::default())
    }
}

/// Toast shown after a terminate call
///
/// Only a `success: false` answer keeps its own message; anything that
/// kept the answer from being read counts as a network error.
pub fn terminate_toast(result: &Result<(), DashboardError>) -> Toast {
    match result {
        Ok(()) => Toast {
            message: TERMINATED_MESSAGE.to_string(),
            kind: ToastKind::Success,
        },
        Err(DashboardError::Rejected(message)) => Toast {
            message: message.clone(),
            kind: ToastKind::Error,
        },
        Err(_) => Toast {
            message: NETWORK_FAILURE_MESSAGE.to_string(),
            kind: ToastKind::Error,
        },
    }
}

/// Link of the export button: the current page with `export=csv`
pub fn export_url(current: &Url) -> Url {
    let mut params = QueryParams::parse(current.query().unwrap_or(""));
    params.set("export", "csv");

    let mut url = current.clone();
    url.set_query(Some(&params.encode()));
    url
}

/// HTTP client for the admin dashboard endpoints
#[derive(Debug, Clone)]
pub struct DashboardClient {
    http: reqwest::Client,
    base_url: Url,
    csrf_token: Option<String>,
}

impl DashboardClient {
    pub fn new(
        base_url: Url,
        timeout: Duration,
        csrf_token: Option<String>,
    ) -> Result<Self, DashboardError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DashboardError::Network(e.to_string()))?;
        Ok(Self::with_client(http, base_url, csrf_token))
    }

    pub fn with_client(http: reqwest::Client, base_url: Url, csrf_token: Option<String>) -> Self {
        Self {
            http,
            base_url,
            csrf_token,
        }
    }

    pub async fn chart_data(&self, period: &str) -> Result<ChartData, DashboardError> {
        let mut url = self.endpoint(CHART_DATA_PATH)?;
        url.query_pairs_mut().append_pair("period", period);
        self.get_json(url).await
    }

    /// Show `period` on `chart`
    ///
    /// Returns false without any request when `period` is already shown.
    pub async fn switch_chart_period(
        &self,
        chart: &mut ChartState,
        period: &str,
    ) -> Result<bool, DashboardError> {
        if !chart.begin_switch(period) {
            log::debug!("Chart already shows {:?}", period);
            return Ok(false);
        }
        let data = self.chart_data(period).await?;
        chart.replace_data(data);
        Ok(true)
    }

    pub async fn active_sessions(&self) -> Result<ActiveSessions, DashboardError> {
        let url = self.endpoint(ACTIVE_SESSIONS_PATH)?;
        self.get_json(url).await
    }

    pub async fn terminate_session(&self, session_id: &str) -> Result<(), DashboardError> {
        let mut url = self.endpoint(TERMINATE_SESSION_PATH)?;
        let url_text = url.to_string();
        url.path_segments_mut()
            .map_err(|_| DashboardError::Network(format!("invalid session URL: {}", url_text)))?
            .pop_if_empty()
            .push(session_id)
            .push("");
        log::debug!("POST {}", url);

        let mut request = self
            .http
            .post(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(token) = &self.csrf_token {
            request = request.header(CSRF_HEADER, token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DashboardError::Network(e.to_string()))?;
        let parsed: TerminateResponse = read_json(response).await?;

        if !parsed.success {
            let message = parsed
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| TERMINATE_FAILURE_MESSAGE.to_string());
            log::warn!("Terminating session {} rejected: {}", session_id, message);
            return Err(DashboardError::Rejected(message));
        }
        Ok(())
    }

    fn endpoint(&self, path: &str) -> Result<Url, DashboardError> {
        self.base_url
            .join(path)
            .map_err(|e| DashboardError::Network(format!("invalid dashboard URL: {}", e)))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, DashboardError> {
        log::debug!("GET {}", url);
        let response = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| DashboardError::Network(e.to_string()))?;
        read_json(response).await
    }
}

/// Parse the body as JSON; an error status only matters when the body is not JSON
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, DashboardError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| DashboardError::Network(e.to_string()))?;

    match serde_json::from_str::<T>(&text) {
        Ok(parsed) => Ok(parsed),
        Err(_) if !status.is_success() => Err(DashboardError::Status {
            code: status.as_u16(),
        }),
        Err(e) => Err(DashboardError::Parse(e.to_string())),
    }
}

#[cfg(test)]
#[path = "dashboard/dashboard_tests.rs"]
mod dashboard_tests;
