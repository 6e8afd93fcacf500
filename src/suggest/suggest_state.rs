//! Search suggestion controller
//!
//! Owns the whole suggestion pipeline for one search input: the debouncer,
//! the channel to the fetch worker, the overlay contents, and the overlay
//! visibility. The UI feeds it input changes, focus changes, keys, clicks
//! and ticks; it answers with redraw hints and navigation requests.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::{Duration, Instant};

use ratatui::crossterm::event::KeyEvent;
use reqwest::Url;
use tokio::sync::mpsc::{UnboundedSender, unbounded_channel};

use super::debouncer::Debouncer;
use super::fetcher::SuggestionClient;
use super::navigator::NavOutcome;
use super::overlay::Overlay;
use super::suggestion::{is_searchable, normalize_query, product_path};
use super::visibility::Visibility;
use super::worker::{SuggestRequest, SuggestResponse, spawn_worker};
use crate::config::SearchConfig;
use crate::error::StorefrontError;

/// Full-results page submitted when Enter is pressed without a selection
pub const SEARCH_PAGE_PATH: &str = "/products/";

/// Where the user asked to go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// A suggestion row was followed
    Product { id: u64 },
    /// The query was submitted as a full search
    SearchPage { query: String },
}

impl Navigation {
    /// Storefront path of the target, e.g. `/product/1/`
    pub fn path(&self) -> String {
        match self {
            Navigation::Product { id } => product_path(*id),
            Navigation::SearchPage { .. } => SEARCH_PAGE_PATH.to_string(),
        }
    }

    /// Absolute URL of the target under `base_url`
    pub fn url(&self, base_url: &Url) -> Result<Url, StorefrontError> {
        let path = self.path();
        let mut url = base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| StorefrontError::InvalidBaseUrl {
                url: base_url.to_string(),
                message: e.to_string(),
            })?;
        if let Navigation::SearchPage { query } = self {
            url.query_pairs_mut().append_pair("q", query);
        }
        Ok(url)
    }
}

/// Result of routing a key to the suggestion overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestKeyResult {
    /// Not for the overlay; the input field should handle it
    Ignored,
    /// Handled by the overlay (the input must not see it)
    Consumed,
    /// Enter on the active row
    Navigate(Navigation),
}

pub struct SuggestState {
    settings: SearchConfig,
    debouncer: Debouncer<String>,
    overlay: Overlay,
    visibility: Visibility,
    /// Channel to send requests to the worker thread
    request_tx: Option<UnboundedSender<SuggestRequest>>,
    /// Channel to receive responses from the worker thread
    response_rx: Option<Receiver<SuggestResponse>>,
    /// ID of the most recently issued request
    request_id: u64,
    /// ID of the request whose response is still awaited
    in_flight_request_id: Option<u64>,
    /// Message of the last failed lookup, cleared by the next success
    last_error: Option<String>,
}

impl SuggestState {
    pub fn new(settings: SearchConfig) -> Self {
        Self {
            debouncer: Debouncer::new(settings.debounce_ms),
            visibility: Visibility::new(settings.blur_grace_ms),
            overlay: Overlay::new(),
            settings,
            request_tx: None,
            response_rx: None,
            request_id: 0,
            in_flight_request_id: None,
            last_error: None,
        }
    }

    /// Controller with a fetch worker already running against `base_url`
    pub fn connect(
        settings: SearchConfig,
        base_url: Url,
        timeout: Duration,
    ) -> Result<Self, StorefrontError> {
        let client = SuggestionClient::new(base_url, timeout)?;
        let mut state = Self::new(settings);
        state.start_worker(client);
        Ok(state)
    }

    /// Spawn the fetch worker for `client` and connect to it
    pub fn start_worker(&mut self, client: SuggestionClient) {
        let (request_tx, request_rx) = unbounded_channel();
        let (response_tx, response_rx) = mpsc::channel();
        spawn_worker(client, request_rx, response_tx);
        self.set_channels(request_tx, response_rx);
    }

    /// Set the channel handles for communication with the worker thread
    pub fn set_channels(
        &mut self,
        request_tx: UnboundedSender<SuggestRequest>,
        response_rx: Receiver<SuggestResponse>,
    ) {
        self.request_tx = Some(request_tx);
        self.response_rx = Some(response_rx);
    }

    pub fn settings(&self) -> &SearchConfig {
        &self.settings
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn is_visible(&self) -> bool {
        self.visibility.is_visible()
    }

    pub fn has_pending_query(&self) -> bool {
        self.debouncer.has_pending()
    }

    /// How long until the pending lookup is due; `None` when nothing is pending
    pub fn time_until_lookup(&self, now: Instant) -> Option<Duration> {
        self.debouncer.time_until_ready(now)
    }

    pub fn current_request_id(&self) -> u64 {
        self.request_id
    }

    pub fn in_flight_request_id(&self) -> Option<u64> {
        self.in_flight_request_id
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The input text changed
    ///
    /// Short queries hide the overlay and drop any pending lookup; anything
    /// else restarts the debounce window with the trimmed query.
    pub fn on_input(&mut self, raw: &str, now: Instant) {
        let query = normalize_query(raw);

        if !is_searchable(query, self.settings.min_query_len) {
            self.debouncer.cancel();
            if self.settings.guard_stale_responses {
                self.cancel_in_flight_request();
            }
            self.visibility.hide();
            return;
        }

        self.debouncer.schedule_at(query.to_string(), now);
    }

    /// Advance timers and drain worker responses
    ///
    /// Returns true if anything visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let Some(query) = self.debouncer.poll_at(now) {
            self.dispatch_fetch(query);
        }

        let rendered = self.poll_responses();
        let hidden = self.visibility.tick(now);
        rendered || hidden
    }

    /// Input lost focus
    pub fn on_blur(&mut self, now: Instant) {
        self.visibility.on_blur(now);
    }

    /// Input gained focus
    pub fn on_focus(&mut self) {
        self.visibility.on_focus(self.overlay.has_entries());
    }

    /// Route a key press to the overlay while it is visible
    pub fn handle_key(&mut self, key: KeyEvent) -> SuggestKeyResult {
        if !self.visibility.is_visible() {
            return SuggestKeyResult::Ignored;
        }

        match self.overlay.handle_key(key) {
            NavOutcome::Activate(index) => match self.activate(index) {
                Some(navigation) => SuggestKeyResult::Navigate(navigation),
                None => SuggestKeyResult::Consumed,
            },
            NavOutcome::Moved | NavOutcome::Unchanged => SuggestKeyResult::Consumed,
            NavOutcome::Ignored => SuggestKeyResult::Ignored,
        }
    }

    /// A suggestion row was clicked
    ///
    /// Clicks land as long as the overlay is still shown, including during
    /// the blur grace period.
    pub fn click_row(&mut self, index: usize) -> Option<Navigation> {
        if !self.visibility.is_visible() {
            return None;
        }
        self.activate(index)
    }

    /// Scroll the overlay so the active row is among the `viewport` rows drawn
    pub fn fit_overlay(&mut self, viewport: usize) {
        self.overlay.scroll_to_active(viewport);
    }

    /// Mouse moved over a suggestion row
    pub fn hover_row(&mut self, index: usize) -> bool {
        self.visibility.is_visible() && self.overlay.hover(index)
    }

    /// Enter without a selected row: submit the whole query
    pub fn submit(&mut self, raw: &str) -> Option<Navigation> {
        let query = normalize_query(raw);
        if query.is_empty() {
            return None;
        }

        self.debouncer.cancel();
        self.cancel_in_flight_request();
        self.visibility.hide();
        Some(Navigation::SearchPage {
            query: query.to_string(),
        })
    }

    /// Drain all responses waiting on the worker channel
    ///
    /// Returns true if the overlay changed.
    pub fn poll_responses(&mut self) -> bool {
        let mut changed = false;

        loop {
            let next = match &self.response_rx {
                Some(rx) => rx.try_recv(),
                None => return changed,
            };

            match next {
                Ok(response) => changed |= self.handle_response(response),
                Err(TryRecvError::Empty) => return changed,
                Err(TryRecvError::Disconnected) => {
                    log::warn!("Suggestion worker disconnected");
                    self.response_rx = None;
                    self.request_tx = None;
                    self.in_flight_request_id = None;
                    return changed;
                }
            }
        }
    }

    /// Apply one worker response
    ///
    /// Returns true if the overlay changed.
    pub fn handle_response(&mut self, response: SuggestResponse) -> bool {
        match response {
            SuggestResponse::Results {
                query,
                suggestions,
                request_id,
            } => {
                if self.is_stale(request_id) {
                    log::debug!(
                        "Discarding stale response {} for {:?} (current: {})",
                        request_id,
                        query,
                        self.request_id
                    );
                    return false;
                }
                self.finish_request(request_id);
                self.last_error = None;
                self.overlay.render(suggestions);
                self.visibility.show();
                true
            }
            SuggestResponse::Failed { error, request_id } => {
                log::warn!("Search error (request {}): {}", request_id, error);
                if self.is_stale(request_id) {
                    return false;
                }
                self.finish_request(request_id);
                self.last_error = Some(error);
                self.overlay.clear();
                self.visibility.hide();
                true
            }
            SuggestResponse::Cancelled { request_id } => {
                log::debug!("Request {} cancelled", request_id);
                self.finish_request(request_id);
                false
            }
        }
    }

    /// Send a lookup for `query` to the worker
    ///
    /// Returns true if the request was sent.
    fn dispatch_fetch(&mut self, query: String) -> bool {
        if self.request_tx.is_none() {
            log::debug!("No suggestion worker; dropping query {:?}", query);
            return false;
        }

        if self.settings.guard_stale_responses {
            self.cancel_in_flight_request();
        }

        self.request_id = self.request_id.wrapping_add(1);
        let request_id = self.request_id;

        if let Some(tx) = &self.request_tx
            && tx
                .send(SuggestRequest::Fetch {
                    query: query.clone(),
                    request_id,
                })
                .is_ok()
        {
            log::debug!("Sent request {} for {:?}", request_id, query);
            self.in_flight_request_id = Some(request_id);
            return true;
        }

        log::warn!("Suggestion worker is gone; request {} not sent", request_id);
        false
    }

    /// Cancel the awaited request, if any
    ///
    /// Returns true if a cancel was sent.
    fn cancel_in_flight_request(&mut self) -> bool {
        if let Some(request_id) = self.in_flight_request_id.take()
            && let Some(tx) = &self.request_tx
            && tx.send(SuggestRequest::Cancel { request_id }).is_ok()
        {
            log::debug!("Sent cancel for request {}", request_id);
            return true;
        }
        false
    }

    /// With the guard on, only the awaited request may update the overlay
    fn is_stale(&self, request_id: u64) -> bool {
        self.settings.guard_stale_responses && self.in_flight_request_id != Some(request_id)
    }

    fn finish_request(&mut self, request_id: u64) {
        if self.in_flight_request_id == Some(request_id) {
            self.in_flight_request_id = None;
        }
    }

    fn activate(&mut self, index: usize) -> Option<Navigation> {
        let id = self.overlay.rows().get(index)?.id;
        self.debouncer.cancel();
        self.visibility.hide();
        Some(Navigation::Product { id })
    }
}

#[cfg(test)]
#[path = "suggest_state_tests.rs"]
mod suggest_state_tests;
