//! Suggestion worker thread
//!
//! Runs suggestion lookups on a background thread so the UI never blocks on
//! the network. Requests arrive over a channel tagged with a request id;
//! each lookup runs as its own task, so several can be in flight at once and
//! their responses may come back in any order. The UI decides which ones to
//! keep.

use std::collections::HashMap;
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio_util::sync::CancellationToken;

use super::fetcher::{FetchError, SuggestionClient};
use super::suggestion::Suggestion;

/// Request messages sent to the suggestion worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestRequest {
    /// Look up suggestions for a query
    Fetch {
        query: String,
        /// Unique ID for this request, used to filter stale responses
        request_id: u64,
    },
    /// Abort the lookup with the given ID
    Cancel { request_id: u64 },
}

/// Response messages received from the suggestion worker
#[derive(Debug, Clone, PartialEq)]
pub enum SuggestResponse {
    /// Lookup finished with a (possibly empty) result list
    Results {
        query: String,
        suggestions: Vec<Suggestion>,
        request_id: u64,
    },
    /// Lookup failed (network, status, or body error)
    Failed { error: String, request_id: u64 },
    /// Lookup was cancelled before it finished
    Cancelled { request_id: u64 },
}

impl SuggestResponse {
    pub fn request_id(&self) -> u64 {
        match self {
            SuggestResponse::Results { request_id, .. }
            | SuggestResponse::Failed { request_id, .. }
            | SuggestResponse::Cancelled { request_id } => *request_id,
        }
    }
}

/// Spawn the suggestion worker thread
///
/// The thread owns a current-thread tokio runtime and exits once every
/// request sender has been dropped.
pub fn spawn_worker(
    client: SuggestionClient,
    request_rx: UnboundedReceiver<SuggestRequest>,
    response_tx: Sender<SuggestResponse>,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(e) => {
                log::error!("Failed to start suggestion runtime: {}", e);
                return;
            }
        };

        runtime.block_on(worker_loop(client, request_rx, response_tx));
        log::debug!("Suggestion worker thread shutting down");
    })
}

/// Main worker loop - dispatches requests until the channel is closed
async fn worker_loop(
    client: SuggestionClient,
    mut request_rx: UnboundedReceiver<SuggestRequest>,
    response_tx: Sender<SuggestResponse>,
) {
    // Tokens of lookups that may still be running. A finished lookup cancels
    // its own token through a drop guard, which lets it be pruned here.
    let mut in_flight: HashMap<u64, CancellationToken> = HashMap::new();

    while let Some(request) = request_rx.recv().await {
        in_flight.retain(|_, token| !token.is_cancelled());

        match request {
            SuggestRequest::Fetch { query, request_id } => {
                let token = CancellationToken::new();
                in_flight.insert(request_id, token.clone());

                let client = client.clone();
                let response_tx = response_tx.clone();
                tokio::spawn(async move {
                    let _done = token.clone().drop_guard();
                    let response = run_lookup(&client, query, request_id, token).await;
                    // Receiver gone means the UI is shutting down
                    let _ = response_tx.send(response);
                });
            }
            SuggestRequest::Cancel { request_id } => match in_flight.remove(&request_id) {
                Some(token) => {
                    log::debug!("Cancelling suggestion request {}", request_id);
                    token.cancel();
                }
                None => {
                    log::debug!("Cancelled request {} (no active request)", request_id);
                    let _ = response_tx.send(SuggestResponse::Cancelled { request_id });
                }
            },
        }
    }

    for token in in_flight.values() {
        token.cancel();
    }
}

async fn run_lookup(
    client: &SuggestionClient,
    query: String,
    request_id: u64,
    cancel_token: CancellationToken,
) -> SuggestResponse {
    match client.fetch_with_cancel(&query, cancel_token).await {
        Ok(suggestions) => {
            log::debug!(
                "Request {} for {:?} returned {} suggestions",
                request_id,
                query,
                suggestions.len()
            );
            SuggestResponse::Results {
                query,
                suggestions,
                request_id,
            }
        }
        Err(FetchError::Cancelled) => SuggestResponse::Cancelled { request_id },
        Err(e) => SuggestResponse::Failed {
            error: e.to_string(),
            request_id,
        },
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
