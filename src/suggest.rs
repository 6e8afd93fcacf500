//! Live search suggestions
//!
//! Keystrokes are debounced, the surviving query is looked up on a worker
//! thread, and the answer is shown in an overlay under the search input.

mod debouncer;
mod fetcher;
mod highlight;
mod navigator;
mod overlay;
pub mod suggest_render;
mod suggest_state;
mod suggestion;
mod visibility;
mod worker;

pub use debouncer::{DEFAULT_DEBOUNCE_MS, Debouncer};
pub use fetcher::{FetchError, SEARCH_PATH, SuggestionClient, parse_results, search_url};
pub use highlight::{MatchHighlighter, Segment};
pub use navigator::{NavOutcome, Navigator};
pub use overlay::{NO_RESULTS_MESSAGE, Overlay, OverlayContent};
pub use suggest_state::{Navigation, SEARCH_PAGE_PATH, SuggestKeyResult, SuggestState};
pub use suggestion::{
    MIN_QUERY_LEN, Price, SearchResults, Suggestion, is_searchable, normalize_query, product_path,
};
pub use visibility::{DEFAULT_BLUR_GRACE_MS, Visibility};
pub use worker::{SuggestRequest, SuggestResponse, spawn_worker};
