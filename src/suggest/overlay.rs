//! Suggestion overlay contents
//!
//! Holds what the overlay currently shows: nothing yet, the "no results"
//! placeholder, or one link row per suggestion. Every render replaces the
//! previous contents and resets the active row and the scroll position.

use ratatui::crossterm::event::KeyEvent;

use super::navigator::{NavOutcome, Navigator};
use super::suggestion::Suggestion;

/// Placeholder shown when a lookup returns no products
pub const NO_RESULTS_MESSAGE: &str = "No products found";

/// What the overlay currently holds
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OverlayContent {
    /// Nothing rendered yet (or cleared)
    #[default]
    Empty,
    /// Lookup returned an empty list
    NoResults,
    /// One row per suggestion, in server order
    Rows(Vec<Suggestion>),
}

#[derive(Debug, Clone, Default)]
pub struct Overlay {
    content: OverlayContent,
    navigator: Navigator,
    scroll_offset: usize,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the overlay contents with `suggestions`
    ///
    /// An empty list renders the placeholder. The active row is reset.
    pub fn render(&mut self, suggestions: Vec<Suggestion>) {
        self.content = if suggestions.is_empty() {
            OverlayContent::NoResults
        } else {
            OverlayContent::Rows(suggestions)
        };
        self.navigator.clear();
        self.scroll_offset = 0;
    }

    /// Remove everything, including the placeholder
    pub fn clear(&mut self) {
        self.content = OverlayContent::Empty;
        self.navigator.clear();
        self.scroll_offset = 0;
    }

    pub fn content(&self) -> &OverlayContent {
        &self.content
    }

    /// Whether anything (rows or placeholder) is rendered
    pub fn has_entries(&self) -> bool {
        !matches!(self.content, OverlayContent::Empty)
    }

    /// Interactive rows; the placeholder is not a row
    pub fn rows(&self) -> &[Suggestion] {
        match &self.content {
            OverlayContent::Rows(rows) => rows,
            _ => &[],
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows().len()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.navigator.active()
    }

    pub fn active_row(&self) -> Option<&Suggestion> {
        self.navigator.active().and_then(|i| self.rows().get(i))
    }

    /// Link target of row `index`
    pub fn target(&self, index: usize) -> Option<String> {
        self.rows().get(index).map(Suggestion::product_path)
    }

    /// Route a key to the navigator, scoped to the rendered rows
    pub fn handle_key(&mut self, key: KeyEvent) -> NavOutcome {
        let row_count = self.row_count();
        self.navigator.handle_key(key, row_count)
    }

    /// Index of the first row drawn
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Move the window of `viewport` drawn rows the least amount needed to
    /// show the active row, without scrolling past the last row
    pub fn scroll_to_active(&mut self, viewport: usize) {
        if viewport == 0 {
            self.scroll_offset = 0;
            return;
        }

        let mut offset = self.scroll_offset;
        if let Some(active) = self.navigator.active() {
            if active < offset {
                offset = active;
            } else if active >= offset + viewport {
                offset = active + 1 - viewport;
            }
        }

        let max_offset = self.row_count().saturating_sub(viewport);
        self.scroll_offset = offset.min(max_offset);
    }

    /// Highlight row `index` directly (mouse hover)
    pub fn hover(&mut self, index: usize) -> bool {
        let row_count = self.row_count();
        self.navigator.select(index, row_count)
    }
}

#[cfg(test)]
#[path = "overlay_tests.rs"]
mod overlay_tests;
