use std::time::Instant;

use ratatui::layout::Rect;
use reqwest::Url;
use tui_textarea::TextArea;

use crate::error::StorefrontError;
use crate::suggest::{Navigation, SuggestState};

/// Where components were drawn on the last frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutRegions {
    pub input: Option<Rect>,
    pub overlay: Option<Rect>,
}

/// Application state
pub struct App {
    pub input: TextArea<'static>,
    pub suggest: SuggestState,
    pub layout_regions: LayoutRegions,
    base_url: Url,
    focused: bool,
    should_quit: bool,
    navigation: Option<Navigation>,
    status: Option<String>,
}

impl App {
    pub fn new(suggest: SuggestState, base_url: Url) -> Self {
        let mut input = TextArea::default();
        // Remove default underline from cursor line
        input.set_cursor_line_style(ratatui::style::Style::default());

        Self {
            input,
            suggest,
            layout_regions: LayoutRegions::default(),
            base_url,
            focused: true,
            should_quit: false,
            navigation: None,
            status: None,
        }
    }

    /// Start with `query` already typed
    pub fn with_query(mut self, query: &str, now: Instant) -> Self {
        if !query.is_empty() {
            self.input.insert_str(query);
            self.notify_input(now);
        }
        self
    }

    /// Get the current search text
    pub fn query(&self) -> &str {
        self.input.lines().first().map(String::as_str).unwrap_or("")
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Where the session ended up, if the user followed a link
    pub fn navigation(&self) -> Option<&Navigation> {
        self.navigation.as_ref()
    }

    pub fn navigation_url(&self) -> Option<Result<Url, StorefrontError>> {
        self.navigation.as_ref().map(|nav| nav.url(&self.base_url))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    /// Advance timers and pick up lookup results
    ///
    /// Returns true if the screen needs a redraw.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.suggest.tick(now)
    }

    pub(super) fn quit(&mut self) {
        self.should_quit = true;
    }

    pub(super) fn finish(&mut self, navigation: Navigation) {
        log::debug!("Navigating to {}", navigation.path());
        self.navigation = Some(navigation);
        self.should_quit = true;
    }

    pub(super) fn blur(&mut self, now: Instant) {
        if self.focused {
            self.focused = false;
            self.suggest.on_blur(now);
        }
    }

    pub(super) fn focus(&mut self) {
        if !self.focused {
            self.focused = true;
            self.suggest.on_focus();
        }
    }

    pub(super) fn notify_input(&mut self, now: Instant) {
        let query = self.query().to_string();
        self.suggest.on_input(&query, now);
    }
}
