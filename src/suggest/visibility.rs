//! Overlay visibility rules
//!
//! Blur hides the overlay only after a grace period so a click on a
//! suggestion row, which lands after the input loses focus, still reaches
//! a visible row.

use std::time::{Duration, Instant};

/// Grace period between input blur and hiding the overlay
pub const DEFAULT_BLUR_GRACE_MS: u64 = 200;

#[derive(Debug, Clone)]
pub struct Visibility {
    visible: bool,
    blur_grace: Duration,
    /// Deadline of a blur-triggered hide, if one is pending
    hide_at: Option<Instant>,
}

impl Visibility {
    pub fn new(blur_grace_ms: u64) -> Self {
        Self {
            visible: false,
            blur_grace: Duration::from_millis(blur_grace_ms),
            hide_at: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn hide_pending(&self) -> bool {
        self.hide_at.is_some()
    }

    /// Show after a render (empty or not)
    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Hide right away and drop any pending blur hide
    pub fn hide(&mut self) {
        self.visible = false;
        self.hide_at = None;
    }

    /// Input lost focus: hide once the grace period has elapsed
    pub fn on_blur(&mut self, now: Instant) {
        self.hide_at = Some(now + self.blur_grace);
    }

    /// Input gained focus: cancel a pending hide and reshow rendered entries
    pub fn on_focus(&mut self, has_entries: bool) {
        self.hide_at = None;
        if has_entries {
            self.visible = true;
        }
    }

    /// Apply a due blur hide
    ///
    /// Returns true if the overlay was hidden by this call.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.hide_at {
            Some(deadline) if now >= deadline => {
                self.hide_at = None;
                let was_visible = self.visible;
                self.visible = false;
                was_visible
            }
            _ => false,
        }
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Self::new(DEFAULT_BLUR_GRACE_MS)
    }
}

#[cfg(test)]
#[path = "visibility_tests.rs"]
mod visibility_tests;
