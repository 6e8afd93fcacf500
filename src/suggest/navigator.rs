//! Keyboard navigation over rendered suggestion rows
//!
//! Tracks the single active row. Movement is clamped to the rendered list,
//! there is no wraparound.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Result of routing a key to the navigator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// The active row changed
    Moved,
    /// Key was a navigation key but the active row could not move
    Unchanged,
    /// Enter on the active row: follow that row's link
    Activate(usize),
    /// Not a navigation key; let the input handle it
    Ignored,
}

impl NavOutcome {
    /// Whether the key was consumed and must not reach the input field
    pub fn is_consumed(self) -> bool {
        !matches!(self, NavOutcome::Ignored)
    }
}

/// Active-row state for the suggestion overlay
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigator {
    /// Currently active row (None = no selection)
    active: Option<usize>,
}

impl Navigator {
    pub fn new() -> Self {
        Self { active: None }
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active == Some(index)
    }

    /// Drop the selection
    pub fn clear(&mut self) {
        self.active = None;
    }

    /// Move to the next row; stays put on the last row
    ///
    /// Returns true if the active row changed.
    pub fn move_down(&mut self, row_count: usize) -> bool {
        let next = match self.active {
            None => 0,
            Some(current) => current + 1,
        };
        if next >= row_count {
            return false;
        }
        self.active = Some(next);
        true
    }

    /// Move to the previous row; no-op on the first row or with no selection
    ///
    /// Returns true if the active row changed.
    pub fn move_up(&mut self) -> bool {
        match self.active {
            Some(current) if current > 0 => {
                self.active = Some(current - 1);
                true
            }
            _ => false,
        }
    }

    /// Make `index` active directly (mouse hover)
    ///
    /// Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize, row_count: usize) -> bool {
        if index >= row_count || self.active == Some(index) {
            return false;
        }
        self.active = Some(index);
        true
    }

    /// Route a key press through the navigation state machine
    pub fn handle_key(&mut self, key: KeyEvent, row_count: usize) -> NavOutcome {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return NavOutcome::Ignored;
        }

        match key.code {
            KeyCode::Down => {
                if self.move_down(row_count) {
                    NavOutcome::Moved
                } else {
                    NavOutcome::Unchanged
                }
            }
            KeyCode::Up => {
                if self.move_up() {
                    NavOutcome::Moved
                } else {
                    NavOutcome::Unchanged
                }
            }
            KeyCode::Enter => match self.active {
                Some(index) if index < row_count => NavOutcome::Activate(index),
                _ => NavOutcome::Ignored,
            },
            _ => NavOutcome::Ignored,
        }
    }
}

#[cfg(test)]
#[path = "navigator_tests.rs"]
mod navigator_tests;
