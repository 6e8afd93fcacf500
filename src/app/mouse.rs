//! Mouse handling
//!
//! Clicks on suggestion rows follow the row; clicks elsewhere move focus.
//! Hovering a row makes it the active one.

use std::time::Instant;

use ratatui::crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use super::app_state::App;
use crate::suggest::suggest_render;

impl App {
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent, now: Instant) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.handle_click(mouse.column, mouse.row, now);
            }
            MouseEventKind::Moved => self.handle_hover(mouse.column, mouse.row),
            _ => {}
        }
    }

    fn handle_click(&mut self, column: u16, row: u16, now: Instant) {
        let position = Position::new(column, row);

        if let Some(overlay) = self.layout_regions.overlay
            && self.suggest.is_visible()
            && overlay.contains(position)
        {
            if let Some(index) = suggest_render::row_at(&self.suggest, overlay, column, row)
                && let Some(navigation) = self.suggest.click_row(index)
            {
                self.finish(navigation);
            }
            return;
        }

        match self.layout_regions.input {
            Some(input) if input.contains(position) => self.focus(),
            _ => self.blur(now),
        }
    }

    fn handle_hover(&mut self, column: u16, row: u16) {
        let Some(overlay) = self.layout_regions.overlay else {
            return;
        };
        if let Some(index) = suggest_render::row_at(&self.suggest, overlay, column, row) {
            self.suggest.hover_row(index);
        }
    }
}
