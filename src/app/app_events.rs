use std::time::Instant;

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app_state::App;
use crate::suggest::SuggestKeyResult;

impl App {
    /// Dispatch one terminal event
    pub fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            // Only process key press events (avoid duplicates)
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key_event(key, now),
            Event::Mouse(mouse) => self.handle_mouse_event(mouse, now),
            Event::FocusGained => self.focus(),
            Event::FocusLost => self.blur(now),
            Event::Paste(text) => self.handle_paste_event(text, now),
            _ => {}
        }
    }

    /// Handle key press events
    pub fn handle_key_event(&mut self, key: KeyEvent, now: Instant) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }

        if !self.is_focused() {
            // Esc twice leaves; anything else brings focus back to the input
            if key.code == KeyCode::Esc {
                self.quit();
                return;
            }
            self.focus();
        }

        // The overlay sees keys first while it is open
        match self.suggest.handle_key(key) {
            SuggestKeyResult::Navigate(navigation) => {
                self.finish(navigation);
                return;
            }
            SuggestKeyResult::Consumed => return,
            SuggestKeyResult::Ignored => {}
        }

        match key.code {
            KeyCode::Esc => self.blur(now),
            KeyCode::Enter => {
                let query = self.query().to_string();
                if let Some(navigation) = self.suggest.submit(&query) {
                    self.finish(navigation);
                }
            }
            // Single-line input: vertical movement means nothing here
            KeyCode::Up | KeyCode::Down => {}
            _ if inserts_newline(&key) => {}
            _ => {
                if self.input.input(key) {
                    self.notify_input(now);
                }
            }
        }
    }

    /// Insert pasted text as one line
    pub fn handle_paste_event(&mut self, text: String, now: Instant) {
        let line = text.replace(['\r', '\n'], " ");
        if line.is_empty() {
            return;
        }
        self.focus();
        self.input.insert_str(line);
        self.notify_input(now);
    }
}

/// Keys the text area would turn into a line break
fn inserts_newline(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('m') | KeyCode::Char('j'))
}
