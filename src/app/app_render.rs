use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::app_state::App;
use crate::suggest::suggest_render;

const HELP_TEXT: &str = "↑/↓ select · Enter open · Esc leave input · Ctrl+C quit";

impl App {
    pub fn render(&mut self, frame: &mut Frame) {
        let layout = Layout::vertical([
            Constraint::Length(1), // Title
            Constraint::Length(3), // Search input
            Constraint::Min(0),    // Body (the overlay floats over it)
            Constraint::Length(1), // Help / status line
        ])
        .split(frame.area());

        self.render_title(frame, layout[0]);
        self.render_input(frame, layout[1]);
        self.render_body(frame, layout[2]);
        self.render_help_line(frame, layout[3]);

        let query = self.query().to_string();
        self.layout_regions.input = Some(layout[1]);
        self.layout_regions.overlay =
            suggest_render::render_popup(&mut self.suggest, &query, frame, layout[1]);
    }

    fn render_title(&self, frame: &mut Frame, area: Rect) {
        let title = Line::from(vec![
            Span::styled(
                " storefront ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {}", self.base_url()),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(Paragraph::new(title), area);
    }

    fn render_input(&mut self, frame: &mut Frame, area: Rect) {
        let border_color = if self.is_focused() {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        self.input.set_block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search products ")
                .border_style(Style::default().fg(border_color)),
        );
        frame.render_widget(&self.input, area);
    }

    fn render_body(&self, frame: &mut Frame, area: Rect) {
        let min_len = self.suggest.settings().min_query_len;
        let hint = format!(
            "Type at least {} characters to see matching products.",
            min_len
        );
        let body = Paragraph::new(Line::from(Span::styled(
            hint,
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(body, area);
    }

    fn render_help_line(&self, frame: &mut Frame, area: Rect) {
        let line = match self.status() {
            Some(status) => Line::from(Span::styled(
                status.to_string(),
                Style::default().fg(Color::Yellow),
            )),
            None => Line::from(Span::styled(HELP_TEXT, Style::default().fg(Color::DarkGray))),
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}
