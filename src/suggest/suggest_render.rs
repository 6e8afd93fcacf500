//! Suggestion overlay rendering
//!
//! Draws the dropdown directly under the search input. Rows show the
//! product name (query matches emphasised), the price and the image file.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use super::highlight::MatchHighlighter;
use super::overlay::{NO_RESULTS_MESSAGE, OverlayContent};
use super::suggest_state::SuggestState;
use super::suggestion::Suggestion;
use crate::widgets::popup;

const POPUP_BORDER_HEIGHT: u16 = 2;
const POPUP_OFFSET_X: u16 = 0;
const COLUMN_GAP: usize = 2;
const ACTIVE_MARKER: &str = "► ";
const INACTIVE_MARKER: &str = "  ";

/// Render the overlay under `input_area`
///
/// Returns the area drawn so mouse events can be mapped back to rows. The
/// overlay scroll is fitted to the rows that actually fit on screen.
pub fn render_popup(
    state: &mut SuggestState,
    query: &str,
    frame: &mut Frame,
    input_area: Rect,
) -> Option<Rect> {
    if !state.is_visible() {
        return None;
    }

    let max_visible = state.settings().max_visible.max(1);
    let line_count = match state.overlay().content() {
        OverlayContent::Empty => return None,
        OverlayContent::NoResults => 1,
        OverlayContent::Rows(rows) => rows.len().min(max_visible),
    };

    let popup_height = (line_count as u16).saturating_add(POPUP_BORDER_HEIGHT);
    let popup_area = popup::popup_below_anchor(
        frame.area(),
        input_area,
        input_area.width,
        popup_height,
        POPUP_OFFSET_X,
    );
    if popup_area.height <= POPUP_BORDER_HEIGHT {
        return None;
    }

    let viewport = popup_area.height.saturating_sub(POPUP_BORDER_HEIGHT) as usize;
    state.fit_overlay(viewport);

    let overlay = state.overlay();
    let lines = match overlay.content() {
        OverlayContent::Rows(rows) => row_lines(
            rows,
            overlay.scroll_offset(),
            viewport,
            overlay.active_index(),
            query,
        ),
        _ => vec![Line::from(Span::styled(
            format!("{}{}", INACTIVE_MARKER, NO_RESULTS_MESSAGE),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))],
    };

    popup::clear_area(frame, popup_area);

    let title = match overlay.row_count() {
        0 => " Products ".to_string(),
        n => format!(" Products ({}) ", n),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Paragraph::new(lines).block(block), popup_area);
    Some(popup_area)
}

/// Index of the suggestion row at screen position `(column, row)`
pub fn row_at(state: &SuggestState, popup_area: Rect, column: u16, row: u16) -> Option<usize> {
    let overlay = state.overlay();
    let relative = popup::row_in_bordered(popup_area, column, row)? as usize;
    let index = overlay.scroll_offset() + relative;
    (index < overlay.row_count()).then_some(index)
}

fn row_lines(
    rows: &[Suggestion],
    offset: usize,
    viewport: usize,
    active: Option<usize>,
    query: &str,
) -> Vec<Line<'static>> {
    let highlighter = MatchHighlighter::new();
    let visible: Vec<(usize, &Suggestion)> =
        rows.iter().enumerate().skip(offset).take(viewport).collect();

    let name_width = visible
        .iter()
        .map(|(_, s)| s.name.width())
        .max()
        .unwrap_or(0);
    let price_width = visible
        .iter()
        .map(|(_, s)| s.price.to_string().width())
        .max()
        .unwrap_or(0);

    visible
        .into_iter()
        .map(|(index, suggestion)| {
            let is_active = active == Some(index);
            let base = if is_active {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::White)
            };
            let matched = base
                .fg(if is_active { Color::Black } else { Color::Yellow })
                .add_modifier(Modifier::BOLD);

            let marker = if is_active { ACTIVE_MARKER } else { INACTIVE_MARKER };
            let mut spans = vec![Span::styled(marker, base)];

            for segment in highlighter.segments(&suggestion.name, query) {
                let style = if segment.matched { matched } else { base };
                spans.push(Span::styled(segment.text, style));
            }

            let price = suggestion.price.to_string();
            let name_pad = name_width.saturating_sub(suggestion.name.width()) + COLUMN_GAP;
            let price_pad = price_width.saturating_sub(price.width());
            spans.push(Span::styled(
                format!("{}{}{}", " ".repeat(name_pad), " ".repeat(price_pad), price),
                base.fg(if is_active { Color::Black } else { Color::Green }),
            ));

            if let Some(image) = suggestion.image() {
                spans.push(Span::styled(
                    format!("{}{}", " ".repeat(COLUMN_GAP), image_label(image)),
                    base.fg(if is_active { Color::Black } else { Color::DarkGray }),
                ));
            }

            Line::from(spans)
        })
        .collect()
}

/// File name of an image reference, without any query string
fn image_label(image: &str) -> &str {
    let path = image.split(['?', '#']).next().unwrap_or(image);
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or(image)
}

#[cfg(test)]
#[path = "suggest_render_tests.rs"]
mod suggest_render_tests;
