//! Tests for suggestion overlay rendering

use super::*;
use crate::suggest::Price;
use crate::test_utils::test_helpers::{key, sample_suggestions, visible_suggest_state};
use ratatui::crossterm::event::KeyCode;
use ratatui::Terminal;
use ratatui::backend::TestBackend;

const TEST_WIDTH: u16 = 60;
const TEST_HEIGHT: u16 = 16;

fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).unwrap()
}

fn render_overlay(
    state: &mut SuggestState,
    query: &str,
    input_area: Rect,
) -> (String, Option<Rect>) {
    render_overlay_sized(state, query, input_area, TEST_HEIGHT)
}

fn render_overlay_sized(
    state: &mut SuggestState,
    query: &str,
    input_area: Rect,
    height: u16,
) -> (String, Option<Rect>) {
    let mut terminal = create_test_terminal(TEST_WIDTH, height);
    let mut drawn = None;
    terminal
        .draw(|f| {
            drawn = render_popup(state, query, f, input_area);
        })
        .unwrap();
    (terminal.backend().to_string(), drawn)
}

fn top_input() -> Rect {
    Rect::new(0, 0, TEST_WIDTH, 3)
}

fn numbered_rows(count: u64) -> Vec<Suggestion> {
    (0..count)
        .map(|i| Suggestion::new(i, format!("Item {}", i), Price::Amount(i as f64)))
        .collect()
}

#[test]
fn test_hidden_overlay_draws_nothing() {
    let mut state = SuggestState::new(Default::default());
    let (output, area) = render_overlay(&mut state, "la", top_input());

    assert!(area.is_none());
    assert!(!output.contains("Products"));
}

#[test]
fn test_rows_show_name_price_and_image() {
    let mut state = visible_suggest_state(sample_suggestions());
    let (output, area) = render_overlay(&mut state, "la", top_input());

    let area = area.unwrap();
    assert_eq!(area.y, 3);
    assert_eq!(area.height, 5);

    for expected in [
        "Products (3)",
        "Lamp",
        "LED Panel",
        "Lantern",
        "9.99",
        "450.00",
        "120.50",
        "x.jpg",
        "lantern.png",
    ] {
        assert!(output.contains(expected), "missing {:?} in\n{}", expected, output);
    }
}

#[test]
fn test_empty_results_show_placeholder() {
    let mut state = visible_suggest_state(Vec::new());
    let (output, area) = render_overlay(&mut state, "zz", top_input());

    assert_eq!(area.unwrap().height, 3);
    assert!(output.contains("No products found"));
}

#[test]
fn test_active_row_has_marker() {
    let mut state = visible_suggest_state(sample_suggestions());
    state.hover_row(1);
    let (output, _) = render_overlay(&mut state, "la", top_input());

    assert!(output.contains("► LED Panel"));
    assert!(!output.contains("► Lamp"));
}

#[test]
fn test_long_list_scrolls_to_active_row() {
    let mut state = visible_suggest_state(numbered_rows(10));
    state.hover_row(9);
    let (output, area) = render_overlay(&mut state, "item", top_input());

    assert_eq!(area.unwrap().height, 8 + 2);
    assert!(!output.contains("Item 0"));
    assert!(!output.contains("Item 1"));
    assert!(output.contains("► Item 9"));
}

#[test]
fn test_no_room_below_input_draws_nothing() {
    let mut state = visible_suggest_state(sample_suggestions());
    let bottom_input = Rect::new(0, TEST_HEIGHT - 3, TEST_WIDTH, 3);
    let (_, area) = render_overlay(&mut state, "la", bottom_input);

    assert!(area.is_none());
}

#[test]
fn test_row_at_maps_screen_rows() {
    let mut state = visible_suggest_state(sample_suggestions());
    let (_, area) = render_overlay(&mut state, "la", top_input());
    let area = area.unwrap();

    assert_eq!(row_at(&state, area, 5, area.y + 1), Some(0));
    assert_eq!(row_at(&state, area, 5, area.y + 3), Some(2));
    assert_eq!(row_at(&state, area, 5, area.y), None);
    assert_eq!(row_at(&state, area, 0, area.y + 1), None);
}

#[test]
fn test_row_at_accounts_for_scroll() {
    let mut state = visible_suggest_state(numbered_rows(10));
    state.hover_row(9);
    let (_, area) = render_overlay(&mut state, "item", top_input());
    let area = area.unwrap();

    assert_eq!(row_at(&state, area, 5, area.y + 1), Some(2));
    assert_eq!(row_at(&state, area, 5, area.y + 8), Some(9));
}

#[test]
fn test_row_at_ignores_placeholder() {
    let mut state = visible_suggest_state(Vec::new());
    let (_, area) = render_overlay(&mut state, "zz", top_input());

    assert_eq!(row_at(&state, area.unwrap(), 5, 4), None);
}

#[test]
fn test_hover_in_scrolled_list_keeps_window() {
    let mut state = visible_suggest_state(numbered_rows(10));
    state.hover_row(9);
    let (_, area) = render_overlay(&mut state, "item", top_input());
    let area = area.unwrap();

    // Row under the cursor at the top of the scrolled window
    let index = row_at(&state, area, 5, area.y + 1).unwrap();
    assert_eq!(index, 2);
    state.hover_row(index);

    let (output, _) = render_overlay(&mut state, "item", top_input());
    assert_eq!(state.overlay().scroll_offset(), 2);
    assert!(output.contains("► Item 2"));
    assert!(!output.contains("Item 1 "));
    assert_eq!(row_at(&state, area, 5, area.y + 1), Some(2));
}

#[test]
fn test_short_terminal_keeps_active_row_on_screen() {
    let mut state = visible_suggest_state(numbered_rows(10));
    for _ in 0..7 {
        state.handle_key(key(KeyCode::Down));
    }
    assert_eq!(state.overlay().active_index(), Some(6));

    // 3 input rows, 2 border rows, 4 visible rows
    let (output, area) = render_overlay_sized(&mut state, "item", top_input(), 9);

    assert_eq!(area.unwrap().height, 6);
    assert!(output.contains("► Item 6"));
    assert_eq!(state.overlay().scroll_offset(), 3);
}

#[test]
fn test_image_label() {
    assert_eq!(image_label("/x.jpg"), "x.jpg");
    assert_eq!(
        image_label("https://cdn.example.com/media/lamp.png?w=200"),
        "lamp.png"
    );
    assert_eq!(image_label("lamp.png"), "lamp.png");
}
