//! Tests for app rendering

use ratatui::Terminal;
use ratatui::backend::TestBackend;

use crate::app::App;
use crate::test_utils::test_helpers::{app_with_suggestions, sample_suggestions, test_app};

const TEST_WIDTH: u16 = 70;
const TEST_HEIGHT: u16 = 20;

fn render_app(app: &mut App) -> String {
    let backend = TestBackend::new(TEST_WIDTH, TEST_HEIGHT);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| app.render(f)).unwrap();
    terminal.backend().to_string()
}

#[test]
fn test_render_idle_screen() {
    let mut app = test_app();
    let output = render_app(&mut app);

    assert!(output.contains("storefront"));
    assert!(output.contains("http://127.0.0.1:8000/"));
    assert!(output.contains("Search products"));
    assert!(output.contains("Type at least 2 characters"));
    assert!(output.contains("Ctrl+C quit"));
    assert!(app.layout_regions.overlay.is_none());
}

#[test]
fn test_render_records_layout_regions() {
    let mut app = app_with_suggestions(sample_suggestions());
    let output = render_app(&mut app);

    let input = app.layout_regions.input.unwrap();
    let overlay = app.layout_regions.overlay.unwrap();
    assert_eq!(input.y, 1);
    assert_eq!(overlay.y, input.y + input.height);
    assert!(output.contains("LED Panel"));
}

#[test]
fn test_status_replaces_help_line() {
    let mut app = test_app();
    app.set_status("Invalid config /tmp/x.toml: bad. Using defaults.");
    let output = render_app(&mut app);

    assert!(output.contains("Using defaults."));
    assert!(!output.contains("Ctrl+C quit"));
}
