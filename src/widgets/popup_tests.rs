//! Tests for widgets/popup

use super::*;

const FRAME: Rect = Rect {
    x: 0,
    y: 0,
    width: 100,
    height: 30,
};

#[test]
fn test_popup_below_anchor_basic() {
    let anchor = Rect::new(0, 2, 80, 3);

    let popup = popup_below_anchor(FRAME, anchor, 60, 10, 2);

    assert_eq!(popup.x, 2);
    assert_eq!(popup.y, 5);
    assert_eq!(popup.width, 60);
    assert_eq!(popup.height, 10);
}

#[test]
fn test_popup_below_anchor_width_limited_by_anchor() {
    let anchor = Rect::new(0, 0, 40, 3);

    let popup = popup_below_anchor(FRAME, anchor, 60, 5, 2);

    assert_eq!(popup.width, 36);
}

#[test]
fn test_popup_below_anchor_clamped_to_frame_bottom() {
    let anchor = Rect::new(0, 22, 80, 3);

    let popup = popup_below_anchor(FRAME, anchor, 60, 10, 0);

    assert_eq!(popup.y, 25);
    assert_eq!(popup.height, 5);
}

#[test]
fn test_popup_below_anchor_at_frame_bottom_has_no_height() {
    let anchor = Rect::new(0, 27, 80, 3);

    let popup = popup_below_anchor(FRAME, anchor, 60, 10, 0);

    assert_eq!(popup.y, 30);
    assert_eq!(popup.height, 0);
}

#[test]
fn test_inner_rect_saturates() {
    let inner = inner_rect(Rect::new(3, 4, 1, 1));
    assert_eq!(inner, Rect::new(4, 5, 0, 0));
}

#[test]
fn test_row_in_bordered() {
    let area = Rect::new(2, 5, 20, 6);

    assert_eq!(row_in_bordered(area, 3, 6), Some(0));
    assert_eq!(row_in_bordered(area, 10, 9), Some(3));
    // Border cells
    assert_eq!(row_in_bordered(area, 2, 6), None);
    assert_eq!(row_in_bordered(area, 10, 5), None);
    assert_eq!(row_in_bordered(area, 10, 10), None);
    // Outside entirely
    assert_eq!(row_in_bordered(area, 50, 7), None);
}
