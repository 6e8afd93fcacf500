use ratatui::{Frame, layout::Rect, widgets::Clear};

/// Place a popup directly under `anchor`, clamped to `frame_area`
///
/// The popup shrinks rather than run past the bottom or right edge.
pub fn popup_below_anchor(
    frame_area: Rect,
    anchor: Rect,
    width: u16,
    height: u16,
    x_offset: u16,
) -> Rect {
    let popup_x = anchor.x.saturating_add(x_offset);
    let popup_y = anchor.y.saturating_add(anchor.height);

    let frame_right = frame_area.x.saturating_add(frame_area.width);
    let frame_bottom = frame_area.y.saturating_add(frame_area.height);

    Rect {
        x: popup_x,
        y: popup_y.min(frame_bottom),
        width: width
            .min(anchor.width.saturating_sub(x_offset * 2))
            .min(frame_right.saturating_sub(popup_x)),
        height: height.min(frame_bottom.saturating_sub(popup_y)),
    }
}

/// Area inside a one-cell border
pub fn inner_rect(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

/// Row offset of `(column, row)` inside the bordered `area`, if it is inside
pub fn row_in_bordered(area: Rect, column: u16, row: u16) -> Option<u16> {
    let inner = inner_rect(area);
    let inside = column >= inner.x
        && column < inner.x.saturating_add(inner.width)
        && row >= inner.y
        && row < inner.y.saturating_add(inner.height);
    inside.then(|| row - inner.y)
}

pub fn clear_area(frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);
}

#[cfg(test)]
#[path = "popup_tests.rs"]
mod popup_tests;
