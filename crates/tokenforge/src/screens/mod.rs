#![forbid(unsafe_code)]

//! Per-step form views.

pub mod economics;
pub mod identity;
pub mod review;
pub mod success;

use forge_core::geometry::Rect;
use forge_render::frame::Frame;
use forge_widgets::{TextInput, Widget, draw_text};

use crate::theme;

/// Draw a labelled input: label row, value row. Returns rows consumed.
pub(crate) fn draw_field(
    frame: &mut Frame,
    area: Rect,
    y: u16,
    label: &str,
    input: &TextInput,
) -> u16 {
    if y + 1 >= area.bottom() {
        return 0;
    }
    let label_style = if input.is_focused() {
        theme::title()
    } else {
        theme::dim()
    };
    draw_text(frame, area.x, y, area.width, label, label_style);

    let marker = if input.is_focused() { "▸ " } else { "  " };
    let marker_w = draw_text(frame, area.x, y + 1, area.width, marker, theme::text());
    let field_area = Rect::new(
        area.x + marker_w,
        y + 1,
        area.width.saturating_sub(marker_w),
        1,
    );
    input.render(field_area, frame);
    3
}

#[cfg(test)]
mod tests {
    use super::*;
    use forge_widgets::TextInput;

    fn row(frame: &Frame, y: u16, width: u16) -> String {
        (0..width)
            .map(|x| frame.buffer().get(x, y).map_or(' ', |c| c.ch))
            .collect()
    }

    #[test]
    fn field_draws_label_marker_and_value() {
        let mut frame = Frame::new(20, 4);
        let input = TextInput::new().with_value("ETH").with_focused(true);
        let used = draw_field(&mut frame, Rect::from_size(20, 4), 0, "SYMBOL", &input);
        assert_eq!(used, 3);
        assert!(row(&frame, 0, 20).starts_with("SYMBOL"));
        assert!(row(&frame, 1, 20).starts_with("▸ ETH"));
    }

    #[test]
    fn unfocused_field_has_no_marker() {
        let mut frame = Frame::new(20, 4);
        let input = TextInput::new().with_value("ETH");
        draw_field(&mut frame, Rect::from_size(20, 4), 0, "SYMBOL", &input);
        assert!(row(&frame, 1, 20).starts_with("  ETH"));
    }

    #[test]
    fn field_out_of_room_is_skipped() {
        let mut frame = Frame::new(20, 2);
        let input = TextInput::new();
        let used = draw_field(&mut frame, Rect::from_size(20, 2), 1, "SYMBOL", &input);
        assert_eq!(used, 0);
    }
}
