#![forbid(unsafe_code)]

//! Widgets for TokenForge.
//!
//! A widget is a stateless (or externally-stated) renderer: given an area
//! and a frame, it paints cells. Widgets overlay what is already in the
//! buffer rather than clearing it, so panels and text can sit on top of an
//! animated backdrop.

pub mod block;
pub mod input;
pub mod paragraph;

use forge_core::geometry::Rect;
use forge_render::cell::Cell;
use forge_render::frame::Frame;
use forge_style::Style;
use unicode_width::UnicodeWidthChar;

pub use block::{Block, Borders};
pub use input::TextInput;
pub use paragraph::{Line, Paragraph, Span};

/// Anything that can paint itself into a region of a frame.
pub trait Widget {
    /// Render into `area`. Out-of-bounds drawing is clipped, not an error.
    fn render(&self, area: Rect, frame: &mut Frame);
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Display width of a string in terminal cells.
#[must_use]
pub fn text_width(text: &str) -> usize {
    text.chars().filter_map(UnicodeWidthChar::width).sum()
}

/// Draw `text` starting at `(x, y)`, clipped to `max_width` cells.
///
/// Only the styled slots of `style` are applied, so text inherits the
/// backdrop's background when the style leaves `bg` unset. Returns the
/// number of cells advanced.
pub fn draw_text(frame: &mut Frame, x: u16, y: u16, max_width: u16, text: &str, style: Style) -> u16 {
    let buf = frame.buffer_mut();
    let mut col = x;
    let end = x.saturating_add(max_width);
    for ch in text.chars() {
        let Some(w) = ch.width() else { continue };
        if w == 0 {
            continue;
        }
        let w = w as u16;
        if col.saturating_add(w) > end {
            break;
        }
        if let Some(cell) = buf.get_mut(col, y) {
            *cell = cell.with_char(ch);
            style.apply(cell);
        }
        // A wide character owns its spacer cell too.
        for pad in 1..w {
            if let Some(cell) = buf.get_mut(col + pad, y) {
                *cell = cell.with_char(' ');
                style.apply(cell);
            }
        }
        col += w;
    }
    col - x
}

/// Draw `text` on row `y` of `area` with the given alignment, clipped.
pub fn draw_text_aligned(
    frame: &mut Frame,
    area: Rect,
    y: u16,
    text: &str,
    style: Style,
    align: Alignment,
) {
    if area.is_empty() || y >= area.bottom() {
        return;
    }
    let width = text_width(text).min(area.width as usize) as u16;
    let x = match align {
        Alignment::Left => area.x,
        Alignment::Center => area.x + (area.width - width) / 2,
        Alignment::Right => area.x + (area.width - width),
    };
    draw_text(frame, x, y, area.width - (x - area.x), text, style);
}

/// Fill every cell of `area` with `cell`.
pub fn fill_area(frame: &mut Frame, area: Rect, cell: Cell) {
    let buf = frame.buffer_mut();
    for y in area.y..area.bottom() {
        for x in area.x..area.right() {
            buf.set(x, y, cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forge_render::cell::PackedRgba;

    fn frame() -> Frame {
        Frame::new(10, 3)
    }

    #[test]
    fn draw_text_writes_and_clips() {
        let mut f = frame();
        let advanced = draw_text(&mut f, 7, 0, 3, "hello", Style::new());
        assert_eq!(advanced, 3);
        let buf = f.buffer();
        assert_eq!(buf.get(7, 0).unwrap().ch, 'h');
        assert_eq!(buf.get(9, 0).unwrap().ch, 'l');
    }

    #[test]
    fn draw_text_preserves_backdrop_background() {
        let mut f = frame();
        let backdrop = Cell::from_char('.').with_bg(PackedRgba::rgb(0, 40, 0));
        f.buffer_mut().set(0, 0, backdrop);
        draw_text(
            &mut f,
            0,
            0,
            5,
            "X",
            Style::new().fg(PackedRgba::rgb(0, 255, 65)),
        );
        let cell = f.buffer().get(0, 0).unwrap();
        assert_eq!(cell.ch, 'X');
        assert_eq!(cell.bg, PackedRgba::rgb(0, 40, 0));
    }

    #[test]
    fn draw_text_aligned_centers() {
        let mut f = frame();
        let area = Rect::from_size(10, 3);
        draw_text_aligned(&mut f, area, 1, "ab", Style::new(), Alignment::Center);
        assert_eq!(f.buffer().get(4, 1).unwrap().ch, 'a');
        assert_eq!(f.buffer().get(5, 1).unwrap().ch, 'b');
    }

    #[test]
    fn draw_text_aligned_right_edge() {
        let mut f = frame();
        let area = Rect::from_size(10, 3);
        draw_text_aligned(&mut f, area, 0, "end", Style::new(), Alignment::Right);
        assert_eq!(f.buffer().get(7, 0).unwrap().ch, 'e');
        assert_eq!(f.buffer().get(9, 0).unwrap().ch, 'd');
    }

    #[test]
    fn text_width_counts_cells() {
        assert_eq!(text_width("abc"), 3);
        assert_eq!(text_width(""), 0);
    }

    #[test]
    fn fill_area_covers_exactly_the_area() {
        let mut f = frame();
        fill_area(&mut f, Rect::new(1, 1, 2, 1), Cell::from_char('#'));
        assert_eq!(f.buffer().get(1, 1).unwrap().ch, '#');
        assert_eq!(f.buffer().get(2, 1).unwrap().ch, '#');
        assert_eq!(f.buffer().get(3, 1).unwrap().ch, ' ');
        assert_eq!(f.buffer().get(1, 0).unwrap().ch, ' ');
    }
}
