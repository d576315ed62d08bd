#![forbid(unsafe_code)]

//! Bordered panel chrome.

use bitflags::bitflags;
use forge_core::geometry::Rect;
use forge_render::frame::Frame;
use forge_style::Style;

use crate::{Alignment, Widget, draw_text};

bitflags! {
    /// Which edges of a [`Block`] get a border.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Borders: u8 {
        const TOP    = 0b0001;
        const RIGHT  = 0b0010;
        const BOTTOM = 0b0100;
        const LEFT   = 0b1000;
        const ALL    = 0b1111;
    }
}

/// A panel frame with optional borders and a title on the top edge.
///
/// Only border (and title) cells are written; the interior is left alone so
/// the backdrop shows through.
#[derive(Debug, Clone, Default)]
pub struct Block {
    borders: Borders,
    border_style: Style,
    title: Option<String>,
    title_style: Style,
    title_alignment: Alignment,
}

impl Block {
    /// A block with no borders.
    pub fn new() -> Self {
        Self::default()
    }

    /// A block with all four borders.
    pub fn bordered() -> Self {
        Self::new().borders(Borders::ALL)
    }

    /// Set which borders to draw.
    #[must_use]
    pub fn borders(mut self, borders: Borders) -> Self {
        self.borders = borders;
        self
    }

    /// Style for the border characters.
    #[must_use]
    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    /// Title shown on the top border.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Style for the title text.
    #[must_use]
    pub fn title_style(mut self, style: Style) -> Self {
        self.title_style = style;
        self
    }

    /// Horizontal alignment of the title.
    #[must_use]
    pub fn title_alignment(mut self, alignment: Alignment) -> Self {
        self.title_alignment = alignment;
        self
    }

    /// The area remaining inside the borders.
    pub fn inner(&self, area: Rect) -> Rect {
        let mut inner = area;
        if self.borders.contains(Borders::LEFT) {
            inner.x = inner.x.saturating_add(1);
            inner.width = inner.width.saturating_sub(1);
        }
        if self.borders.contains(Borders::TOP) {
            inner.y = inner.y.saturating_add(1);
            inner.height = inner.height.saturating_sub(1);
        }
        if self.borders.contains(Borders::RIGHT) {
            inner.width = inner.width.saturating_sub(1);
        }
        if self.borders.contains(Borders::BOTTOM) {
            inner.height = inner.height.saturating_sub(1);
        }
        inner
    }

    fn put(&self, frame: &mut Frame, x: u16, y: u16, ch: char) {
        if let Some(cell) = frame.buffer_mut().get_mut(x, y) {
            *cell = cell.with_char(ch);
            self.border_style.apply(cell);
        }
    }
}

impl Widget for Block {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        let right = area.right() - 1;
        let bottom = area.bottom() - 1;

        if self.borders.contains(Borders::TOP) {
            for x in area.x..=right {
                self.put(frame, x, area.y, '─');
            }
        }
        if self.borders.contains(Borders::BOTTOM) && area.height > 1 {
            for x in area.x..=right {
                self.put(frame, x, bottom, '─');
            }
        }
        if self.borders.contains(Borders::LEFT) {
            for y in area.y..=bottom {
                self.put(frame, area.x, y, '│');
            }
        }
        if self.borders.contains(Borders::RIGHT) && area.width > 1 {
            for y in area.y..=bottom {
                self.put(frame, right, y, '│');
            }
        }

        if self.borders.contains(Borders::TOP | Borders::LEFT) {
            self.put(frame, area.x, area.y, '┌');
        }
        if self.borders.contains(Borders::TOP | Borders::RIGHT) {
            self.put(frame, right, area.y, '┐');
        }
        if self.borders.contains(Borders::BOTTOM | Borders::LEFT) {
            self.put(frame, area.x, bottom, '└');
        }
        if self.borders.contains(Borders::BOTTOM | Borders::RIGHT) {
            self.put(frame, right, bottom, '┘');
        }

        if let Some(title) = &self.title {
            // Leave the corner cells alone.
            let avail = area.width.saturating_sub(4);
            if avail > 0 {
                let text = format!(" {title} ");
                let width = (crate::text_width(&text) as u16).min(avail);
                let x = match self.title_alignment {
                    Alignment::Left => area.x + 2,
                    Alignment::Center => area.x + 2 + (avail - width) / 2,
                    Alignment::Right => area.x + 2 + (avail - width),
                };
                draw_text(frame, x, area.y, width, &text, self.title_style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ch(frame: &Frame, x: u16, y: u16) -> char {
        frame.buffer().get(x, y).unwrap().ch
    }

    #[test]
    fn bordered_block_draws_corners_and_edges() {
        let mut f = Frame::new(6, 4);
        Block::bordered().render(Rect::from_size(6, 4), &mut f);
        assert_eq!(ch(&f, 0, 0), '┌');
        assert_eq!(ch(&f, 5, 0), '┐');
        assert_eq!(ch(&f, 0, 3), '└');
        assert_eq!(ch(&f, 5, 3), '┘');
        assert_eq!(ch(&f, 2, 0), '─');
        assert_eq!(ch(&f, 0, 2), '│');
        // Interior untouched.
        assert_eq!(ch(&f, 2, 1), ' ');
    }

    #[test]
    fn inner_shrinks_by_active_borders() {
        let area = Rect::from_size(10, 6);
        assert_eq!(Block::bordered().inner(area), Rect::new(1, 1, 8, 4));
        assert_eq!(
            Block::new().borders(Borders::TOP).inner(area),
            Rect::new(0, 1, 10, 5)
        );
        assert_eq!(Block::new().inner(area), area);
    }

    #[test]
    fn title_lands_on_top_border() {
        let mut f = Frame::new(12, 3);
        Block::bordered()
            .title("ok")
            .render(Rect::from_size(12, 3), &mut f);
        assert_eq!(ch(&f, 2, 0), ' ');
        assert_eq!(ch(&f, 3, 0), 'o');
        assert_eq!(ch(&f, 4, 0), 'k');
        assert_eq!(ch(&f, 5, 0), ' ');
    }

    #[test]
    fn tiny_areas_do_not_panic() {
        let mut f = Frame::new(3, 3);
        Block::bordered().render(Rect::from_size(1, 1), &mut f);
        Block::bordered().render(Rect::default(), &mut f);
        assert_ne!(ch(&f, 0, 0), ' ');
    }
}
