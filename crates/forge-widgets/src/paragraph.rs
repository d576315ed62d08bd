#![forbid(unsafe_code)]

//! Multi-line styled text.

use forge_core::geometry::Rect;
use forge_render::frame::Frame;
use forge_style::Style;

use crate::{Alignment, Widget, draw_text, text_width};

/// A run of text with one style.
#[derive(Debug, Clone, Default)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

impl Span {
    /// Unstyled text.
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Style::new(),
        }
    }

    /// Styled text.
    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// One row of spans.
#[derive(Debug, Clone, Default)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    /// An empty line.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A line of unstyled text.
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            spans: vec![Span::raw(text)],
        }
    }

    /// A line with one style throughout.
    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            spans: vec![Span::styled(text, style)],
        }
    }

    /// A line built from spans.
    pub fn from_spans(spans: impl IntoIterator<Item = Span>) -> Self {
        Self {
            spans: spans.into_iter().collect(),
        }
    }

    /// Display width in cells.
    #[must_use]
    pub fn width(&self) -> usize {
        self.spans.iter().map(|s| text_width(&s.text)).sum()
    }
}

impl From<&str> for Line {
    fn from(text: &str) -> Self {
        Line::raw(text)
    }
}

impl From<String> for Line {
    fn from(text: String) -> Self {
        Line::raw(text)
    }
}

/// A block of lines rendered top to bottom, clipped to its area.
#[derive(Debug, Clone, Default)]
pub struct Paragraph {
    lines: Vec<Line>,
    alignment: Alignment,
}

impl Paragraph {
    /// Paragraph from anything line-convertible.
    pub fn new(lines: impl IntoIterator<Item = impl Into<Line>>) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            alignment: Alignment::Left,
        }
    }

    /// Set the horizontal alignment of every line.
    #[must_use]
    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Number of lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

impl Widget for Paragraph {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        for (row, line) in self.lines.iter().enumerate() {
            if row as u16 >= area.height {
                break;
            }
            let y = area.y + row as u16;
            let width = (line.width() as u16).min(area.width);
            let mut x = match self.alignment {
                Alignment::Left => area.x,
                Alignment::Center => area.x + (area.width - width) / 2,
                Alignment::Right => area.x + (area.width - width),
            };
            let mut remaining = area.right().saturating_sub(x);
            for span in &line.spans {
                if remaining == 0 {
                    break;
                }
                let advanced = draw_text(frame, x, y, remaining, &span.text, span.style);
                x += advanced;
                remaining -= advanced;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forge_render::cell::PackedRgba;

    fn text_at(frame: &Frame, y: u16, width: u16) -> String {
        (0..width)
            .map(|x| frame.buffer().get(x, y).unwrap().ch)
            .collect()
    }

    #[test]
    fn lines_render_top_to_bottom() {
        let mut f = Frame::new(8, 3);
        Paragraph::new(["one", "two"]).render(Rect::from_size(8, 3), &mut f);
        assert_eq!(text_at(&f, 0, 3), "one");
        assert_eq!(text_at(&f, 1, 3), "two");
    }

    #[test]
    fn spans_carry_their_own_styles() {
        let green = Style::new().fg(PackedRgba::rgb(0, 255, 65));
        let mut f = Frame::new(8, 1);
        let line = Line::from_spans([Span::raw("a"), Span::styled("b", green)]);
        Paragraph::new([line]).render(Rect::from_size(8, 1), &mut f);
        let buf = f.buffer();
        assert_ne!(buf.get(0, 0).unwrap().fg, PackedRgba::rgb(0, 255, 65));
        assert_eq!(buf.get(1, 0).unwrap().fg, PackedRgba::rgb(0, 255, 65));
    }

    #[test]
    fn centered_alignment_applies_per_line() {
        let mut f = Frame::new(7, 1);
        Paragraph::new(["abc"])
            .alignment(Alignment::Center)
            .render(Rect::from_size(7, 1), &mut f);
        assert_eq!(text_at(&f, 0, 7), "  abc  ");
    }

    #[test]
    fn overflow_lines_are_clipped() {
        let mut f = Frame::new(5, 1);
        Paragraph::new(["first", "second"]).render(Rect::from_size(5, 1), &mut f);
        assert_eq!(text_at(&f, 0, 5), "first");
    }

    #[test]
    fn line_width_sums_spans() {
        let line = Line::from_spans([Span::raw("ab"), Span::raw("cde")]);
        assert_eq!(line.width(), 5);
    }
}
