#![forbid(unsafe_code)]

//! Terminal output stage.
//!
//! The presenter owns the last buffer that reached the screen. Each
//! `present` call diffs against it and queues the minimal crossterm command
//! stream: cursor moves, pen changes, and printed runs. Only one presenter
//! may write to a terminal (one-writer rule); interleaving other output
//! corrupts the diff state, which is why logs go to a file.

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::queue;
use crossterm::style::{
    Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{Clear, ClearType};

use crate::buffer::Buffer;
use crate::cell::{Cell, CellAttrs, PackedRgba};
use crate::diff::BufferDiff;

/// Tracks the terminal's current pen so redundant escapes are skipped.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Pen {
    fg: Option<PackedRgba>,
    bg: Option<PackedRgba>,
    attrs: Option<CellAttrs>,
}

impl Pen {
    fn apply(&mut self, out: &mut impl Write, cell: &Cell) -> io::Result<()> {
        // An attribute change resets the pen entirely: SGR reset clears
        // colors too, so both must be re-emitted afterwards.
        if self.attrs != Some(cell.attrs) {
            queue!(out, SetAttribute(Attribute::Reset))?;
            if cell.attrs.contains(CellAttrs::BOLD) {
                queue!(out, SetAttribute(Attribute::Bold))?;
            }
            if cell.attrs.contains(CellAttrs::DIM) {
                queue!(out, SetAttribute(Attribute::Dim))?;
            }
            if cell.attrs.contains(CellAttrs::ITALIC) {
                queue!(out, SetAttribute(Attribute::Italic))?;
            }
            if cell.attrs.contains(CellAttrs::UNDERLINE) {
                queue!(out, SetAttribute(Attribute::Underlined))?;
            }
            if cell.attrs.contains(CellAttrs::REVERSE) {
                queue!(out, SetAttribute(Attribute::Reverse))?;
            }
            self.attrs = Some(cell.attrs);
            self.fg = None;
            self.bg = None;
        }
        if self.fg != Some(cell.fg) {
            queue!(out, SetForegroundColor(to_crossterm(cell.fg)))?;
            self.fg = Some(cell.fg);
        }
        if self.bg != Some(cell.bg) {
            queue!(out, SetBackgroundColor(to_crossterm(cell.bg)))?;
            self.bg = Some(cell.bg);
        }
        Ok(())
    }
}

fn to_crossterm(color: PackedRgba) -> Color {
    Color::Rgb {
        r: color.r(),
        g: color.g(),
        b: color.b(),
    }
}

/// Double-buffered presenter.
#[derive(Debug, Default)]
pub struct Presenter {
    prev: Option<Buffer>,
}

impl Presenter {
    /// Create a presenter with no presented frame yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previously presented buffer, forcing the next `present`
    /// to repaint everything. Call after anything else touched the screen.
    pub fn invalidate(&mut self) {
        self.prev = None;
    }

    /// Diff `buffer` against the last presented frame and write the
    /// resulting command stream to `out`.
    pub fn present(
        &mut self,
        buffer: &Buffer,
        cursor: Option<(u16, u16)>,
        out: &mut impl Write,
    ) -> io::Result<()> {
        let diff = match &self.prev {
            Some(prev) => BufferDiff::compute(prev, buffer),
            None => BufferDiff::full(buffer),
        };

        if diff.is_noop() && !diff.full_redraw {
            self.sync_cursor(cursor, out)?;
            out.flush()?;
            self.prev = Some(buffer.clone());
            return Ok(());
        }

        tracing::trace!(
            runs = diff.runs.len(),
            cells = diff.cell_count(),
            full = diff.full_redraw,
            "presenting frame"
        );

        queue!(out, Hide)?;
        if diff.full_redraw {
            queue!(out, SetAttribute(Attribute::Reset), Clear(ClearType::All))?;
        }

        let mut pen = Pen::default();
        for run in &diff.runs {
            queue!(out, MoveTo(run.x, run.y))?;
            for cell in &run.cells {
                pen.apply(out, cell)?;
                queue!(out, Print(cell.ch))?;
            }
        }

        self.sync_cursor(cursor, out)?;
        out.flush()?;
        self.prev = Some(buffer.clone());
        Ok(())
    }

    fn sync_cursor(&self, cursor: Option<(u16, u16)>, out: &mut impl Write) -> io::Result<()> {
        match cursor {
            Some((x, y)) => queue!(out, MoveTo(x, y), Show),
            None => queue!(out, Hide),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;

    #[test]
    fn first_present_paints_everything() {
        let mut presenter = Presenter::new();
        let buf = Buffer::new(4, 2);
        let mut out = Vec::new();
        presenter.present(&buf, None, &mut out).unwrap();
        assert!(!out.is_empty(), "first frame must be a full paint");
    }

    #[test]
    fn unchanged_frame_emits_no_paint_commands() {
        let mut presenter = Presenter::new();
        let buf = Buffer::new(4, 2);
        let mut first = Vec::new();
        presenter.present(&buf, None, &mut first).unwrap();

        let mut second = Vec::new();
        presenter.present(&buf, None, &mut second).unwrap();
        // Only the cursor-hide escape remains; far smaller than a paint.
        assert!(second.len() < first.len());
    }

    #[test]
    fn changed_cell_is_repainted() {
        let mut presenter = Presenter::new();
        let mut buf = Buffer::new(4, 2);
        let mut out = Vec::new();
        presenter.present(&buf, None, &mut out).unwrap();

        buf.set(1, 1, Cell::from_char('Q'));
        let mut out = Vec::new();
        presenter.present(&buf, None, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains('Q'));
    }

    #[test]
    fn invalidate_forces_full_repaint() {
        let mut presenter = Presenter::new();
        let buf = Buffer::new(4, 2);
        let mut out = Vec::new();
        presenter.present(&buf, None, &mut out).unwrap();

        presenter.invalidate();
        let mut repaint = Vec::new();
        presenter.present(&buf, None, &mut repaint).unwrap();
        assert!(!repaint.is_empty());
    }

    #[test]
    fn cursor_request_shows_cursor() {
        let mut presenter = Presenter::new();
        let buf = Buffer::new(4, 2);
        let mut out = Vec::new();
        presenter.present(&buf, Some((2, 1)), &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        // `CSI ? 25 h` is the show-cursor sequence.
        assert!(text.contains("\x1b[?25h"));
    }
}
