#![forbid(unsafe_code)]

//! Per-render view target.
//!
//! A [`Frame`] is what a model's `view` draws into: a buffer for the cells
//! plus the cursor request for this frame. The runtime creates one per
//! render pass and hands the finished buffer to the presenter.

use crate::buffer::Buffer;
use forge_core::geometry::Rect;

/// The render target for a single frame.
#[derive(Debug, Clone)]
pub struct Frame {
    buffer: Buffer,
    cursor: Option<(u16, u16)>,
}

impl Frame {
    /// Create a blank frame of the given size with the cursor hidden.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            cursor: None,
        }
    }

    /// Frame width in columns.
    #[inline]
    pub fn width(&self) -> u16 {
        self.buffer.width()
    }

    /// Frame height in rows.
    #[inline]
    pub fn height(&self) -> u16 {
        self.buffer.height()
    }

    /// The full frame area.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.buffer.bounds()
    }

    /// The backing buffer.
    #[inline]
    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// The backing buffer, mutable. Widgets render through this.
    #[inline]
    pub fn buffer_mut(&mut self) -> &mut Buffer {
        &mut self.buffer
    }

    /// Request the terminal cursor at a position, or `None` to hide it.
    ///
    /// Out-of-bounds positions are ignored (cursor stays hidden).
    pub fn set_cursor(&mut self, position: Option<(u16, u16)>) {
        self.cursor = position.filter(|&(x, y)| self.bounds().contains(x, y));
    }

    /// The cursor requested for this frame.
    #[inline]
    pub fn cursor(&self) -> Option<(u16, u16)> {
        self.cursor
    }

    /// Consume the frame, yielding the buffer and cursor request.
    pub fn into_parts(self) -> (Buffer, Option<(u16, u16)>) {
        (self.buffer, self.cursor)
    }
}
