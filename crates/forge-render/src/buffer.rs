#![forbid(unsafe_code)]

//! Row-major cell grid.

use crate::cell::Cell;
use forge_core::geometry::Rect;

/// A rectangular grid of [`Cell`]s.
///
/// Coordinates are 0-indexed with the origin at the top-left. All writes are
/// bounds-checked and silently ignored when out of range, so callers can
/// draw optimistically near edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    /// Create a buffer filled with default (blank) cells.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    /// Width in columns.
    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in rows.
    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Full area of the buffer as a [`Rect`] at the origin.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the buffer covers zero cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Read a cell, `None` when out of bounds.
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Mutable cell access, `None` when out of bounds.
    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(move |i| &mut self.cells[i])
    }

    /// Write a cell; out-of-bounds writes are dropped.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Fill a rectangle (clipped to the buffer) with a cell.
    pub fn fill(&mut self, rect: Rect, cell: Cell) {
        let rect = rect.intersection(&self.bounds());
        for y in rect.y..rect.bottom() {
            let row = y as usize * self.width as usize;
            for x in rect.x..rect.right() {
                self.cells[row + x as usize] = cell;
            }
        }
    }

    /// Reset every cell to the default blank cell.
    pub fn clear(&mut self) {
        self.clear_with(Cell::default());
    }

    /// Reset every cell to a given cell.
    pub fn clear_with(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// All cells, row-major.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// All cells, mutable.
    #[inline]
    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// One row of cells.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: u16) -> &[Cell] {
        assert!(y < self.height, "row {y} out of range");
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Resize to new dimensions, discarding old content.
    pub fn resize(&mut self, width: u16, height: u16) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells
            .resize(width as usize * height as usize, Cell::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::PackedRgba;

    #[test]
    fn new_buffer_is_blank() {
        let buf = Buffer::new(4, 3);
        assert_eq!(buf.len(), 12);
        assert!(buf.cells().iter().all(|c| c.is_blank()));
    }

    #[test]
    fn set_and_get_roundtrip() {
        let mut buf = Buffer::new(4, 3);
        let cell = Cell::from_char('X').with_fg(PackedRgba::rgb(0, 255, 65));
        buf.set(2, 1, cell);
        assert_eq!(buf.get(2, 1), Some(&cell));
        assert_eq!(buf.get(0, 0).map(|c| c.ch), Some(' '));
    }

    #[test]
    fn out_of_bounds_access_is_safe() {
        let mut buf = Buffer::new(4, 3);
        assert_eq!(buf.get(4, 0), None);
        assert_eq!(buf.get(0, 3), None);
        buf.set(100, 100, Cell::from_char('x')); // dropped, no panic
        assert!(buf.cells().iter().all(|c| c.is_blank()));
    }

    #[test]
    fn fill_clips_to_bounds() {
        let mut buf = Buffer::new(4, 4);
        buf.fill(Rect::new(2, 2, 10, 10), Cell::from_char('#'));
        assert_eq!(buf.get(2, 2).map(|c| c.ch), Some('#'));
        assert_eq!(buf.get(3, 3).map(|c| c.ch), Some('#'));
        assert_eq!(buf.get(1, 1).map(|c| c.ch), Some(' '));
    }

    #[test]
    fn clear_resets_all_cells() {
        let mut buf = Buffer::new(3, 3);
        buf.fill(buf.bounds(), Cell::from_char('#'));
        buf.clear();
        assert!(buf.cells().iter().all(|c| c.is_blank()));
    }

    #[test]
    fn row_slices_match_grid() {
        let mut buf = Buffer::new(3, 2);
        buf.set(0, 1, Cell::from_char('a'));
        buf.set(2, 1, Cell::from_char('b'));
        let row = buf.row(1);
        assert_eq!(row[0].ch, 'a');
        assert_eq!(row[1].ch, ' ');
        assert_eq!(row[2].ch, 'b');
    }

    #[test]
    fn resize_discards_content() {
        let mut buf = Buffer::new(2, 2);
        buf.set(0, 0, Cell::from_char('x'));
        buf.resize(5, 1);
        assert_eq!(buf.width(), 5);
        assert_eq!(buf.height(), 1);
        assert!(buf.cells().iter().all(|c| c.is_blank()));
    }

    #[test]
    fn zero_area_buffer_is_usable() {
        let mut buf = Buffer::new(0, 0);
        assert!(buf.is_empty());
        buf.set(0, 0, Cell::from_char('x'));
        buf.fill(Rect::new(0, 0, 5, 5), Cell::from_char('y'));
        buf.clear();
    }
}
