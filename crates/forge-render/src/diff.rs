#![forbid(unsafe_code)]

//! Frame-to-frame buffer diffing.
//!
//! The presenter never repaints the whole screen when it can avoid it: it
//! compares the previous presented buffer against the next one and emits
//! only horizontal runs of changed cells. A dimension change always forces
//! a full redraw since positions are not comparable across sizes.

use crate::buffer::Buffer;
use crate::cell::Cell;

/// A horizontal run of cells to repaint, starting at `(x, y)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffRun {
    /// Start column.
    pub x: u16,
    /// Row.
    pub y: u16,
    /// Replacement cells, left to right.
    pub cells: Vec<Cell>,
}

/// The set of changes between two buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferDiff {
    /// Changed runs in row-major order.
    pub runs: Vec<DiffRun>,
    /// Whether the diff represents a full repaint (size change or first frame).
    pub full_redraw: bool,
}

impl BufferDiff {
    /// Diff `next` against `prev`.
    pub fn compute(prev: &Buffer, next: &Buffer) -> Self {
        if prev.width() != next.width() || prev.height() != next.height() {
            return Self::full(next);
        }

        let mut runs = Vec::new();
        for y in 0..next.height() {
            let prev_row = prev.row(y);
            let next_row = next.row(y);
            let mut x = 0usize;
            while x < next_row.len() {
                if prev_row[x] == next_row[x] {
                    x += 1;
                    continue;
                }
                let start = x;
                while x < next_row.len() && prev_row[x] != next_row[x] {
                    x += 1;
                }
                runs.push(DiffRun {
                    x: start as u16,
                    y,
                    cells: next_row[start..x].to_vec(),
                });
            }
        }

        Self {
            runs,
            full_redraw: false,
        }
    }

    /// A diff that repaints every row of `next`.
    pub fn full(next: &Buffer) -> Self {
        let runs = (0..next.height())
            .filter(|_| next.width() > 0)
            .map(|y| DiffRun {
                x: 0,
                y,
                cells: next.row(y).to_vec(),
            })
            .collect();
        Self {
            runs,
            full_redraw: true,
        }
    }

    /// Whether nothing needs repainting.
    pub fn is_noop(&self) -> bool {
        self.runs.is_empty()
    }

    /// Total number of cells touched.
    pub fn cell_count(&self) -> usize {
        self.runs.iter().map(|r| r.cells.len()).sum()
    }
}
