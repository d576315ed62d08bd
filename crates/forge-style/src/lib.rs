#![forbid(unsafe_code)]

//! Styling overlay for widgets.
//!
//! A [`Style`] is a partial cell override: each slot is optional, and
//! applying a style only touches the slots that are set. Widgets take
//! styles by value and layer them onto whatever is already in the buffer,
//! which is what lets text sit on top of the animated backdrop without
//! erasing it.

use forge_render::cell::{Cell, CellAttrs, PackedRgba};

/// Partial cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground override.
    pub fg: Option<PackedRgba>,
    /// Background override.
    pub bg: Option<PackedRgba>,
    /// Attribute override (replaces, does not merge).
    pub attrs: Option<CellAttrs>,
}

impl Style {
    /// The empty style (no overrides).
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: None,
        }
    }

    /// Builder: set the foreground.
    #[must_use]
    pub const fn fg(mut self, color: PackedRgba) -> Self {
        self.fg = Some(color);
        self
    }

    /// Builder: set the background.
    #[must_use]
    pub const fn bg(mut self, color: PackedRgba) -> Self {
        self.bg = Some(color);
        self
    }

    /// Builder: set the attribute flags.
    #[must_use]
    pub const fn attrs(mut self, attrs: CellAttrs) -> Self {
        self.attrs = Some(attrs);
        self
    }

    /// Builder: add a flag to the attribute override.
    #[must_use]
    pub fn with_flag(mut self, flag: CellAttrs) -> Self {
        self.attrs = Some(self.attrs.unwrap_or_else(CellAttrs::empty) | flag);
        self
    }

    /// Builder: bold text.
    #[must_use]
    pub fn bold(self) -> Self {
        self.with_flag(CellAttrs::BOLD)
    }

    /// Builder: dim text.
    #[must_use]
    pub fn dim(self) -> Self {
        self.with_flag(CellAttrs::DIM)
    }

    /// Builder: underlined text.
    #[must_use]
    pub fn underline(self) -> Self {
        self.with_flag(CellAttrs::UNDERLINE)
    }

    /// Builder: reverse video.
    #[must_use]
    pub fn reverse(self) -> Self {
        self.with_flag(CellAttrs::REVERSE)
    }

    /// Whether the style overrides nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attrs.is_none()
    }

    /// Overlay this style onto a cell, touching only the set slots.
    pub fn apply(&self, cell: &mut Cell) {
        if let Some(fg) = self.fg {
            cell.fg = fg;
        }
        if let Some(bg) = self.bg {
            cell.bg = bg;
        }
        if let Some(attrs) = self.attrs {
            cell.attrs = attrs;
        }
    }

    /// Merge another style over this one; `other`'s set slots win.
    #[must_use]
    pub fn patched(mut self, other: Style) -> Self {
        if other.fg.is_some() {
            self.fg = other.fg;
        }
        if other.bg.is_some() {
            self.bg = other.bg;
        }
        if other.attrs.is_some() {
            self.attrs = other.attrs;
        }
        self
    }
}
