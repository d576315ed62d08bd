#![forbid(unsafe_code)]

//! Cell types and invariants.
//!
//! A [`Cell`] is the fundamental unit of the terminal grid: one scalar
//! character plus packed foreground/background colors and attribute flags.
//! Cells are `Copy` and compared bitwise by the diff, so keeping them small
//! matters more than keeping them expressive — grapheme clusters wider than
//! one scalar are out of scope for this renderer.

use bitflags::bitflags;

/// Packed 32-bit RGBA color, straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct PackedRgba(u32);

impl PackedRgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self(0);

    /// Opaque color from RGB components.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Color from RGBA components.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    /// Red channel.
    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Green channel.
    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Blue channel.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Alpha channel (255 = opaque).
    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// Whether the color is fully opaque.
    #[inline]
    pub const fn is_opaque(self) -> bool {
        self.a() == 255
    }

    /// Source-over blend of `self` onto `dst`.
    ///
    /// The result is opaque whenever `dst` is; a fully opaque source simply
    /// replaces the destination.
    #[must_use]
    pub fn over(self, dst: Self) -> Self {
        let sa = self.a() as u32;
        if sa == 255 {
            return self;
        }
        if sa == 0 {
            return dst;
        }
        let da = dst.a() as u32;
        let inv = 255 - sa;
        let blend = |s: u8, d: u8| -> u8 {
            ((s as u32 * sa + d as u32 * inv + 127) / 255) as u8
        };
        let a = (sa + da * inv / 255).min(255) as u8;
        Self::rgba(
            blend(self.r(), dst.r()),
            blend(self.g(), dst.g()),
            blend(self.b(), dst.b()),
            a,
        )
    }

    /// Linear interpolation toward `other` by `t` in [0, 1].
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 { (a as f32 + (b as f32 - a as f32) * t).round() as u8 };
        Self::rgba(
            mix(self.r(), other.r()),
            mix(self.g(), other.g()),
            mix(self.b(), other.b()),
            mix(self.a(), other.a()),
        )
    }

    /// Multiply all channels by `factor` in [0, 1] (alpha preserved).
    #[must_use]
    pub fn scaled(self, factor: f32) -> Self {
        let f = factor.clamp(0.0, 1.0);
        let scale = |c: u8| -> u8 { (c as f32 * f).round() as u8 };
        Self::rgba(scale(self.r()), scale(self.g()), scale(self.b()), self.a())
    }
}

bitflags! {
    /// Style attribute flags carried per cell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellAttrs: u8 {
        const BOLD      = 0b0000_0001;
        const DIM       = 0b0000_0010;
        const ITALIC    = 0b0000_0100;
        const UNDERLINE = 0b0000_1000;
        const REVERSE   = 0b0001_0000;
    }
}

/// One terminal grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Displayed character.
    pub ch: char,
    /// Foreground color.
    pub fg: PackedRgba,
    /// Background color.
    pub bg: PackedRgba,
    /// Attribute flags.
    pub attrs: CellAttrs,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: PackedRgba::rgb(200, 200, 200),
            bg: PackedRgba::rgb(0, 0, 0),
            attrs: CellAttrs::empty(),
        }
    }
}

impl Cell {
    /// A default-styled cell showing `c`.
    #[must_use]
    pub fn from_char(c: char) -> Self {
        Self {
            ch: c,
            ..Self::default()
        }
    }

    /// Builder: replace the character.
    #[must_use]
    pub fn with_char(mut self, c: char) -> Self {
        self.ch = c;
        self
    }

    /// Builder: replace the foreground.
    #[must_use]
    pub const fn with_fg(mut self, fg: PackedRgba) -> Self {
        self.fg = fg;
        self
    }

    /// Builder: replace the background.
    #[must_use]
    pub const fn with_bg(mut self, bg: PackedRgba) -> Self {
        self.bg = bg;
        self
    }

    /// Builder: replace the attribute flags.
    #[must_use]
    pub const fn with_attrs(mut self, attrs: CellAttrs) -> Self {
        self.attrs = attrs;
        self
    }

    /// Whether the cell renders as styled blank space.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.ch == ' ' && self.attrs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_roundtrips_channels() {
        let c = PackedRgba::rgba(1, 2, 3, 4);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (1, 2, 3, 4));
        assert!(!c.is_opaque());
        assert!(PackedRgba::rgb(9, 9, 9).is_opaque());
    }

    #[test]
    fn over_opaque_source_replaces() {
        let src = PackedRgba::rgb(10, 20, 30);
        let dst = PackedRgba::rgb(200, 200, 200);
        assert_eq!(src.over(dst), src);
    }

    #[test]
    fn over_transparent_source_keeps_destination() {
        let dst = PackedRgba::rgb(200, 100, 50);
        assert_eq!(PackedRgba::TRANSPARENT.over(dst), dst);
    }

    #[test]
    fn over_half_alpha_mixes() {
        let src = PackedRgba::rgba(255, 0, 0, 128);
        let dst = PackedRgba::rgb(0, 0, 0);
        let out = src.over(dst);
        // Roughly half red; exact value depends on integer rounding.
        assert!(out.r() > 120 && out.r() < 135, "got r={}", out.r());
        assert_eq!(out.g(), 0);
        assert!(out.is_opaque());
    }

    #[test]
    fn lerp_endpoints_are_exact() {
        let a = PackedRgba::rgb(0, 0, 0);
        let b = PackedRgba::rgb(255, 255, 255);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 2.0), b); // clamped
    }

    #[test]
    fn scaled_darkens_preserving_alpha() {
        let c = PackedRgba::rgba(100, 200, 50, 77);
        let half = c.scaled(0.5);
        assert_eq!(half.r(), 50);
        assert_eq!(half.g(), 100);
        assert_eq!(half.b(), 25);
        assert_eq!(half.a(), 77);
    }

    #[test]
    fn cell_default_is_blank_space() {
        let cell = Cell::default();
        assert_eq!(cell.ch, ' ');
        assert!(cell.is_blank());
        assert!(!Cell::from_char('x').is_blank());
    }

    #[test]
    fn cell_builders_compose() {
        let cell = Cell::from_char('A')
            .with_fg(PackedRgba::rgb(0, 255, 65))
            .with_bg(PackedRgba::rgb(0, 0, 0))
            .with_attrs(CellAttrs::BOLD | CellAttrs::UNDERLINE);
        assert_eq!(cell.ch, 'A');
        assert!(cell.attrs.contains(CellAttrs::BOLD));
        assert!(cell.attrs.contains(CellAttrs::UNDERLINE));
        assert!(!cell.attrs.contains(CellAttrs::DIM));
    }
}
