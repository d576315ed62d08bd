#![forbid(unsafe_code)]

//! Backdrop effect primitives.
//!
//! A backdrop effect owns animation state and paints whole cells (glyph plus
//! colors) into a caller-owned row-major buffer. Stepping and painting are
//! split: `advance` runs once per animation tick from `update`, `paint` runs
//! once per render from `view` and must not change state. That keeps the
//! animation speed tied to the tick subscription, not to how often the
//! runtime redraws.
//!
//! Design goals:
//! - Deterministic: same seed and same step sequence, same output.
//! - No per-frame allocations: effects reuse internal buffers.
//! - Tiny-area safe: width/height may be zero; must not panic.

use std::cell::RefCell;

use forge_render::cell::{Cell, PackedRgba};
use forge_render::frame::Frame;

pub mod effects;

/// Quality dial for effects, so they can degrade gracefully on big screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FxQuality {
    /// Render nothing; decorative effects are non-essential.
    Off,
    /// Very cheap fallback: update a quarter of the columns per step.
    Minimal,
    /// Update every other column per step.
    Reduced,
    /// Normal detail.
    #[default]
    Full,
}

/// Area (in cells) above which `Full` is clamped to `Reduced`.
pub const FX_AREA_THRESHOLD_FULL_TO_REDUCED: usize = 16_000;

/// Area (in cells) above which `Reduced` is clamped to `Minimal`.
pub const FX_AREA_THRESHOLD_REDUCED_TO_MINIMAL: usize = 64_000;

impl FxQuality {
    /// Clamp quality based on render area size, so per-cell work cannot
    /// blow the frame budget on very large terminals.
    #[inline]
    pub fn clamp_for_area(self, area_cells: usize) -> Self {
        match self {
            Self::Full if area_cells >= FX_AREA_THRESHOLD_REDUCED_TO_MINIMAL => Self::Minimal,
            Self::Full if area_cells >= FX_AREA_THRESHOLD_FULL_TO_REDUCED => Self::Reduced,
            Self::Reduced if area_cells >= FX_AREA_THRESHOLD_REDUCED_TO_MINIMAL => Self::Minimal,
            other => other,
        }
    }
}

/// Resolved theme colors handed to effects.
///
/// The sole theme boundary for FX code: effects consume this struct and
/// never look colors up anywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThemeInputs {
    /// Opaque base background (deepest layer).
    pub bg_base: PackedRgba,
    /// Primary foreground/text color.
    pub fg_primary: PackedRgba,
    /// Muted foreground.
    pub fg_muted: PackedRgba,
    /// Primary accent color.
    pub accent_primary: PackedRgba,
    /// Bright accent, used for highlights such as rain heads.
    pub accent_bright: PackedRgba,
}

impl ThemeInputs {
    pub const fn new(
        bg_base: PackedRgba,
        fg_primary: PackedRgba,
        fg_muted: PackedRgba,
        accent_primary: PackedRgba,
        accent_bright: PackedRgba,
    ) -> Self {
        Self {
            bg_base,
            fg_primary,
            fg_muted,
            accent_primary,
            accent_bright,
        }
    }
}

/// Call-site provided render context.
///
/// Effects paint into a row-major buffer: `out[y * width + x]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FxContext<'a> {
    pub width: u16,
    pub height: u16,
    /// Monotonic step counter.
    pub frame: u64,
    pub quality: FxQuality,
    pub theme: &'a ThemeInputs,
}

impl FxContext<'_> {
    #[inline]
    pub const fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A full-screen background animation.
///
/// Invariants:
/// - Implementations must tolerate `width == 0` or `height == 0`.
/// - `paint` must be a pure function of current state; all stepping
///   happens in `advance`.
/// - `out.len()` equals `ctx.width * ctx.height`; implementations may
///   debug-assert but must stay in bounds regardless.
pub trait BackdropFx {
    /// Name used for debugging and logs.
    fn name(&self) -> &'static str;

    /// Reallocate internal state for a new size.
    fn resize(&mut self, _width: u16, _height: u16) {}

    /// Step the animation once.
    fn advance(&mut self, ctx: &FxContext<'_>);

    /// Paint the current state into `out` (row-major, width * height).
    fn paint(&self, ctx: &FxContext<'_>, out: &mut [Cell]);
}

struct BackdropInner {
    fx: Box<dyn BackdropFx>,
    width: u16,
    height: u16,
}

/// Owns one effect and adapts it to the model/view split.
///
/// `tick` is called from `update` on every animation tick; `paint` is
/// called from `view` and writes the effect over the whole frame. Paint
/// resizes the effect lazily when the frame size changes, which is why the
/// inner state sits behind a `RefCell`: `view` only has `&self`.
pub struct Backdrop {
    inner: RefCell<BackdropInner>,
    theme: ThemeInputs,
    quality: FxQuality,
    frame: u64,
}

impl Backdrop {
    pub fn new(fx: Box<dyn BackdropFx>, theme: ThemeInputs) -> Self {
        Self {
            inner: RefCell::new(BackdropInner {
                fx,
                width: 0,
                height: 0,
            }),
            theme,
            quality: FxQuality::Full,
            frame: 0,
        }
    }

    /// Requested quality; the effective value is clamped per area.
    pub fn set_quality(&mut self, quality: FxQuality) {
        self.quality = quality;
    }

    pub fn quality(&self) -> FxQuality {
        self.quality
    }

    /// Steps taken so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Step the animation once.
    pub fn tick(&mut self) {
        self.frame += 1;
        let inner = self.inner.get_mut();
        let ctx = FxContext {
            width: inner.width,
            height: inner.height,
            frame: self.frame,
            quality: self
                .quality
                .clamp_for_area(inner.width as usize * inner.height as usize),
            theme: &self.theme,
        };
        inner.fx.advance(&ctx);
    }

    /// Paint the effect across the entire frame.
    pub fn paint(&self, frame: &mut Frame) {
        let (width, height) = (frame.width(), frame.height());
        let mut inner = self.inner.borrow_mut();
        if inner.width != width || inner.height != height {
            inner.fx.resize(width, height);
            inner.width = width;
            inner.height = height;
        }
        let ctx = FxContext {
            width,
            height,
            frame: self.frame,
            quality: self
                .quality
                .clamp_for_area(width as usize * height as usize),
            theme: &self.theme,
        };
        inner.fx.paint(&ctx, frame.buffer_mut().cells_mut());
    }
}
