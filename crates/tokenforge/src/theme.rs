#![forbid(unsafe_code)]

//! Terminal-green theme shared across the UI.

use forge_extras::ThemeInputs;
use forge_render::cell::PackedRgba;
use forge_style::Style;

/// Fee recipient shown on the info panel. Display-only; nothing in the
/// program ever uses it in a computation.
pub const FEE_ADDRESS: &str = "0x928a8918D31941FB6b7b1F5456964A8bcbCB2435";

pub const BG: PackedRgba = PackedRgba::rgb(0, 0, 0);
pub const GREEN: PackedRgba = PackedRgba::rgb(0, 255, 65);
pub const GREEN_DIM: PackedRgba = PackedRgba::rgb(0, 130, 45);
pub const GREEN_DARK: PackedRgba = PackedRgba::rgb(0, 70, 25);
pub const RAIN_HEAD: PackedRgba = PackedRgba::rgb(200, 255, 200);
pub const TEXT_BRIGHT: PackedRgba = PackedRgba::rgb(220, 255, 220);
pub const AMBER: PackedRgba = PackedRgba::rgb(255, 176, 0);

/// Theme slots consumed by the backdrop.
pub const fn backdrop_inputs() -> ThemeInputs {
    ThemeInputs::new(BG, GREEN, GREEN_DARK, GREEN, RAIN_HEAD)
}

/// Regular body text.
pub fn text() -> Style {
    Style::new().fg(GREEN)
}

/// Secondary text.
pub fn dim() -> Style {
    Style::new().fg(GREEN_DIM)
}

/// Section and panel titles.
pub fn title() -> Style {
    Style::new().fg(GREEN).bold()
}

/// High-emphasis values (entered text, the tx hash).
pub fn bright() -> Style {
    Style::new().fg(TEXT_BRIGHT).bold()
}

/// Cautionary text.
pub fn warning() -> Style {
    Style::new().fg(AMBER)
}

/// Panel borders.
pub fn border() -> Style {
    Style::new().fg(GREEN_DARK)
}

/// Border of the active panel.
pub fn border_active() -> Style {
    Style::new().fg(GREEN)
}
