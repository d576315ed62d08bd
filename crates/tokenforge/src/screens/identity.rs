#![forbid(unsafe_code)]

//! Step 1: token name and symbol.

use forge_core::geometry::Rect;
use forge_render::frame::Frame;
use forge_widgets::draw_text;

use crate::app::AppModel;
use crate::screens::draw_field;
use crate::theme;

pub fn render(model: &AppModel, area: Rect, frame: &mut Frame) {
    if area.is_empty() {
        return;
    }
    let mut y = area.y;
    y += draw_field(frame, area, y, "TOKEN NAME", &model.name);
    y += draw_field(frame, area, y, "SYMBOL (max 10)", &model.symbol);

    if y < area.bottom() {
        let (hint, style) = if model.identity_complete() {
            ("enter ▸ continue", theme::text())
        } else {
            ("name and symbol required", theme::dim())
        };
        draw_text(frame, area.x, area.bottom() - 1, area.width, hint, style);
    }
}
