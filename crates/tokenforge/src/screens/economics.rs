#![forbid(unsafe_code)]

//! Step 2: total supply and decimals.

use forge_core::geometry::Rect;
use forge_render::frame::Frame;
use forge_widgets::draw_text;

use crate::app::{AppModel, format_supply};
use crate::screens::draw_field;
use crate::theme;

pub fn render(model: &AppModel, area: Rect, frame: &mut Frame) {
    if area.is_empty() {
        return;
    }
    let mut y = area.y;
    y += draw_field(frame, area, y, "TOTAL SUPPLY", &model.total_supply);
    if y > area.y && y <= area.bottom() {
        let preview = format!("= {} units", format_supply(model.total_supply.value()));
        draw_text(frame, area.x + 2, y - 1, area.width, &preview, theme::dim());
    }
    y += draw_field(frame, area, y, "DECIMALS (0-18)", &model.decimals);

    if y < area.bottom() {
        draw_text(
            frame,
            area.x,
            area.bottom() - 1,
            area.width,
            "enter ▸ continue",
            theme::text(),
        );
    }
}
