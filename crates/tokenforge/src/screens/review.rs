#![forbid(unsafe_code)]

//! Step 3: summary and deploy.

use forge_core::geometry::Rect;
use forge_render::frame::Frame;
use forge_widgets::draw_text;

use crate::app::{AppModel, format_supply};
use crate::theme;

const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub fn render(model: &AppModel, area: Rect, frame: &mut Frame) {
    if area.is_empty() {
        return;
    }
    let config = model.config();
    let rows = [
        ("NAME", config.name.clone()),
        ("SYMBOL", format!("${}", config.symbol)),
        ("SUPPLY", format_supply(&config.total_supply)),
        ("DECIMALS", config.decimals.clone()),
    ];

    let mut y = area.y;
    for (label, value) in rows {
        if y >= area.bottom() {
            return;
        }
        draw_text(frame, area.x, y, 10, label, theme::dim());
        draw_text(
            frame,
            area.x + 11,
            y,
            area.width.saturating_sub(11),
            &value,
            theme::bright(),
        );
        y += 1;
    }

    y += 1;
    if y < area.bottom() {
        draw_text(
            frame,
            area.x,
            y,
            area.width,
            "deployment fee paid to the address on the info panel",
            theme::dim(),
        );
    }

    if area.height == 0 {
        return;
    }
    let last = area.bottom() - 1;
    if model.is_deploying() {
        let spin = SPINNER[(model.backdrop.frame() % SPINNER.len() as u64) as usize];
        let text = format!("{spin} BROADCASTING TRANSACTION...");
        draw_text(frame, area.x, last, area.width, &text, theme::warning());
    } else {
        draw_text(
            frame,
            area.x,
            last,
            area.width,
            "enter ▸ deploy token",
            theme::text(),
        );
    }
}
