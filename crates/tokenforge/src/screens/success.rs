#![forbid(unsafe_code)]

//! Success screen after the simulated deployment.

use forge_core::geometry::Rect;
use forge_render::frame::Frame;
use forge_widgets::draw_text;

use crate::app::{AppModel, format_supply};
use crate::theme;

pub fn render(model: &AppModel, area: Rect, frame: &mut Frame) {
    if area.is_empty() {
        return;
    }
    let config = model.config();
    let mut y = area.y;
    let mut line = |frame: &mut Frame, text: &str, style| {
        if y < area.bottom() {
            draw_text(frame, area.x, y, area.width, text, style);
        }
        y += 1;
    };

    line(frame, "✔ TOKEN DEPLOYED", theme::title());
    line(frame, "", theme::dim());
    line(
        frame,
        &format!("{} (${})", config.name, config.symbol),
        theme::bright(),
    );
    line(
        frame,
        &format!("{} units · {} decimals", format_supply(&config.total_supply), config.decimals),
        theme::text(),
    );
    line(frame, "", theme::dim());
    line(frame, "TRANSACTION HASH", theme::dim());

    // The hash is 66 characters; split it over two rows when the panel
    // is narrower than that.
    let hash = model.tx_hash();
    if (hash.len() as u16) <= area.width {
        line(frame, hash, theme::bright());
    } else {
        let split = hash.len() / 2;
        let (head, tail) = hash.split_at(split);
        line(frame, head, theme::bright());
        line(frame, tail, theme::bright());
    }

    if area.height > 0 {
        draw_text(
            frame,
            area.x,
            area.bottom() - 1,
            area.width,
            "enter ▸ deploy another",
            theme::text(),
        );
    }
}
