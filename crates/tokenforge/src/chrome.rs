#![forbid(unsafe_code)]

//! Shared UI chrome: header, step indicator, info panel, footer.

use forge_core::geometry::Rect;
use forge_render::frame::Frame;
use forge_widgets::{Alignment, Block, Line, Paragraph, Widget, draw_text, draw_text_aligned};

use crate::app::{AppModel, WizardStep};
use crate::screens;
use crate::theme;

/// Minimum terminal size the layout is designed for.
const MIN_WIDTH: u16 = 44;
const MIN_HEIGHT: u16 = 14;

const FORM_WIDTH: u16 = 58;
const FORM_HEIGHT: u16 = 15;
const INFO_WIDTH: u16 = 34;

/// Paint the whole UI over the backdrop.
pub fn draw(model: &AppModel, frame: &mut Frame) {
    let area = frame.bounds();
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        draw_text_aligned(
            frame,
            area,
            area.height / 2,
            "terminal too small",
            theme::warning(),
            Alignment::Center,
        );
        return;
    }

    let (header, rest) = area.split_top(2);
    let (body, footer) = rest.split_bottom(1);

    draw_header(frame, header);
    draw_footer(model, frame, footer);

    // Info panel only when there is room next to the form.
    let with_info = body.width >= FORM_WIDTH + INFO_WIDTH + 6;
    let cluster_width = if with_info {
        FORM_WIDTH + 2 + INFO_WIDTH
    } else {
        FORM_WIDTH
    };
    // Clamp to the body so a short terminal never spills onto the footer.
    let height = FORM_HEIGHT.min(body.height);
    let left = body.x + (body.width - cluster_width.min(body.width)) / 2;
    let top = body.y + (body.height - height) / 2;
    let form_area = Rect::new(left, top, FORM_WIDTH.min(body.width), height);

    draw_form_panel(model, frame, form_area);
    if with_info {
        let info_area = Rect::new(form_area.right() + 2, top, INFO_WIDTH, height);
        draw_info_panel(frame, info_area);
    }
}

fn draw_header(frame: &mut Frame, area: Rect) {
    if area.is_empty() {
        return;
    }
    draw_text(
        frame,
        area.x + 1,
        area.y,
        area.width,
        "◆ TOKENFORGE",
        theme::title(),
    );
    draw_text_aligned(
        frame,
        area,
        area.y,
        "[ SIMULATED NETWORK ] ",
        theme::dim(),
        Alignment::Right,
    );
    if area.height > 1 {
        for x in area.x..area.right() {
            if let Some(cell) = frame.buffer_mut().get_mut(x, area.y + 1) {
                *cell = cell.with_char('─');
                theme::border().apply(cell);
            }
        }
    }
}

fn draw_footer(model: &AppModel, frame: &mut Frame, area: Rect) {
    if area.is_empty() {
        return;
    }
    let hint = if model.is_deploying() {
        "broadcasting, hold on"
    } else if model.is_deployed() {
        "enter deploy another · q quit"
    } else if model.step() == WizardStep::Review {
        "enter deploy · esc back · q quit"
    } else {
        "tab next field · enter continue · esc back · ctrl+c quit"
    };
    draw_text_aligned(frame, area, area.y, hint, theme::dim(), Alignment::Center);
}

fn draw_form_panel(model: &AppModel, frame: &mut Frame, area: Rect) {
    let title = if model.is_deployed() {
        "DEPLOYMENT COMPLETE"
    } else {
        "CREATE TOKEN"
    };
    let block = Block::bordered()
        .title(title)
        .title_style(theme::title())
        .border_style(theme::border_active());
    let inner = block.inner(area).inner(forge_core::geometry::Sides::horizontal(2));
    block.render(area, frame);

    if model.is_deployed() {
        screens::success::render(model, inner, frame);
        return;
    }

    let (indicator, content) = inner.split_top(2);
    draw_step_indicator(model, frame, indicator);
    match model.step() {
        WizardStep::Identity => screens::identity::render(model, content, frame),
        WizardStep::Economics => screens::economics::render(model, content, frame),
        WizardStep::Review => screens::review::render(model, content, frame),
    }
}

/// `01 ── 02 ── 03` with the current step highlighted.
fn draw_step_indicator(model: &AppModel, frame: &mut Frame, area: Rect) {
    if area.is_empty() {
        return;
    }
    let current = model.step().number();
    let mut x = area.x;
    for step in [WizardStep::Identity, WizardStep::Economics, WizardStep::Review] {
        let n = step.number();
        let style = if n == current {
            theme::bright()
        } else {
            theme::dim()
        };
        let label = format!("0{n}");
        x += draw_text(frame, x, area.y, area.right().saturating_sub(x), &label, style);
        if n < 3 {
            x += draw_text(
                frame,
                x,
                area.y,
                area.right().saturating_sub(x),
                " ── ",
                theme::dim(),
            );
        }
    }
    let label = model.step().label();
    draw_text_aligned(frame, area, area.y, label, theme::title(), Alignment::Right);
}

fn draw_info_panel(frame: &mut Frame, area: Rect) {
    let block = Block::bordered()
        .title("INFO")
        .title_style(theme::dim())
        .border_style(theme::border());
    let inner = block.inner(area).inner(forge_core::geometry::Sides::horizontal(1));
    block.render(area, frame);
    if inner.is_empty() {
        return;
    }

    Paragraph::new([
        Line::styled("HOW IT WORKS", theme::title()),
        Line::styled("1. describe your token", theme::dim()),
        Line::styled("2. set supply and decimals", theme::dim()),
        Line::styled("3. review and deploy", theme::dim()),
        Line::empty(),
        Line::styled("FEATURES", theme::title()),
        Line::styled("ERC-20 MINTABLE BURNABLE", theme::text()),
        Line::styled("OWNABLE", theme::text()),
        Line::empty(),
        Line::styled("FEE RECIPIENT", theme::title()),
        Line::styled(&theme::FEE_ADDRESS[..21], theme::dim()),
        Line::styled(&theme::FEE_ADDRESS[21..], theme::dim()),
        Line::styled("SIMULATION ONLY", theme::warning()),
    ])
    .render(inner, frame);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppModel;
    use std::time::Duration;

    fn render(width: u16, height: u16) -> Frame {
        let model = AppModel::with_deploy_delay(Duration::ZERO);
        let mut frame = Frame::new(width, height);
        draw(&model, &mut frame);
        frame
    }

    fn contains(frame: &Frame, needle: &str) -> bool {
        let buf = frame.buffer();
        for y in 0..buf.height() {
            let row: String = (0..buf.width())
                .map(|x| buf.get(x, y).map_or(' ', |c| c.ch))
                .collect();
            if row.contains(needle) {
                return true;
            }
        }
        false
    }

    #[test]
    fn full_layout_shows_brand_form_and_info() {
        let frame = render(110, 30);
        assert!(contains(&frame, "TOKENFORGE"));
        assert!(contains(&frame, "CREATE TOKEN"));
        assert!(contains(&frame, "HOW IT WORKS"));
        assert!(contains(&frame, "IDENTITY"));
    }

    #[test]
    fn narrow_layout_drops_the_info_panel() {
        let frame = render(60, 24);
        assert!(contains(&frame, "CREATE TOKEN"));
        assert!(!contains(&frame, "HOW IT WORKS"));
    }

    #[test]
    fn minimum_height_keeps_the_footer_hints() {
        for width in [60, 110] {
            let frame = render(width, 14);
            assert!(contains(&frame, "CREATE TOKEN"));
            // The panels must stop above the footer row.
            assert!(contains(&frame, "ctrl+c quit"), "footer lost at width {width}");
        }
    }

    #[test]
    fn tiny_terminal_shows_fallback_message() {
        let frame = render(30, 8);
        assert!(contains(&frame, "terminal too small"));
        assert!(!contains(&frame, "CREATE TOKEN"));
    }

    #[test]
    fn fee_address_is_displayed_verbatim() {
        let frame = render(110, 30);
        assert!(contains(&frame, &theme::FEE_ADDRESS[..21]));
        assert!(contains(&frame, &theme::FEE_ADDRESS[21..]));
    }
}
