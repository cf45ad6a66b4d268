//! Canvas rendering of the reels and the foreground text.

use slot_core::{Clock, MachineLayout, SlotMachine, SymbolSource};
use web_sys::CanvasRenderingContext2d;

use crate::assets::SymbolImages;

const BACKGROUND_COLOR: &str = "#1099bb";
const HEADER_TEXT: &str = "SAMPLE SLOTS";
const SPIN_TEXT: &str = "SPIN";
const TITLE_FONT: &str = "italic bold 36px Arial";
const FALLBACK_FONT: &str = "14px Arial";

/// Draws one frame: background, masked reels, header and SPIN text.
pub fn render<S: SymbolSource, C: Clock>(
    ctx: &CanvasRenderingContext2d,
    machine: &SlotMachine<S, C>,
    layout: &MachineLayout,
    images: &SymbolImages,
) {
    ctx.set_fill_style_str(BACKGROUND_COLOR);
    ctx.fill_rect(0.0, 0.0, layout.viewport_width, layout.viewport_height);

    ctx.save();
    let mask = layout.mask;
    ctx.begin_path();
    ctx.rect(mask.x, mask.y, mask.width, mask.height);
    ctx.clip();

    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    for (column, reel) in machine.reels().iter().enumerate() {
        for slot in reel.slots() {
            let name = &slot.symbol().name;
            if let Some(image) = images.ready(name) {
                let rect = layout.symbol_rect(
                    column,
                    slot.y(),
                    f64::from(image.natural_width()),
                    f64::from(image.natural_height()),
                );
                ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    image,
                    rect.x,
                    rect.y,
                    rect.width,
                    rect.height,
                )
                .ok();
            } else {
                let (x, y) = layout.slot_center(column, slot.y());
                ctx.set_fill_style_str("#000");
                ctx.set_font(FALLBACK_FONT);
                ctx.fill_text(name, x, y).ok();
            }
        }
    }
    ctx.restore();

    draw_title(ctx, HEADER_TEXT, layout.header_anchor);
    draw_title(ctx, SPIN_TEXT, layout.spin_button.center());
}

/// White bold italic text with a thin red outline.
fn draw_title(ctx: &CanvasRenderingContext2d, text: &str, (x, y): (f64, f64)) {
    ctx.set_font(TITLE_FONT);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_fill_style_str("#ffffff");
    ctx.fill_text(text, x, y).ok();
    ctx.set_line_width(2.0);
    ctx.set_stroke_style_str("red");
    ctx.stroke_text(text, x, y).ok();
}
