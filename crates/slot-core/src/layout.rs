//! Screen placement of the reel grid and its surrounding text.
//!
//! Symbols are drawn centered on their anchor. The reel container sits one
//! cell above the visible window so the top buffer row is hidden by the mask.

use serde::{Deserialize, Serialize};

use crate::config::SlotConfig;

/// Hit area of the SPIN control.
pub const SPIN_BUTTON_WIDTH: f64 = 140.0;
pub const SPIN_BUTTON_HEIGHT: f64 = 56.0;

/// Share of the cell a symbol image may cover.
pub const SYMBOL_SCALE: f64 = 0.8;

/// Axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn centered_at(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        Self {
            x: cx - width / 2.0,
            y: cy - height / 2.0,
            width,
            height,
        }
    }

    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Placement of the machine inside a viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineLayout {
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub cell_width: f64,
    pub cell_height: f64,
    /// Top-left anchor of the reel container.
    pub reel_origin: (f64, f64),
    /// Horizontal offset of each reel column from `reel_origin`.
    pub column_x: Vec<f64>,
    /// Area in which symbols are visible.
    pub mask: Rect,
    /// Empty band above and below the mask.
    pub margin: f64,
    pub header_anchor: (f64, f64),
    pub spin_button: Rect,
}

impl MachineLayout {
    /// Centers the grid in a `viewport_width` x `viewport_height` canvas.
    #[allow(clippy::cast_precision_loss)]
    pub fn centered(config: &SlotConfig, viewport_width: f64, viewport_height: f64) -> Self {
        let cw = config.cell_width;
        let ch = config.cell_height;
        let reels = config.reel_count as f64;
        let total_width = reels * cw + (reels - 1.0).max(0.0) * config.reel_x_offset;
        let total_height = config.visible_rows as f64 * ch;

        let origin_x = round_half_up((viewport_width - total_width) / 2.0 + cw / 2.0);
        let origin_y = round_half_up((viewport_height - total_height) / 2.0 + ch / 2.0 - ch);

        let column_x = (0..config.reel_count)
            .map(|i| i as f64 * (cw + config.reel_x_offset))
            .collect();

        let mask = Rect {
            x: origin_x - cw / 2.0,
            y: origin_y + ch / 2.0,
            width: total_width,
            height: total_height,
        };

        let margin = round_half_up((viewport_height - total_height) / 2.0);
        let center_x = viewport_width / 2.0;

        Self {
            viewport_width,
            viewport_height,
            cell_width: cw,
            cell_height: ch,
            reel_origin: (origin_x, origin_y),
            column_x,
            mask,
            margin,
            header_anchor: (center_x, margin / 2.0),
            spin_button: Rect::centered_at(
                center_x,
                viewport_height - margin / 2.0,
                SPIN_BUTTON_WIDTH,
                SPIN_BUTTON_HEIGHT,
            ),
        }
    }

    /// Canvas center of a symbol in reel `reel` at vertical offset `y`.
    pub fn slot_center(&self, reel: usize, y: f64) -> (f64, f64) {
        let column = self.column_x.get(reel).copied().unwrap_or_default();
        (self.reel_origin.0 + column, self.reel_origin.1 + y)
    }

    /// Destination of an `image_width` x `image_height` symbol image, scaled
    /// to fit [`SYMBOL_SCALE`] of the cell and centered on the slot.
    pub fn symbol_rect(&self, reel: usize, y: f64, image_width: f64, image_height: f64) -> Rect {
        let (cx, cy) = self.slot_center(reel, y);
        let scale = if image_width > 0.0 && image_height > 0.0 {
            (self.cell_width * SYMBOL_SCALE / image_width).min(self.cell_height * SYMBOL_SCALE / image_height)
        } else {
            0.0
        };
        Rect::centered_at(cx, cy, image_width * scale, image_height * scale)
    }
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
