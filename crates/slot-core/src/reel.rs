//! Reel model: a ring of symbol slots scrolled by a continuous position.
//!
//! A reel never holds more slots than `visible_rows + extra_rows`. Scrolling
//! is faked by recomputing each slot's vertical offset from the reel position
//! every frame; when a slot leaves through the bottom and re-enters above the
//! window it receives a fresh identity, so a handful of slots look like an
//! endless strip.

use serde::{Deserialize, Serialize};

use crate::config::SlotConfig;
use crate::symbol::{Symbol, SymbolSource};
use crate::tween::{Animatable, TweenTarget};

/// Index of a reel column, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReelId(pub usize);

/// Vertical geometry shared by every reel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReelGeometry {
    pub visible_rows: usize,
    pub extra_rows: usize,
    pub cell_height: f64,
}

impl ReelGeometry {
    pub fn from_config(config: &SlotConfig) -> Self {
        Self {
            visible_rows: config.visible_rows,
            extra_rows: config.extra_rows,
            cell_height: config.cell_height,
        }
    }

    pub fn slot_count(&self) -> usize {
        self.visible_rows + self.extra_rows
    }

    /// Height of the visible window plus buffer rows.
    #[allow(clippy::cast_precision_loss)]
    pub fn window_height(&self) -> f64 {
        (self.visible_rows + self.extra_rows) as f64 * self.cell_height
    }
}

/// One cell of a reel's ring.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolSlot {
    index: usize,
    symbol: Symbol,
    row: i32,
    y: f64,
    /// Completed trips around the ring at the last update.
    turn: i64,
}

impl SymbolSlot {
    fn new(index: usize, symbol: Symbol) -> Self {
        Self {
            index,
            symbol,
            row: -1,
            y: 0.0,
            turn: 0,
        }
    }

    /// Position in the reel's ring. Fixed for the slot's lifetime.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Logical row: `-1` above the window, `visible_rows` or more below it.
    pub fn row(&self) -> i32 {
        self.row
    }

    /// Vertical offset within the reel, in pixels.
    pub fn y(&self) -> f64 {
        self.y
    }

    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub fn is_visible(&self, visible_rows: usize) -> bool {
        self.row >= 0 && self.row < visible_rows as i32
    }

    #[cfg(test)]
    pub(crate) fn set_symbol(&mut self, symbol: Symbol) {
        self.symbol = symbol;
    }
}

/// Row index for a vertical offset. Halves round towards positive infinity.
#[allow(clippy::cast_possible_truncation)]
pub fn row_for_offset(y: f64, cell_height: f64) -> i32 {
    (y / cell_height + 0.5).floor() as i32 - 1
}

/// One vertical reel column.
#[derive(Debug, Clone, PartialEq)]
pub struct Reel {
    id: ReelId,
    slots: Vec<SymbolSlot>,
    position: f64,
    previous_position: f64,
}

impl Reel {
    /// Builds a reel with `geometry.slot_count()` slots drawn from `source`.
    pub fn new<S: SymbolSource + ?Sized>(id: ReelId, geometry: &ReelGeometry, source: &mut S) -> Self {
        let slots = (0..geometry.slot_count())
            .map(|index| SymbolSlot::new(index, source.next_symbol()))
            .collect();
        Self {
            id,
            slots,
            position: 0.0,
            previous_position: 0.0,
        }
    }

    pub fn id(&self) -> ReelId {
        self.id
    }

    pub fn slots(&self) -> &[SymbolSlot] {
        &self.slots
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn set_position(&mut self, position: f64) {
        self.position = position;
    }

    /// Position at the start of the current frame.
    pub fn previous_position(&self) -> f64 {
        self.previous_position
    }

    /// Positions travelled since the start of the current frame.
    pub fn velocity(&self) -> f64 {
        self.position - self.previous_position
    }

    /// Records the current position as the frame's starting point.
    pub fn begin_frame(&mut self) {
        self.previous_position = self.position;
    }

    pub fn reset_position(&mut self) {
        self.position = 0.0;
    }

    /// Gives every slot a fresh identity.
    pub fn randomize<S: SymbolSource + ?Sized>(&mut self, source: &mut S) {
        for slot in &mut self.slots {
            slot.symbol = source.next_symbol();
        }
    }

    /// Recomputes each slot's offset and row from the reel position.
    ///
    /// Returns how many slots wrapped (and were re-randomized) this call.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn update_rows<S: SymbolSource + ?Sized>(
        &mut self,
        geometry: &ReelGeometry,
        source: &mut S,
    ) -> usize {
        let count = self.slots.len() as f64;
        let height = geometry.cell_height;
        let window = geometry.window_height();
        let mut wrapped = 0;

        for slot in &mut self.slots {
            let travelled = self.position + slot.index as f64;
            let mut y = travelled.rem_euclid(count) * height;
            if y >= window {
                y -= count * height;
            }

            slot.y = y;
            slot.row = row_for_offset(y, height);

            // A new turn means the slot left through the bottom and re-entered
            // above the window. Moving backwards never draws.
            let turn = (travelled / count).floor() as i64;
            if turn > slot.turn {
                slot.symbol = source.next_symbol();
                wrapped += 1;
            }
            slot.turn = turn;
        }

        wrapped
    }

    /// The slot currently occupying `row`, if any.
    pub fn slot_in_row(&self, row: i32) -> Option<&SymbolSlot> {
        self.slots.iter().find(|s| s.row == row)
    }

    #[cfg(test)]
    pub(crate) fn slots_mut(&mut self) -> &mut [SymbolSlot] {
        &mut self.slots
    }
}

impl Animatable for [Reel] {
    fn value(&self, target: TweenTarget) -> Option<f64> {
        match target {
            TweenTarget::ReelPosition(id) => self.get(id.0).map(Reel::position),
        }
    }

    fn set_value(&mut self, target: TweenTarget, value: f64) {
        match target {
            TweenTarget::ReelPosition(id) => {
                if let Some(reel) = self.get_mut(id.0) {
                    reel.set_position(value);
                }
            }
        }
    }
}
