//! Slot machine configuration with documented defaults.

use serde::{Deserialize, Serialize};

use crate::easing::{DEFAULT_BACKOUT_AMOUNT, Easing};
use crate::symbol::{SymbolDef, SymbolSet};

pub const DEFAULT_REEL_COUNT: usize = 3;
pub const DEFAULT_VISIBLE_ROWS: usize = 3;
/// One buffer row above the window and one below.
pub const DEFAULT_EXTRA_ROWS: usize = 2;
pub const DEFAULT_CELL_SIZE: f64 = 150.0;
pub const DEFAULT_REEL_X_OFFSET: f64 = 10.0;
pub const DEFAULT_BASE_SPIN_OFFSET: f64 = 10.0;
pub const DEFAULT_SPIN_OFFSET_STEP: f64 = 5.0;
pub const DEFAULT_BASE_DURATION_MS: f64 = 2500.0;
pub const DEFAULT_DURATION_STEP_MS: f64 = 600.0;

/// Upper bound for `reel_count`, `visible_rows` and `extra_rows`.
pub const MAX_GRID_SIZE: usize = 64;

const DEFAULT_SYMBOLS: [(&str, &str); 4] = [
    ("eggHead", "https://pixijs.com/assets/eggHead.png"),
    ("flowerTop", "https://pixijs.com/assets/flowerTop.png"),
    ("helmlok", "https://pixijs.com/assets/helmlok.png"),
    ("skully", "https://pixijs.com/assets/skully.png"),
];

/// Error type for invalid slot configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("symbol set is empty")]
    EmptySymbolSet,
    #[error("duplicate symbol name: {0}")]
    DuplicateSymbol(String),
    #[error("reel_count must be at least 1")]
    NoReels,
    #[error("visible_rows must be at least 1")]
    NoVisibleRows,
    #[error("extra_rows must be at least 1")]
    NoBufferRows,
    #[error("{field} must be at most {max}, got {value}")]
    TooLarge {
        field: &'static str,
        max: usize,
        value: usize,
    },
    #[error("{field} must be {expected}, got {value}")]
    InvalidValue {
        field: &'static str,
        expected: &'static str,
        value: f64,
    },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Layout and spin parameters. Missing JSON fields fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotConfig {
    pub reel_count: usize,
    pub visible_rows: usize,
    pub extra_rows: usize,
    pub cell_width: f64,
    pub cell_height: f64,
    /// Horizontal gap between reel columns.
    pub reel_x_offset: f64,
    /// Positions every reel travels during a spin.
    pub base_spin_offset: f64,
    /// Extra positions added per column index.
    pub spin_offset_step: f64,
    pub base_duration_ms: f64,
    pub duration_step_ms: f64,
    pub backout_amount: f64,
    pub symbols: Vec<SymbolDef>,
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            reel_count: DEFAULT_REEL_COUNT,
            visible_rows: DEFAULT_VISIBLE_ROWS,
            extra_rows: DEFAULT_EXTRA_ROWS,
            cell_width: DEFAULT_CELL_SIZE,
            cell_height: DEFAULT_CELL_SIZE,
            reel_x_offset: DEFAULT_REEL_X_OFFSET,
            base_spin_offset: DEFAULT_BASE_SPIN_OFFSET,
            spin_offset_step: DEFAULT_SPIN_OFFSET_STEP,
            base_duration_ms: DEFAULT_BASE_DURATION_MS,
            duration_step_ms: DEFAULT_DURATION_STEP_MS,
            backout_amount: DEFAULT_BACKOUT_AMOUNT,
            symbols: DEFAULT_SYMBOLS
                .iter()
                .map(|(name, url)| SymbolDef::new(*name, *url))
                .collect(),
        }
    }
}

impl SlotConfig {
    /// Parses and validates a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reel_count == 0 {
            return Err(ConfigError::NoReels);
        }
        if self.visible_rows == 0 {
            return Err(ConfigError::NoVisibleRows);
        }
        // The ring needs a spare slot so the bottom row is covered at rest.
        if self.extra_rows == 0 {
            return Err(ConfigError::NoBufferRows);
        }
        at_most("reel_count", self.reel_count)?;
        at_most("visible_rows", self.visible_rows)?;
        at_most("extra_rows", self.extra_rows)?;
        positive("cell_width", self.cell_width)?;
        positive("cell_height", self.cell_height)?;
        non_negative("reel_x_offset", self.reel_x_offset)?;
        non_negative("base_spin_offset", self.base_spin_offset)?;
        non_negative("spin_offset_step", self.spin_offset_step)?;
        non_negative("base_duration_ms", self.base_duration_ms)?;
        non_negative("duration_step_ms", self.duration_step_ms)?;
        non_negative("backout_amount", self.backout_amount)?;
        self.symbol_set().map(|_| ())
    }

    /// Symbols in each reel's ring: the visible window plus buffer rows.
    pub fn slot_count(&self) -> usize {
        self.visible_rows + self.extra_rows
    }

    pub fn symbol_set(&self) -> Result<SymbolSet, ConfigError> {
        SymbolSet::new(&self.symbols)
    }

    /// Distance reel `column` travels in one spin.
    #[allow(clippy::cast_precision_loss)]
    pub fn spin_target_offset(&self, column: usize) -> f64 {
        self.base_spin_offset + column as f64 * self.spin_offset_step
    }

    /// Duration of reel `column`'s spin. Later reels stop later.
    #[allow(clippy::cast_precision_loss)]
    pub fn spin_duration_ms(&self, column: usize) -> f64 {
        self.base_duration_ms + column as f64 * self.duration_step_ms
    }

    pub fn easing(&self) -> Easing {
        Easing::BackOut {
            amount: self.backout_amount,
        }
    }
}

fn at_most(field: &'static str, value: usize) -> Result<(), ConfigError> {
    if value <= MAX_GRID_SIZE {
        Ok(())
    } else {
        Err(ConfigError::TooLarge {
            field,
            max: MAX_GRID_SIZE,
            value,
        })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            expected: "a positive number",
            value,
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            expected: "a non-negative number",
            value,
        })
    }
}
