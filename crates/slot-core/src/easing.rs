//! Easing curves for tweens.

/// Overshoot used by the reel spin easing.
pub const DEFAULT_BACKOUT_AMOUNT: f64 = 0.5;

/// Easing curve applied to a tween's normalized progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    /// Runs past the end and settles back. `amount` controls the overshoot.
    BackOut { amount: f64 },
}

impl Easing {
    /// Back-out easing with the reel spin's default overshoot.
    pub const fn backout() -> Self {
        Self::BackOut {
            amount: DEFAULT_BACKOUT_AMOUNT,
        }
    }

    /// Applies the easing function to a normalized time value (0.0 to 1.0).
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::BackOut { amount } => {
                let s = t - 1.0;
                s * s * ((amount + 1.0) * s + amount) + 1.0
            }
        }
    }
}

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}
