//! Browser clock backed by `performance.now()`.

use slot_core::Clock;
use web_sys::Performance;

/// Milliseconds since page load. Falls back to `Date.now()` when the
/// Performance API is unavailable.
#[derive(Debug, Clone)]
pub struct PerformanceClock {
    performance: Option<Performance>,
}

impl PerformanceClock {
    pub fn new() -> Self {
        let performance = web_sys::window().and_then(|w| w.performance());
        if performance.is_none() {
            tracing::warn!("performance API unavailable, using Date.now()");
        }
        Self { performance }
    }
}

impl Clock for PerformanceClock {
    fn now_ms(&self) -> f64 {
        self.performance
            .as_ref()
            .map_or_else(js_sys::Date::now, Performance::now)
    }
}
