//! Per-frame tween list.
//!
//! Each tween binds one [`TweenTarget`] to a start value, an end value, a
//! duration and an easing curve. [`TweenScheduler::tick`] runs once per
//! rendered frame, writes the interpolated value through [`Animatable`] and
//! retires tweens whose duration has elapsed.
//!
//! Completion is reported as data: a tween may carry an `on_complete` signal
//! of type `K`, and `tick` returns the signals of every tween that finished
//! during that call. The owner reacts to them after the tick, which keeps the
//! scheduler free of borrows into its owner.

use std::fmt;

use crate::easing::{Easing, lerp};
use crate::reel::ReelId;

/// A numeric property a tween can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TweenTarget {
    /// Scroll position of one reel.
    ReelPosition(ReelId),
}

impl fmt::Display for TweenTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReelPosition(id) => write!(f, "reel[{}].position", id.0),
        }
    }
}

/// Read/write access to tween targets.
pub trait Animatable {
    /// Current value, or `None` if the target does not exist.
    fn value(&self, target: TweenTarget) -> Option<f64>;
    fn set_value(&mut self, target: TweenTarget, value: f64);
}

#[derive(Debug, thiserror::Error)]
pub enum TweenError {
    #[error("tween target {0} does not exist")]
    UnknownTarget(TweenTarget),
}

/// Identifies a scheduled tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenHandle(u64);

/// Snapshot passed to `on_tick` after each update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenFrame {
    pub handle: TweenHandle,
    pub target: TweenTarget,
    pub value: f64,
    /// Linear progress in [0, 1] before easing.
    pub phase: f64,
}

pub type TickCallback = Box<dyn FnMut(&TweenFrame)>;

/// Optional hooks for a tween.
pub struct TweenOptions<K> {
    pub on_tick: Option<TickCallback>,
    /// Returned from [`TweenScheduler::tick`] when the tween finishes.
    pub on_complete: Option<K>,
}

impl<K> TweenOptions<K> {
    pub fn new() -> Self {
        Self {
            on_tick: None,
            on_complete: None,
        }
    }

    #[must_use]
    pub fn on_tick(mut self, callback: impl FnMut(&TweenFrame) + 'static) -> Self {
        self.on_tick = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn on_complete(mut self, signal: K) -> Self {
        self.on_complete = Some(signal);
        self
    }
}

impl<K> Default for TweenOptions<K> {
    fn default() -> Self {
        Self::new()
    }
}

struct Tween<K> {
    handle: TweenHandle,
    target: TweenTarget,
    from: f64,
    to: f64,
    duration_ms: f64,
    easing: Easing,
    start_ms: f64,
    on_tick: Option<TickCallback>,
    on_complete: Option<K>,
    done: bool,
}

impl<K> Tween<K> {
    fn phase(&self, now_ms: f64) -> f64 {
        if self.duration_ms > 0.0 {
            ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

impl<K> fmt::Debug for Tween<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tween")
            .field("handle", &self.handle)
            .field("target", &self.target)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("duration_ms", &self.duration_ms)
            .field("easing", &self.easing)
            .field("start_ms", &self.start_ms)
            .finish_non_exhaustive()
    }
}

/// Active tweens, advanced once per frame.
///
/// Two tweens on the same target both write it every tick; the one scheduled
/// later wins.
pub struct TweenScheduler<K = ()> {
    tweens: Vec<Tween<K>>,
    next_handle: u64,
}

impl<K> TweenScheduler<K> {
    pub fn new() -> Self {
        Self {
            tweens: Vec::new(),
            next_handle: 0,
        }
    }

    /// Starts a tween of `target` towards `to`, capturing its current value as
    /// the start.
    #[allow(clippy::too_many_arguments)]
    pub fn schedule<A: Animatable + ?Sized>(
        &mut self,
        targets: &A,
        target: TweenTarget,
        to: f64,
        duration_ms: f64,
        easing: Easing,
        options: TweenOptions<K>,
        now_ms: f64,
    ) -> Result<TweenHandle, TweenError> {
        let from = targets
            .value(target)
            .ok_or(TweenError::UnknownTarget(target))?;

        let handle = TweenHandle(self.next_handle);
        self.next_handle += 1;

        tracing::trace!(%target, from, to, duration_ms, "tween scheduled");
        self.tweens.push(Tween {
            handle,
            target,
            from,
            to,
            duration_ms,
            easing,
            start_ms: now_ms,
            on_tick: options.on_tick,
            on_complete: options.on_complete,
            done: false,
        });
        Ok(handle)
    }

    /// Advances every tween to `now_ms` and returns the completion signals of
    /// those that finished, in schedule order.
    pub fn tick<A: Animatable + ?Sized>(&mut self, now_ms: f64, targets: &mut A) -> Vec<K> {
        let mut completed = Vec::new();

        for tween in &mut self.tweens {
            let phase = tween.phase(now_ms);
            let value = lerp(tween.from, tween.to, tween.easing.apply(phase));
            targets.set_value(tween.target, value);

            if let Some(on_tick) = tween.on_tick.as_mut() {
                on_tick(&TweenFrame {
                    handle: tween.handle,
                    target: tween.target,
                    value,
                    phase,
                });
            }

            if phase >= 1.0 {
                // Snap exactly; the eased value can carry rounding error.
                targets.set_value(tween.target, tween.to);
                tween.done = true;
                if let Some(signal) = tween.on_complete.take() {
                    completed.push(signal);
                }
            }
        }

        self.tweens.retain(|t| !t.done);
        completed
    }

    pub fn is_active(&self, handle: TweenHandle) -> bool {
        self.tweens.iter().any(|t| t.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Drops every active tween without writing or signalling.
    pub fn clear(&mut self) {
        self.tweens.clear();
    }
}

impl<K> Default for TweenScheduler<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for TweenScheduler<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweenScheduler")
            .field("tweens", &self.tweens)
            .field("next_handle", &self.next_handle)
            .finish()
    }
}
