//! Slot engine: spin lifecycle, per-frame updates and win evaluation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::config::{ConfigError, SlotConfig};
use crate::event_bus::{EventBus, GameEvent};
use crate::reel::{Reel, ReelGeometry, ReelId, SymbolSlot};
use crate::symbol::{RandomSymbols, Symbol, SymbolSource};
use crate::tween::{TweenError, TweenOptions, TweenScheduler, TweenTarget};

/// Spin lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpinState {
    #[default]
    Idle,
    Spinning,
}

/// Completion signals carried by reel tweens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpinSignal {
    /// The last reel stopped.
    Finished,
}

/// A winning row: one slot per reel, left to right, all with the same symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct WinResult {
    pub row: usize,
    pub slots: Vec<SymbolSlot>,
}

impl WinResult {
    /// The shared symbol.
    pub fn symbol(&self) -> Option<&Symbol> {
        self.slots.first().map(SymbolSlot::symbol)
    }
}

/// Orchestrates the reels of one machine.
///
/// The host calls [`spin`](Self::spin) on user input and
/// [`render_frame`](Self::render_frame) once per displayed frame. Lifecycle
/// events go out on the injected [`EventBus`].
#[derive(Debug)]
pub struct SlotMachine<S, C> {
    config: SlotConfig,
    geometry: ReelGeometry,
    reels: Vec<Reel>,
    tweens: TweenScheduler<SpinSignal>,
    state: SpinState,
    bus: Arc<EventBus>,
    source: S,
    clock: C,
}

impl<C: Clock> SlotMachine<RandomSymbols, C> {
    /// Builds a machine drawing uniformly from the configured symbols.
    pub fn from_config(config: SlotConfig, clock: C, bus: Arc<EventBus>) -> Result<Self, ConfigError> {
        let source = RandomSymbols::new(config.symbol_set()?);
        Self::new(config, source, clock, bus)
    }
}

impl<S: SymbolSource, C: Clock> SlotMachine<S, C> {
    pub fn new(config: SlotConfig, mut source: S, clock: C, bus: Arc<EventBus>) -> Result<Self, ConfigError> {
        config.validate()?;

        let geometry = ReelGeometry::from_config(&config);
        let reels = (0..config.reel_count)
            .map(|i| Reel::new(ReelId(i), &geometry, &mut source))
            .collect();

        tracing::debug!(
            reels = config.reel_count,
            slots_per_reel = geometry.slot_count(),
            "slot machine created"
        );

        let mut machine = Self {
            config,
            geometry,
            reels,
            tweens: TweenScheduler::new(),
            state: SpinState::Idle,
            bus,
            source,
            clock,
        };
        machine.update_reels();
        Ok(machine)
    }

    /// Starts a spin. Returns false, and changes nothing, if one is running.
    pub fn spin(&mut self) -> bool {
        if self.state == SpinState::Spinning {
            tracing::debug!("spin ignored, already spinning");
            return false;
        }

        self.state = SpinState::Spinning;
        self.bus.publish(&GameEvent::SpinStart);

        for reel in &mut self.reels {
            reel.randomize(&mut self.source);
            reel.reset_position();
        }

        let now = self.clock.now_ms();
        if let Err(err) = self.schedule_spin(now) {
            tracing::error!(%err, "spin aborted, reel tween could not be scheduled");
            self.tweens.clear();
            self.state = SpinState::Idle;
            self.bus.publish(&GameEvent::SpinEnd);
            return false;
        }

        tracing::info!(reels = self.reels.len(), "spin started");
        true
    }

    /// One tween per reel. Only the last carries the completion signal.
    fn schedule_spin(&mut self, now: f64) -> Result<(), TweenError> {
        let easing = self.config.easing();
        let last = self.reels.len().saturating_sub(1);

        for (column, reel) in self.reels.iter().enumerate() {
            let to = reel.position() + self.config.spin_target_offset(column);
            let duration = self.config.spin_duration_ms(column);
            let options = if column == last {
                TweenOptions::new().on_complete(SpinSignal::Finished)
            } else {
                TweenOptions::new()
            };

            self.tweens.schedule(
                self.reels.as_slice(),
                TweenTarget::ReelPosition(reel.id()),
                to,
                duration,
                easing,
                options,
                now,
            )?;
        }
        Ok(())
    }

    /// Advances tweens, recomputes every reel's rows and, if the last reel
    /// just stopped, ends the spin and evaluates wins.
    pub fn render_frame(&mut self) {
        let now = self.clock.now_ms();

        for reel in &mut self.reels {
            reel.begin_frame();
        }
        let signals = self.tweens.tick(now, self.reels.as_mut_slice());
        self.update_reels();

        for signal in signals {
            match signal {
                SpinSignal::Finished => self.finish_spin(),
            }
        }
    }

    fn update_reels(&mut self) {
        for reel in &mut self.reels {
            let wrapped = reel.update_rows(&self.geometry, &mut self.source);
            if wrapped > 0 {
                tracing::trace!(reel = reel.id().0, wrapped, "slots wrapped");
            }
        }
    }

    fn finish_spin(&mut self) {
        self.state = SpinState::Idle;
        self.bus.publish(&GameEvent::SpinEnd);

        let wins = self.evaluate_wins();
        tracing::info!(wins = wins.len(), "spin ended");
        for win in wins {
            if let Some(symbol) = win.symbol() {
                tracing::info!(row = win.row, %symbol, "winning row");
            }
            self.bus.publish(&GameEvent::Win(win));
        }
    }

    /// Rows where every reel shows the same symbol.
    ///
    /// A row only counts if each reel has a slot in it.
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub fn evaluate_wins(&self) -> Vec<WinResult> {
        (0..self.config.visible_rows)
            .filter_map(|row| {
                let slots: Vec<SymbolSlot> = self
                    .reels
                    .iter()
                    .filter_map(|reel| reel.slot_in_row(row as i32).cloned())
                    .collect();

                if slots.len() != self.reels.len() {
                    return None;
                }
                let first = slots.first()?.symbol().clone();
                slots
                    .iter()
                    .all(|slot| *slot.symbol() == first)
                    .then_some(WinResult { row, slots })
            })
            .collect()
    }

    pub fn state(&self) -> SpinState {
        self.state
    }

    pub fn is_spinning(&self) -> bool {
        self.state == SpinState::Spinning
    }

    pub fn config(&self) -> &SlotConfig {
        &self.config
    }

    pub fn geometry(&self) -> &ReelGeometry {
        &self.geometry
    }

    pub fn reels(&self) -> &[Reel] {
        &self.reels
    }

    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    pub fn active_tweens(&self) -> usize {
        self.tweens.len()
    }

    /// Symbol shown by `reel` in visible `row`.
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub fn symbol_at(&self, reel: usize, row: usize) -> Option<&Symbol> {
        if row >= self.config.visible_rows {
            return None;
        }
        self.reels
            .get(reel)?
            .slot_in_row(row as i32)
            .map(SymbolSlot::symbol)
    }

    /// Visible symbols, row-major.
    pub fn visible_grid(&self) -> Vec<Vec<Option<Symbol>>> {
        (0..self.config.visible_rows)
            .map(|row| {
                (0..self.reels.len())
                    .map(|reel| self.symbol_at(reel, row).cloned())
                    .collect()
            })
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn reels_mut(&mut self) -> &mut [Reel] {
        &mut self.reels
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;
    use crate::clock::ManualClock;

    fn symbol_a() -> Symbol {
        Symbol::new(0, "A")
    }

    fn events(bus: &EventBus) -> Arc<Mutex<Vec<GameEvent>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        bus.subscribe(move |event| sink.lock().push(event.clone()));
        seen
    }

    fn run_until_idle<S: SymbolSource>(machine: &mut SlotMachine<S, ManualClock>, clock: &ManualClock) {
        for _ in 0..1000 {
            clock.advance(16.0);
            machine.render_frame();
            if !machine.is_spinning() {
                return;
            }
        }
        panic!("spin never finished");
    }

    #[test]
    fn test_machine_creation() {
        let clock = ManualClock::new(0.0);
        let machine =
            SlotMachine::from_config(SlotConfig::default(), clock, Arc::new(EventBus::new())).unwrap();
        assert_eq!(machine.state(), SpinState::Idle);
        assert_eq!(machine.reels().len(), 3);
        assert!(machine.reels().iter().all(|r| r.slots().len() == 5));
        // Rows are computed before the first frame.
        assert!(machine.symbol_at(0, 0).is_some());
    }

    #[test]
    fn test_empty_symbols_fail_fast() {
        let config = SlotConfig {
            symbols: Vec::new(),
            ..SlotConfig::default()
        };
        let result = SlotMachine::from_config(config, ManualClock::new(0.0), Arc::new(EventBus::new()));
        assert!(matches!(result, Err(ConfigError::EmptySymbolSet)));
    }

    #[test]
    fn test_spin_schedules_cascading_tweens() {
        let clock = ManualClock::new(0.0);
        let bus = Arc::new(EventBus::new());
        let mut machine = SlotMachine::new(SlotConfig::default(), symbol_a, clock.clone(), bus).unwrap();

        assert!(machine.spin());
        assert_eq!(machine.active_tweens(), 3);

        // First reel finishes at 2500ms, second at 3100ms, third at 3700ms.
        clock.set(2500.0);
        machine.render_frame();
        assert_eq!(machine.reels()[0].position(), 10.0);
        assert_eq!(machine.active_tweens(), 2);
        assert!(machine.is_spinning());

        clock.set(3100.0);
        machine.render_frame();
        assert_eq!(machine.reels()[1].position(), 15.0);
        assert!(machine.is_spinning());

        clock.set(3700.0);
        machine.render_frame();
        assert_eq!(machine.reels()[2].position(), 20.0);
        assert!(!machine.is_spinning());
        assert_eq!(machine.active_tweens(), 0);
    }

    #[test]
    fn test_spin_while_spinning_is_noop() {
        let clock = ManualClock::new(0.0);
        let bus = Arc::new(EventBus::new());
        let seen = events(&bus);
        let mut machine = SlotMachine::new(SlotConfig::default(), symbol_a, clock.clone(), bus).unwrap();

        assert!(machine.spin());
        clock.advance(500.0);
        machine.render_frame();
        let reels_before = machine.reels().to_vec();

        assert!(!machine.spin());
        assert_eq!(machine.reels(), reels_before.as_slice());
        assert_eq!(machine.active_tweens(), 3);
        let starts = seen
            .lock()
            .iter()
            .filter(|e| **e == GameEvent::SpinStart)
            .count();
        assert_eq!(starts, 1);
    }

    #[test]
    fn test_event_order_for_full_spin() {
        let clock = ManualClock::new(0.0);
        let bus = Arc::new(EventBus::new());
        let seen = events(&bus);
        let mut machine = SlotMachine::from_config(SlotConfig::default(), clock.clone(), bus).unwrap();

        machine.spin();
        run_until_idle(&mut machine, &clock);

        let seen = seen.lock();
        assert_eq!(seen[0], GameEvent::SpinStart);
        assert_eq!(seen[1], GameEvent::SpinEnd);
        assert!(seen[2..].iter().all(|e| matches!(e, GameEvent::Win(_))));
    }

    #[test]
    fn test_uniform_symbols_win_every_row() {
        let clock = ManualClock::new(0.0);
        let bus = Arc::new(EventBus::new());
        let seen = events(&bus);
        let mut machine = SlotMachine::new(SlotConfig::default(), symbol_a, clock.clone(), bus).unwrap();

        machine.spin();
        run_until_idle(&mut machine, &clock);

        let wins: Vec<WinResult> = seen
            .lock()
            .iter()
            .filter_map(|e| match e {
                GameEvent::Win(win) => Some(win.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(wins.iter().map(|w| w.row).collect::<Vec<_>>(), vec![0, 1, 2]);
        for win in &wins {
            assert_eq!(win.slots.len(), 3);
            assert_eq!(win.symbol().unwrap().name.as_ref(), "A");
        }
    }

    #[test]
    fn test_single_row_match() {
        let clock = ManualClock::new(0.0);
        let bus = Arc::new(EventBus::new());
        let mut counter = 0;
        // Alternate symbols so no row matches by accident.
        let source = move || {
            counter += 1;
            Symbol::new(counter % 2, if counter % 2 == 0 { "A" } else { "B" })
        };
        let mut machine = SlotMachine::new(SlotConfig::default(), source, clock, bus).unwrap();

        let egg = Symbol::new(7, "eggHead");
        for (i, reel) in machine.reels_mut().iter_mut().enumerate() {
            // At rest slot 2 holds row 1 and slot 1 holds row 0.
            reel.slots_mut()[2].set_symbol(egg.clone());
            let filler = Symbol::new(10 + i, "filler");
            reel.slots_mut()[1].set_symbol(filler);
        }

        let wins = machine.evaluate_wins();
        assert_eq!(wins.len(), 1);
        assert_eq!(wins[0].row, 1);
        assert_eq!(wins[0].slots.len(), 3);
        assert!(wins[0].slots.iter().all(|s| s.symbol() == &egg));
    }

    #[test]
    fn test_machine_rejects_config_without_buffer_rows() {
        let config = SlotConfig {
            extra_rows: 0,
            ..SlotConfig::default()
        };
        let result = SlotMachine::new(config, symbol_a, ManualClock::new(0.0), Arc::new(EventBus::new()));
        assert!(matches!(result, Err(ConfigError::NoBufferRows)));
    }

    #[test]
    fn test_machine_rejects_oversized_rows_without_panicking() {
        let config = SlotConfig {
            visible_rows: usize::MAX,
            ..SlotConfig::default()
        };
        let result = SlotMachine::from_config(config, ManualClock::new(0.0), Arc::new(EventBus::new()));
        assert!(matches!(result, Err(ConfigError::TooLarge { .. })));
    }

    #[test]
    fn test_single_buffer_row_covers_every_visible_row() {
        let config = SlotConfig {
            extra_rows: 1,
            ..SlotConfig::default()
        };
        let machine = SlotMachine::new(config, symbol_a, ManualClock::new(0.0), Arc::new(EventBus::new())).unwrap();
        let rows: Vec<usize> = machine.evaluate_wins().iter().map(|w| w.row).collect();
        assert_eq!(rows, vec![0, 1, 2]);
    }

    #[test]
    fn test_failed_tween_schedule_returns_to_idle() {
        let clock = ManualClock::new(0.0);
        let bus = Arc::new(EventBus::new());
        let seen = events(&bus);
        let mut machine = SlotMachine::new(SlotConfig::default(), symbol_a, clock.clone(), bus).unwrap();

        // A reel whose id points past the reel list cannot be animated.
        let mut source = symbol_a;
        machine.reels[2] = Reel::new(ReelId(9), &machine.geometry, &mut source);

        assert!(!machine.spin());
        assert_eq!(machine.state(), SpinState::Idle);
        assert_eq!(machine.active_tweens(), 0);
        assert_eq!(*seen.lock(), vec![GameEvent::SpinStart, GameEvent::SpinEnd]);

        // Nothing is left running that could finish the aborted spin later.
        clock.advance(5_000.0);
        machine.render_frame();
        assert_eq!(seen.lock().len(), 2);
    }

    #[test]
    fn test_visible_grid_shape() {
        let config = SlotConfig {
            reel_count: 5,
            visible_rows: 4,
            ..SlotConfig::default()
        };
        let machine = SlotMachine::from_config(config, ManualClock::new(0.0), Arc::new(EventBus::new())).unwrap();
        let grid = machine.visible_grid();
        assert_eq!(grid.len(), 4);
        assert!(grid.iter().all(|row| row.len() == 5 && row.iter().all(Option::is_some)));
        assert!(machine.symbol_at(0, 4).is_none());
        assert!(machine.symbol_at(5, 0).is_none());
    }

    #[test]
    fn test_second_spin_after_completion() {
        let clock = ManualClock::new(0.0);
        let bus = Arc::new(EventBus::new());
        let seen = events(&bus);
        let mut machine = SlotMachine::from_config(SlotConfig::default(), clock.clone(), bus).unwrap();

        machine.spin();
        run_until_idle(&mut machine, &clock);
        assert!(machine.spin());
        assert!(machine.reels().iter().all(|r| r.position() == 0.0));
        run_until_idle(&mut machine, &clock);

        let seen = seen.lock();
        let lifecycle: Vec<&GameEvent> = seen
            .iter()
            .filter(|e| !matches!(e, GameEvent::Win(_)))
            .collect();
        assert_eq!(
            lifecycle,
            vec![
                &GameEvent::SpinStart,
                &GameEvent::SpinEnd,
                &GameEvent::SpinStart,
                &GameEvent::SpinEnd
            ]
        );
    }
}
