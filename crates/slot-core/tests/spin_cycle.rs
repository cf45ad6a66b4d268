//! Full spins driven frame by frame, the way a browser host drives them.

use std::sync::Arc;

use parking_lot::Mutex;
use slot_core::{
    EventBus, EventLogStore, GameEvent, ManualClock, RandomSymbols, SlotConfig, SlotMachine, SpinState, Symbol,
    SymbolDef, SymbolSource,
};

const FRAME_MS: f64 = 1000.0 / 60.0;

fn two_symbol_config() -> SlotConfig {
    SlotConfig {
        symbols: vec![SymbolDef::new("A", "a.png"), SymbolDef::new("B", "b.png")],
        ..SlotConfig::default()
    }
}

fn record_events(bus: &EventBus) -> Arc<Mutex<Vec<GameEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    bus.subscribe(move |event| sink.lock().push(event.clone()));
    events
}

/// Renders frames until the machine goes idle. Returns the frame count.
fn run_until_idle<S: SymbolSource>(machine: &mut SlotMachine<S, ManualClock>, clock: &ManualClock) -> usize {
    let mut frames = 0;
    while machine.is_spinning() {
        clock.advance(FRAME_MS);
        machine.render_frame();
        frames += 1;
        assert!(frames < 10_000, "spin never finished");
    }
    frames
}

#[test]
fn test_spin_runs_to_completion_and_reports_wins() {
    let bus = Arc::new(EventBus::new());
    let events = record_events(&bus);
    let clock = ManualClock::new(0.0);
    let config = two_symbol_config();
    let source = RandomSymbols::with_seed(config.symbol_set().unwrap(), 7);
    let mut machine = SlotMachine::new(config, source, clock.clone(), bus).unwrap();

    assert!(machine.spin());
    let frames = run_until_idle(&mut machine, &clock);

    // The last reel runs 2500 + 2 * 600 ms.
    assert!(frames as f64 >= 3700.0 / FRAME_MS - 1.0);
    assert_eq!(machine.state(), SpinState::Idle);
    assert_eq!(machine.active_tweens(), 0);

    let positions: Vec<f64> = machine.reels().iter().map(|r| r.position()).collect();
    assert_eq!(positions, vec![10.0, 15.0, 20.0]);

    // Every reel rests with one slot per visible row.
    for reel in machine.reels() {
        for row in 0..3 {
            assert_eq!(reel.slots().iter().filter(|s| s.row() == row).count(), 1);
        }
    }

    let wins = machine.evaluate_wins();
    let events = events.lock().clone();
    assert_eq!(events[0], GameEvent::SpinStart);
    assert_eq!(events[1], GameEvent::SpinEnd);
    let reported: Vec<usize> = events[2..]
        .iter()
        .map(|event| match event {
            GameEvent::Win(win) => win.row,
            other => panic!("unexpected event {other}"),
        })
        .collect();
    assert_eq!(reported, wins.iter().map(|w| w.row).collect::<Vec<_>>());
}

#[test]
fn test_forced_symbol_wins_every_row() {
    let bus = Arc::new(EventBus::new());
    let events = record_events(&bus);
    let clock = ManualClock::new(1_000.0);
    let only_a = || Symbol::new(0, "A");
    let mut machine = SlotMachine::new(two_symbol_config(), only_a, clock.clone(), bus).unwrap();

    machine.spin();
    run_until_idle(&mut machine, &clock);

    let messages: Vec<String> = events.lock().iter().map(ToString::to_string).collect();
    assert_eq!(
        messages,
        vec!["Spin started", "Spin ended", "Win on row 0", "Win on row 1", "Win on row 2"]
    );
    for row in machine.visible_grid() {
        assert!(row.iter().all(|s| s.as_ref().map(|s| &*s.name) == Some("A")));
    }
}

#[test]
fn test_wrapping_slots_draw_new_symbols() {
    let bus = Arc::new(EventBus::new());
    let clock = ManualClock::new(0.0);
    let draws = Arc::new(Mutex::new(0usize));
    let counter = draws.clone();
    let source = move || {
        let mut n = counter.lock();
        *n += 1;
        Symbol::new(*n % 2, if *n % 2 == 0 { "A" } else { "B" })
    };
    let mut machine = SlotMachine::new(two_symbol_config(), source, clock.clone(), bus).unwrap();
    let after_build = *draws.lock();
    assert_eq!(after_build, 15);

    machine.spin();
    let after_randomize = *draws.lock();
    assert_eq!(after_randomize, 30);

    run_until_idle(&mut machine, &clock);
    // 10, 15 and 20 positions travelled; each position moves every slot of
    // its reel once, so each slot wraps once per full turn of 5 positions.
    let wrapped = *draws.lock() - after_randomize;
    assert_eq!(wrapped, (10 + 15 + 20) as usize);
}

#[test]
fn test_spin_requests_during_a_spin_are_ignored() {
    let bus = Arc::new(EventBus::new());
    let events = record_events(&bus);
    let clock = ManualClock::new(0.0);
    let mut machine = SlotMachine::from_config(SlotConfig::default(), clock.clone(), bus).unwrap();

    assert!(machine.spin());
    clock.advance(500.0);
    machine.render_frame();
    assert!(!machine.spin());
    run_until_idle(&mut machine, &clock);

    let starts = events.lock().iter().filter(|e| **e == GameEvent::SpinStart).count();
    assert_eq!(starts, 1);

    // Idle again: the next request starts a fresh spin from position zero.
    assert!(machine.spin());
    assert!(machine.reels().iter().all(|r| r.position() == 0.0));
}

#[test]
fn test_seeded_machines_agree() {
    let grid = |seed| {
        let clock = ManualClock::new(0.0);
        let config = two_symbol_config();
        let source = RandomSymbols::with_seed(config.symbol_set().unwrap(), seed);
        let mut machine = SlotMachine::new(config, source, clock.clone(), Arc::new(EventBus::new())).unwrap();
        machine.spin();
        run_until_idle(&mut machine, &clock);
        machine.visible_grid()
    };
    assert_eq!(grid(42), grid(42));
}

#[test]
fn test_event_log_tracks_session() {
    let bus = Arc::new(EventBus::new());
    let log = Arc::new(EventLogStore::new());
    log.attach(&bus);
    let clock = ManualClock::new(0.0);
    let only_a = || Symbol::new(0, "A");
    let mut machine = SlotMachine::new(two_symbol_config(), only_a, clock.clone(), bus.clone()).unwrap();

    bus.publish(&GameEvent::AppStarted);
    for _ in 0..2 {
        machine.spin();
        run_until_idle(&mut machine, &clock);
    }

    let stats = log.stats();
    assert_eq!(stats.spins, 2);
    assert_eq!(stats.winning_rows, 6);
    assert_eq!(log.entries().first().map(|e| e.message.as_str()), Some("App started"));
}
