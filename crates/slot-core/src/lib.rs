//! Slot-Live Core Library
//!
//! Frame-driven slot machine logic: reels that scroll through a small ring of
//! symbol slots, a per-target tween list that drives the scroll, row-based win
//! detection and a synchronous event bus that reports the spin lifecycle.
//!
//! Nothing here touches the browser. A host calls [`SlotMachine::render_frame`]
//! once per displayed frame and draws whatever [`SlotMachine::reels`] reports.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod clock;
pub mod config;
pub mod easing;
pub mod event_bus;
pub mod layout;
pub mod machine;
pub mod reel;
pub mod store;
pub mod symbol;
pub mod tween;

pub use clock::{Clock, ManualClock};
#[cfg(not(target_arch = "wasm32"))]
pub use clock::InstantClock;
pub use config::{ConfigError, SlotConfig};
pub use easing::{Easing, lerp};
pub use event_bus::{EventBus, GameEvent, SubscriptionId};
pub use layout::{MachineLayout, Rect, SYMBOL_SCALE};
pub use machine::{SlotMachine, SpinState, WinResult};
pub use reel::{Reel, ReelGeometry, ReelId, SymbolSlot};
pub use store::{EventLogEntry, EventLogStore, SessionStats};
pub use symbol::{RandomSymbols, Symbol, SymbolDef, SymbolId, SymbolSet, SymbolSource};
pub use tween::{Animatable, TweenError, TweenFrame, TweenHandle, TweenOptions, TweenScheduler, TweenTarget};
