//! Shared event log for UI polling.
//!
//! The bus delivers events synchronously inside the frame loop; UI components
//! render on their own schedule. This store sits between the two: a bus
//! subscriber appends to it and components poll [`EventLogStore::version`] to
//! decide whether to re-render.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::event_bus::{EventBus, GameEvent, SubscriptionId};

/// Maximum number of log entries to keep.
pub const MAX_LOG_ENTRIES: usize = 50;

/// One logged event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub id: u64,
    pub message: String,
}

/// Running totals for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionStats {
    pub spins: u64,
    pub winning_rows: u64,
}

#[derive(Debug, Default)]
pub struct EventLogStore {
    entries: RwLock<VecDeque<EventLogEntry>>,
    stats: RwLock<SessionStats>,
    next_id: AtomicU64,
}

impl EventLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes the store to `bus`.
    pub fn attach(self: &Arc<Self>, bus: &EventBus) -> SubscriptionId {
        let store = Arc::clone(self);
        bus.subscribe(move |event| store.record(event))
    }

    pub fn record(&self, event: &GameEvent) {
        {
            let mut stats = self.stats.write();
            match event {
                GameEvent::SpinStart => stats.spins += 1,
                GameEvent::Win(_) => stats.winning_rows += 1,
                GameEvent::AppStarted | GameEvent::SpinEnd => {}
            }
        }
        self.push(event.to_string());
    }

    pub fn push(&self, message: String) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut entries = self.entries.write();
        entries.push_back(EventLogEntry { id, message });
        while entries.len() > MAX_LOG_ENTRIES {
            entries.pop_front();
        }
    }

    /// Entries, oldest first.
    pub fn entries(&self) -> Vec<EventLogEntry> {
        self.entries.read().iter().cloned().collect()
    }

    pub fn stats(&self) -> SessionStats {
        *self.stats.read()
    }

    /// Changes whenever an entry is added.
    pub fn version(&self) -> u64 {
        self.next_id.load(Ordering::Relaxed)
    }

    pub fn clear(&self) {
        self.entries.write().clear();
        *self.stats.write() = SessionStats::default();
    }
}
