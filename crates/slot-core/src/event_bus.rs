//! In-process publish/subscribe for game lifecycle events.
//!
//! Handlers run synchronously on the publishing thread, in subscription
//! order, exactly once per publish. A handler that panics is logged and
//! skipped; the remaining handlers still run.

use std::any::Any;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::machine::WinResult;

/// Discrete game lifecycle event.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// The shell finished loading and the machine is ready.
    AppStarted,
    SpinStart,
    SpinEnd,
    /// One matching row. Published once per winning row per spin.
    Win(WinResult),
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AppStarted => f.write_str("App started"),
            Self::SpinStart => f.write_str("Spin started"),
            Self::SpinEnd => f.write_str("Spin ended"),
            Self::Win(win) => write!(f, "Win on row {}", win.row),
        }
    }
}

pub type EventHandler = Arc<dyn Fn(&GameEvent) + Send + Sync>;

/// Returned by [`EventBus::subscribe`]; pass it to
/// [`EventBus::unsubscribe`] to remove the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Synchronous event bus. Share it as `Arc<EventBus>`.
#[derive(Default)]
pub struct EventBus {
    handlers: RwLock<Vec<(SubscriptionId, EventHandler)>>,
    next_id: AtomicU64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&GameEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers.write().push((id, Arc::new(handler)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.write();
        match handlers.iter().position(|(sid, _)| *sid == id) {
            Some(index) => {
                handlers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Delivers `event` to every current subscriber and returns how many
    /// handlers completed without panicking.
    ///
    /// The subscriber list is captured before dispatch, so handlers may
    /// subscribe or unsubscribe; the change applies from the next publish.
    pub fn publish(&self, event: &GameEvent) -> usize {
        let handlers: Vec<EventHandler> = self
            .handlers
            .read()
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();

        let mut delivered = 0;
        for handler in handlers {
            match catch_unwind(AssertUnwindSafe(|| handler(event))) {
                Ok(()) => delivered += 1,
                Err(payload) => {
                    tracing::error!(
                        %event,
                        panic = panic_message(payload.as_ref()),
                        "event handler panicked"
                    );
                }
            }
        }
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.read().len()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        *s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "<non-string panic>"
    }
}
