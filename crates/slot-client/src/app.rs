//! Main application component.

use std::sync::Arc;

use slot_core::{EventBus, EventLogStore};
use yew::prelude::*;

use crate::components::{EventLog, SlotStage};
use crate::hooks::use_slot_config;

/// Bus and event log shared by every component.
#[derive(Clone, Debug)]
pub struct SlotContext {
    pub bus: Arc<EventBus>,
    pub log: Arc<EventLogStore>,
}

impl SlotContext {
    /// Creates a bus with the console logger and the event log attached.
    pub fn new() -> Self {
        let bus = Arc::new(EventBus::new());
        bus.subscribe(|event| tracing::info!("{event}"));
        let log = Arc::new(EventLogStore::new());
        log.attach(&bus);
        Self { bus, log }
    }
}

impl Default for SlotContext {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for SlotContext {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.bus, &other.bus) && Arc::ptr_eq(&self.log, &other.log)
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let slot = use_memo((), |()| SlotContext::new());
    let config = use_slot_config();

    let stage = match config {
        Some(config) => html! { <SlotStage {config} /> },
        None => html! { <p class="loading">{ "Loading..." }</p> },
    };

    html! {
        <ContextProvider<SlotContext> context={(*slot).clone()}>
            <main class="slot-app">
                { stage }
                <EventLog />
            </main>
        </ContextProvider<SlotContext>>
    }
}
