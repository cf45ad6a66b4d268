//! Recent game events and session totals.

use gloo::timers::callback::Interval;
use yew::prelude::*;

use crate::app::SlotContext;

/// How often to check the log for new entries.
const POLL_INTERVAL_MS: u32 = 250;
/// Entries shown in the panel, newest first.
const VISIBLE_ENTRIES: usize = 8;

#[function_component(EventLog)]
pub fn event_log() -> Html {
    let slot = use_context::<SlotContext>().unwrap_or_default();
    let version = use_state(|| slot.log.version());

    {
        let log = slot.log.clone();
        let version = version.clone();
        use_effect_with((), move |()| {
            let mut seen = log.version();
            let interval = Interval::new(POLL_INTERVAL_MS, move || {
                let current = log.version();
                if current != seen {
                    seen = current;
                    version.set(current);
                }
            });
            move || drop(interval)
        });
    }

    let stats = slot.log.stats();
    let entries = slot.log.entries();

    html! {
        <aside class="event-log">
            <div class="event-log-stats">
                { format!("Spins: {} | Winning rows: {}", stats.spins, stats.winning_rows) }
            </div>
            <ul>
                { for entries.iter().rev().take(VISIBLE_ENTRIES).map(|entry| html! {
                    <li key={entry.id}>{ &entry.message }</li>
                }) }
            </ul>
        </aside>
    }
}
