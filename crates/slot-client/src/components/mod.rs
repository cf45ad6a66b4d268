//! UI Components for the slot-live client.

mod event_log;
mod slot_stage;

pub use event_log::EventLog;
pub use slot_stage::SlotStage;
