mod use_config;
mod use_slot_loop;

pub use use_config::use_slot_config;
pub use use_slot_loop::use_slot_loop;
