//! Slot-Live Client
//!
//! Yew WASM frontend: draws the reels on a canvas and drives the
//! [`slot_core::SlotMachine`] from `requestAnimationFrame`.
//!
//! Build with `trunk build` (or `trunk serve`) from this directory. On native
//! targets the binary only prints a hint.

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod assets;
#[cfg(target_arch = "wasm32")]
mod clock;
#[cfg(target_arch = "wasm32")]
mod components;
#[cfg(target_arch = "wasm32")]
mod draw;
#[cfg(target_arch = "wasm32")]
mod hooks;

#[cfg(target_arch = "wasm32")]
fn main() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, Layer};
    use tracing_web::MakeWebConsoleWriter;

    console_error_panic_hook::set_once();

    let filter = EnvFilter::new("info");
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new())
        .with_filter(filter);
    tracing_subscriber::registry().with(fmt_layer).init();

    yew::Renderer::<app::App>::new().render();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("slot-client only runs in the browser. Use: trunk serve --open (in crates/slot-client)");
}
