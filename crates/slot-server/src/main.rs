//! Slot-Live Server
//!
//! Serves the slot-client build embedded via rust-embed and the machine
//! configuration at `GET /api/config`.
//!
//! Environment: `SLOT_ADDR` (bind address, default `0.0.0.0:3000`),
//! `SLOT_CONFIG` (path to a JSON `SlotConfig`), `RUST_LOG`.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::router::build_router;
use crate::settings::ServerSettings;

mod router;
mod settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let settings = ServerSettings::from_env()?;
    match &settings.config_path {
        Some(path) => tracing::info!(path = %path.display(), "Loaded machine config"),
        None => tracing::info!("Using default machine config"),
    }
    tracing::info!(
        reels = settings.config.reel_count,
        rows = settings.config.visible_rows,
        symbols = settings.config.symbols.len(),
        "Machine config"
    );

    let addr = settings.addr;
    let app = build_router(settings.config);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("Server listening on {addr}");
    tracing::info!("  - Config API: http://{addr}/api/config");
    tracing::info!("  - SPA (embedded): http://{addr}/");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
