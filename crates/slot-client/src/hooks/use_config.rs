//! Hook for loading the machine configuration served by slot-server.

use gloo::net::http::Request;
use slot_core::{ConfigError, SlotConfig};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

const CONFIG_URL: &str = "/api/config";

#[derive(Debug)]
pub enum ConfigLoadError {
    Network(String),
    Status(u16),
    Invalid(ConfigError),
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(e) => write!(f, "Network error: {e}"),
            Self::Status(code) => write!(f, "Unexpected status {code}"),
            Self::Invalid(e) => write!(f, "Invalid config: {e}"),
        }
    }
}

async fn fetch_config() -> Result<SlotConfig, ConfigLoadError> {
    let response = Request::get(CONFIG_URL)
        .send()
        .await
        .map_err(|e| ConfigLoadError::Network(e.to_string()))?;
    if !response.ok() {
        return Err(ConfigLoadError::Status(response.status()));
    }
    let body = response
        .text()
        .await
        .map_err(|e| ConfigLoadError::Network(e.to_string()))?;
    SlotConfig::from_json(&body).map_err(ConfigLoadError::Invalid)
}

/// Returns `None` until the config request settles. Any failure falls back
/// to [`SlotConfig::default`].
#[hook]
pub fn use_slot_config() -> Option<SlotConfig> {
    let config = use_state(|| None::<SlotConfig>);

    {
        let config = config.clone();
        use_effect_with((), move |()| {
            spawn_local(async move {
                let loaded = match fetch_config().await {
                    Ok(loaded) => {
                        tracing::info!(reels = loaded.reel_count, symbols = loaded.symbols.len(), "config loaded");
                        loaded
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "using default config");
                        SlotConfig::default()
                    }
                };
                config.set(Some(loaded));
            });
        });
    }

    (*config).clone()
}
