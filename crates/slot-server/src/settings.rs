//! Server settings read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use slot_core::{ConfigError, SlotConfig};

pub const ADDR_VAR: &str = "SLOT_ADDR";
pub const CONFIG_VAR: &str = "SLOT_CONFIG";
pub const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid SLOT_ADDR {value:?}: {source}")]
    InvalidAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("failed to read {}: {source}", .path.display())]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid machine config: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub addr: SocketAddr,
    pub config: SlotConfig,
    /// Where `config` came from, if not the defaults.
    pub config_path: Option<PathBuf>,
}

impl ServerSettings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let raw_addr = lookup(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = raw_addr
            .parse()
            .map_err(|source| SettingsError::InvalidAddr {
                value: raw_addr.clone(),
                source,
            })?;

        let config_path = lookup(CONFIG_VAR).map(PathBuf::from);
        let config = match &config_path {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|source| SettingsError::ReadConfig {
                    path: path.clone(),
                    source,
                })?;
                SlotConfig::from_json(&json)?
            }
            None => SlotConfig::default(),
        };

        Ok(Self {
            addr,
            config,
            config_path,
        })
    }
}
