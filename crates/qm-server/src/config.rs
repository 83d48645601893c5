use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Server settings, loadable from a TOML file.
///
/// Missing fields fall back to their defaults, so a config file only
/// needs to name what it overrides.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Key for signing and verifying bearer tokens.
    pub token_secret: String,
    /// Lifetime of minted tokens in seconds. Zero means no expiry.
    pub token_ttl_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8088".parse().unwrap(),
            token_secret: "change-me".to_string(),
            token_ttl_secs: 24 * 60 * 60,
        }
    }
}

impl ServerConfig {
    /// Parse a config from a TOML string, falling back to defaults for
    /// missing fields.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load a config file from disk.
    pub fn load(path: impl AsRef<Path>) -> ServerResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&raw).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Whether the signing secret was left at its placeholder value.
    pub fn has_default_secret(&self) -> bool {
        self.token_secret == "change-me"
    }
}
