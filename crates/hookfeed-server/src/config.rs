//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use hookfeed_core::error::{HookError, HookResult};
use hookfeed_core::store::StoreConfig;

/// UI directory shipped with this crate.
pub const BUNDLED_STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// `./static` when it exists, so a deployed binary can sit next to its
/// assets; otherwise the bundled UI, so `cargo run` works from any directory.
fn default_static_dir() -> PathBuf {
    let local = PathBuf::from("static");
    if local.is_dir() {
        local
    } else {
        PathBuf::from(BUNDLED_STATIC_DIR)
    }
}

/// Process configuration: listen address, static UI directory and store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding `index.html` and other UI assets.
    pub static_dir: PathBuf,
    pub store: StoreConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            static_dir: default_static_dir(),
            store: StoreConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Create configuration from environment variables.
    ///
    /// Reads `HOST`, `PORT` and `STATIC_DIR`, plus the store variables read by
    /// [`StoreConfig::from_env`].
    pub fn from_env() -> HookResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> HookResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            store: StoreConfig::from_lookup(&lookup)?,
            ..Self::default()
        };

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }

        if let Some(port) = lookup("PORT") {
            config.port = port.parse().map_err(|_| {
                HookError::Configuration(format!("PORT must be a valid port number, got `{}`", port))
            })?;
        }

        if let Some(dir) = lookup("STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    pub fn socket_addr(&self) -> HookResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| HookError::Configuration(format!("Invalid listen address: {}", e)))
    }
}
