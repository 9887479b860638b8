//! Event store trait and configuration.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{HookError, HookResult};
use crate::types::NormalizedEvent;

/// Event store backend.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StoreProvider {
    #[default]
    MongoDB,
    Memory,
}

/// Event store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Backend to use.
    pub provider: StoreProvider,
    /// Connection string.
    pub url: String,
    /// Database name.
    pub database: String,
    /// Collection holding the events.
    pub collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: StoreProvider::MongoDB,
            url: "mongodb://localhost:27017".to_string(),
            database: "github_events".to_string(),
            collection: "events".to_string(),
        }
    }
}

impl StoreConfig {
    /// Create configuration from environment variables.
    ///
    /// Reads `HOOKFEED_STORE`, `MONGO_URI`, `MONGO_DB` and `MONGO_COLLECTION`;
    /// unset variables keep their defaults.
    pub fn from_env() -> HookResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> HookResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(provider) = lookup("HOOKFEED_STORE") {
            config.provider = provider.parse().map_err(|_| {
                HookError::Configuration(format!(
                    "HOOKFEED_STORE must be `mongodb` or `memory`, got `{}`",
                    provider
                ))
            })?;
        }

        if let Some(url) = lookup("MONGO_URI") {
            config.url = url;
        }

        if let Some(database) = lookup("MONGO_DB") {
            config.database = database;
        }

        if let Some(collection) = lookup("MONGO_COLLECTION") {
            config.collection = collection;
        }

        Ok(config)
    }

    pub fn memory() -> Self {
        Self {
            provider: StoreProvider::Memory,
            ..Self::default()
        }
    }
}

/// Event Store Gateway - all storage backends implement this.
///
/// Implementations are shared across concurrent requests and rely on the
/// backend for atomicity of a single insert or query.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Append one record. Duplicate deliveries are stored twice.
    async fn append(&self, event: &NormalizedEvent) -> HookResult<()>;

    /// Most recent records by `timestamp`, newest first, at most
    /// [`RECENT_EVENTS_LIMIT`](crate::types::RECENT_EVENTS_LIMIT).
    async fn recent(&self) -> HookResult<Vec<NormalizedEvent>>;

    /// Backend name for logs and health reporting.
    fn name(&self) -> &'static str;
}
