//! Factory for creating event store backends.

use std::sync::Arc;

use hookfeed_core::error::{HookError, HookResult};
use hookfeed_core::store::{EventStore, StoreConfig, StoreProvider};

/// Factory for creating event store backends.
pub struct EventStoreFactory;

impl EventStoreFactory {
    /// Create an event store from the given configuration.
    pub async fn create(config: StoreConfig) -> HookResult<Arc<dyn EventStore>> {
        match config.provider {
            #[cfg(feature = "mongodb")]
            StoreProvider::MongoDB => {
                let store = crate::mongodb::MongoEventStore::new(config).await?;
                Ok(Arc::new(store))
            }

            StoreProvider::Memory => Ok(Arc::new(crate::memory::MemoryEventStore::new())),

            #[allow(unreachable_patterns)]
            provider => Err(HookError::UnsupportedProvider {
                provider: provider.to_string(),
            }),
        }
    }
}
