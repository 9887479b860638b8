//! MongoDB event store implementation.

use async_trait::async_trait;

use hookfeed_core::error::{HookError, HookResult};
use hookfeed_core::store::{EventStore, StoreConfig};
use hookfeed_core::types::{NormalizedEvent, RECENT_EVENTS_LIMIT};

use mongodb::{
    bson::doc,
    options::{ClientOptions, FindOptions},
    Client, Collection,
};

/// MongoDB event store. One document per event, no indexes or uniqueness.
pub struct MongoEventStore {
    collection: Collection<NormalizedEvent>,
}

impl MongoEventStore {
    /// Create a new MongoDB event store.
    ///
    /// The driver connects lazily, so an unreachable server surfaces on the
    /// first insert or query rather than here.
    pub async fn new(config: StoreConfig) -> HookResult<Self> {
        let mut client_options = ClientOptions::parse(&config.url).await.map_err(|e| {
            HookError::connection(format!("Failed to parse MongoDB URL: {}", e)).with_source(e)
        })?;
        client_options.app_name = Some("hookfeed".to_string());

        let client = Client::with_options(client_options).map_err(|e| {
            HookError::connection(format!("Failed to create MongoDB client: {}", e)).with_source(e)
        })?;

        let collection = client
            .database(&config.database)
            .collection::<NormalizedEvent>(&config.collection);

        tracing::info!(
            database = %config.database,
            collection = %config.collection,
            "MongoDB event store ready"
        );

        Ok(Self { collection })
    }

    fn recent_options() -> FindOptions {
        FindOptions::builder()
            .sort(doc! { "timestamp": -1 })
            .limit(RECENT_EVENTS_LIMIT as i64)
            .projection(doc! { "_id": 0 })
            .build()
    }
}

#[async_trait]
impl EventStore for MongoEventStore {
    async fn append(&self, event: &NormalizedEvent) -> HookResult<()> {
        self.collection
            .insert_one(event, None)
            .await
            .map_err(|e| HookError::insert(format!("Failed to insert event: {}", e)).with_source(e))?;

        Ok(())
    }

    async fn recent(&self) -> HookResult<Vec<NormalizedEvent>> {
        let mut cursor = self
            .collection
            .find(None, Self::recent_options())
            .await
            .map_err(|e| HookError::query(format!("Failed to query events: {}", e)).with_source(e))?;

        let mut events = Vec::with_capacity(RECENT_EVENTS_LIMIT);
        while cursor
            .advance()
            .await
            .map_err(|e| HookError::query(format!("Cursor error: {}", e)).with_source(e))?
        {
            let event = cursor.deserialize_current().map_err(|e| {
                HookError::query(format!("Failed to deserialize event: {}", e)).with_source(e)
            })?;
            events.push(event);
        }

        tracing::debug!(count = events.len(), "Loaded recent events from MongoDB");
        Ok(events)
    }

    fn name(&self) -> &'static str {
        "mongodb"
    }
}
