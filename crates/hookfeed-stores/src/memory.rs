//! In-process event store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use hookfeed_core::error::HookResult;
use hookfeed_core::store::EventStore;
use hookfeed_core::types::{NormalizedEvent, RECENT_EVENTS_LIMIT};

/// Event store backed by a vector in process memory.
///
/// Events are lost on restart. Ordering matches the MongoDB backend: plain
/// string comparison of `timestamp`, newest first.
#[derive(Debug, Default)]
pub struct MemoryEventStore {
    events: RwLock<Vec<NormalizedEvent>>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored events, ignoring the query limit.
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn append(&self, event: &NormalizedEvent) -> HookResult<()> {
        self.events.write().await.push(event.clone());
        Ok(())
    }

    async fn recent(&self) -> HookResult<Vec<NormalizedEvent>> {
        let mut events = self.events.read().await.clone();
        events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        events.truncate(RECENT_EVENTS_LIMIT);
        Ok(events)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
