//! Server state management.

use std::sync::Arc;

use hookfeed_core::store::EventStore;

/// Shared application state.
///
/// Built once at startup and handed to every handler; the store is the only
/// resource requests share.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn EventStore>,
}

impl AppState {
    /// Create a new application state around an event store.
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn EventStore {
        self.store.as_ref()
    }
}
