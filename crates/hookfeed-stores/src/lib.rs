//! hookfeed-stores - Event store implementations for hookfeed.
//!
//! # Supported Backends
//!
//! - **MongoDB** (feature: `mongodb`, default) - one document per event
//! - **Memory** - process-local, for development and tests

mod factory;
mod memory;

#[cfg(feature = "mongodb")]
mod mongodb;

// Public exports
pub use factory::EventStoreFactory;
pub use memory::MemoryEventStore;

#[cfg(feature = "mongodb")]
pub use mongodb::MongoEventStore;

// Re-export core types for convenience
pub use hookfeed_core::store::{EventStore, StoreConfig, StoreProvider};
