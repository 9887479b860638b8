//! hookfeed-core - Core library for hookfeed.
//!
//! This crate turns GitHub webhook deliveries into [`NormalizedEvent`]
//! records and defines the [`EventStore`] contract that storage backends
//! implement.
//!
//! # Example
//!
//! ```
//! use hookfeed_core::{normalize_delivery, EventAction, WebhookOutcome};
//!
//! let body = br#"{
//!     "after": "abc123",
//!     "pusher": { "name": "alice" },
//!     "ref": "refs/heads/main",
//!     "head_commit": { "timestamp": "2024-01-01T00:00:00Z" }
//! }"#;
//!
//! let outcome = normalize_delivery("push", Some("application/json"), body).unwrap();
//! let WebhookOutcome::Record(event) = outcome else { panic!("push is tracked") };
//! assert_eq!(event.action, EventAction::Push);
//! assert_eq!(event.to_branch, "main");
//! ```

pub mod error;
pub mod normalizer;
pub mod payload;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use error::{ErrorCode, HookError, HookResult};
pub use normalizer::{normalize, normalize_delivery, GitHubEventKind, GITHUB_EVENT_HEADER};
pub use payload::{decode_body, BodyEncoding};
pub use store::{EventStore, StoreConfig, StoreProvider};
pub use types::{EventAction, NormalizedEvent, WebhookOutcome, RECENT_EVENTS_LIMIT};
