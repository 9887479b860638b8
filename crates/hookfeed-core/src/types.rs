//! Normalized event types.
//!
//! A [`NormalizedEvent`] is the single record shape stored for every accepted
//! webhook delivery, whatever GitHub event it came from.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// Maximum number of records returned by a recent-events query.
pub const RECENT_EVENTS_LIMIT: usize = 50;

/// What happened in the repository.
///
/// Serializes to SCREAMING_SNAKE_CASE (`PUSH`, `PULL_REQUEST`, `MERGE`) for
/// storage and for the `/events` feed.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventAction {
    /// Commits pushed to a branch.
    Push,
    /// Pull request opened, edited, synchronized, or closed without merging.
    PullRequest,
    /// Pull request closed by merging.
    Merge,
}

impl EventAction {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// The uniform record stored for every accepted webhook delivery.
///
/// `from_branch` is present exactly when `action` is not [`EventAction::Push`].
/// Build records through [`NormalizedEvent::push`] and
/// [`NormalizedEvent::pull_request`] to keep that pairing intact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedEvent {
    /// Commit SHA for pushes, pull request number for pull request actions.
    pub request_id: String,
    /// Account name of the actor.
    pub author: String,
    pub action: EventAction,
    /// Source branch; `null` for pushes.
    pub from_branch: Option<String>,
    /// Destination branch.
    pub to_branch: String,
    /// ISO-8601 time as reported by GitHub.
    pub timestamp: String,
}

impl NormalizedEvent {
    /// Record for a push to `to_branch`.
    pub fn push(
        request_id: impl Into<String>,
        author: impl Into<String>,
        to_branch: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            author: author.into(),
            action: EventAction::Push,
            from_branch: None,
            to_branch: to_branch.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Record for a pull request opened or merged from `from_branch` into `to_branch`.
    ///
    /// `merged` selects [`EventAction::Merge`] over [`EventAction::PullRequest`].
    pub fn pull_request(
        request_id: impl Into<String>,
        author: impl Into<String>,
        from_branch: impl Into<String>,
        to_branch: impl Into<String>,
        timestamp: impl Into<String>,
        merged: bool,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            author: author.into(),
            action: if merged {
                EventAction::Merge
            } else {
                EventAction::PullRequest
            },
            from_branch: Some(from_branch.into()),
            to_branch: to_branch.into(),
            timestamp: timestamp.into(),
        }
    }
}

/// Result of normalizing one webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// A record to append to the store.
    Record(NormalizedEvent),
    /// The event type is not tracked; nothing is stored and nothing failed.
    Ignored,
}

impl WebhookOutcome {
    /// Returns the record, if one was produced.
    pub fn into_record(self) -> Option<NormalizedEvent> {
        match self {
            Self::Record(event) => Some(event),
            Self::Ignored => None,
        }
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored)
    }
}
