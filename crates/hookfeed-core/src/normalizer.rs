//! GitHub webhook normalizer.
//!
//! Maps a webhook delivery to a [`NormalizedEvent`] or to
//! [`WebhookOutcome::Ignored`].
//!
//! # Classification
//!
//! 1. The event kind comes from the `X-GitHub-Event` header
//! 2. Kinds other than `push` and `pull_request` are ignored without
//!    looking at the body
//! 3. Tracked kinds are parsed into typed payloads up front; a missing or
//!    mistyped required field is [`HookError::MalformedPayload`]
//! 4. A `pull_request` delivery with `action: "closed"` and `merged: true`
//!    is a merge, timestamped with `merged_at`; every other pull request
//!    delivery is timestamped with `created_at`

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{HookError, HookResult};
use crate::payload::decode_body;
use crate::types::{NormalizedEvent, WebhookOutcome};

/// Header carrying the GitHub event type.
pub const GITHUB_EVENT_HEADER: &str = "x-github-event";

/// Webhook event kinds, as named by the `X-GitHub-Event` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitHubEventKind {
    Push,
    PullRequest,
    /// Any kind this system does not record (`issues`, `ping`, ...).
    Other(String),
}

impl GitHubEventKind {
    pub fn from_header(value: &str) -> Self {
        match value {
            "push" => Self::Push,
            "pull_request" => Self::PullRequest,
            other => Self::Other(other.to_string()),
        }
    }

    /// Whether deliveries of this kind produce a record.
    pub fn is_tracked(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for GitHubEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Push => f.write_str("push"),
            Self::PullRequest => f.write_str("pull_request"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// Decodes and normalizes one webhook delivery.
///
/// Untracked event kinds short-circuit to [`WebhookOutcome::Ignored`] before
/// the body is decoded, so a `ping` with an odd body is still ignored rather
/// than rejected.
pub fn normalize_delivery(
    event_type: &str,
    content_type: Option<&str>,
    body: &[u8],
) -> HookResult<WebhookOutcome> {
    let kind = GitHubEventKind::from_header(event_type);
    if !kind.is_tracked() {
        return Ok(WebhookOutcome::Ignored);
    }

    let payload = decode_body(content_type, body)?;
    normalize(&kind, &payload)
}

/// Normalizes an already decoded payload.
pub fn normalize(kind: &GitHubEventKind, payload: &Value) -> HookResult<WebhookOutcome> {
    let event = match kind {
        GitHubEventKind::Push => normalize_push(parse(kind, payload)?),
        GitHubEventKind::PullRequest => normalize_pull_request(parse(kind, payload)?)?,
        GitHubEventKind::Other(_) => return Ok(WebhookOutcome::Ignored),
    };

    Ok(WebhookOutcome::Record(event))
}

fn parse<'a, T: Deserialize<'a>>(kind: &GitHubEventKind, payload: &'a Value) -> HookResult<T> {
    T::deserialize(payload)
        .map_err(|e| HookError::missing_field(format!("{} payload: {}", kind, e)))
}

// ============================================================================
// Raw payload structures
//
// Only the fields that feed a NormalizedEvent are declared. Everything else
// GitHub sends is ignored by serde.
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawPushPayload {
    after: String,
    #[serde(rename = "ref")]
    git_ref: String,
    pusher: RawPusher,
    head_commit: RawCommit,
}

#[derive(Debug, Deserialize)]
struct RawPusher {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawCommit {
    timestamp: String,
}

#[derive(Debug, Deserialize)]
struct RawPullRequestPayload {
    action: Option<String>,
    pull_request: RawPullRequest,
}

#[derive(Debug, Deserialize)]
struct RawPullRequest {
    number: u64,
    user: RawUser,
    head: RawBranch,
    base: RawBranch,
    created_at: String,
    merged: Option<bool>,
    merged_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawUser {
    login: String,
}

#[derive(Debug, Deserialize)]
struct RawBranch {
    #[serde(rename = "ref")]
    name: String,
}

fn normalize_push(raw: RawPushPayload) -> NormalizedEvent {
    NormalizedEvent::push(
        raw.after,
        raw.pusher.name,
        branch_name(&raw.git_ref),
        raw.head_commit.timestamp,
    )
}

fn normalize_pull_request(raw: RawPullRequestPayload) -> HookResult<NormalizedEvent> {
    let pr = raw.pull_request;
    let merged = raw.action.as_deref() == Some("closed") && pr.merged.unwrap_or(false);

    let timestamp = if merged {
        pr.merged_at.ok_or_else(|| {
            HookError::missing_field(format!(
                "pull_request payload: merged pull request #{} has no `merged_at`",
                pr.number
            ))
        })?
    } else {
        pr.created_at
    };

    Ok(NormalizedEvent::pull_request(
        pr.number.to_string(),
        pr.user.login,
        pr.head.name,
        pr.base.name,
        timestamp,
        merged,
    ))
}

/// Last `/`-separated segment of a git ref (`refs/heads/main` → `main`).
fn branch_name(git_ref: &str) -> &str {
    git_ref.rsplit('/').next().unwrap_or(git_ref)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::types::EventAction;
    use serde_json::json;

    fn push_payload() -> Value {
        json!({
            "after": "abc123",
            "pusher": { "name": "alice", "email": "alice@example.com" },
            "ref": "refs/heads/main",
            "head_commit": { "id": "abc123", "timestamp": "2024-01-01T00:00:00Z" },
            "repository": { "full_name": "octo/repo" }
        })
    }

    fn pull_request_payload(action: &str, merged: bool) -> Value {
        json!({
            "action": action,
            "number": 7,
            "pull_request": {
                "number": 7,
                "user": { "login": "bob" },
                "head": { "ref": "feature" },
                "base": { "ref": "main" },
                "created_at": "2024-01-02T00:00:00Z",
                "merged": merged,
                "merged_at": if merged { json!("2024-01-03T00:00:00Z") } else { Value::Null }
            }
        })
    }

    fn record(kind: GitHubEventKind, payload: &Value) -> NormalizedEvent {
        normalize(&kind, payload)
            .unwrap()
            .into_record()
            .expect("expected a record")
    }

    #[test]
    fn test_push_event() {
        let event = record(GitHubEventKind::Push, &push_payload());

        assert_eq!(
            event,
            NormalizedEvent {
                request_id: "abc123".into(),
                author: "alice".into(),
                action: EventAction::Push,
                from_branch: None,
                to_branch: "main".into(),
                timestamp: "2024-01-01T00:00:00Z".into(),
            }
        );
    }

    #[test]
    fn test_push_branch_with_slashes_takes_last_segment() {
        let mut payload = push_payload();
        payload["ref"] = json!("refs/heads/feature/login");

        let event = record(GitHubEventKind::Push, &payload);
        assert_eq!(event.to_branch, "login");
    }

    #[test]
    fn test_push_ref_without_slash() {
        let mut payload = push_payload();
        payload["ref"] = json!("main");

        assert_eq!(record(GitHubEventKind::Push, &payload).to_branch, "main");
    }

    #[test]
    fn test_push_missing_pusher_is_malformed() {
        let mut payload = push_payload();
        payload.as_object_mut().unwrap().remove("pusher");

        let err = normalize(&GitHubEventKind::Push, &payload).unwrap_err();
        assert_eq!(err.code(), ErrorCode::PayloadMissingField);
        assert!(err.to_string().contains("pusher"));
    }

    #[test]
    fn test_push_null_head_commit_is_malformed() {
        // Branch deletions arrive with `head_commit: null`.
        let mut payload = push_payload();
        payload["head_commit"] = Value::Null;

        let err = normalize(&GitHubEventKind::Push, &payload).unwrap_err();
        assert!(matches!(err, HookError::MalformedPayload { .. }));
    }

    #[test]
    fn test_pull_request_opened() {
        let event = record(
            GitHubEventKind::PullRequest,
            &pull_request_payload("opened", false),
        );

        assert_eq!(
            event,
            NormalizedEvent {
                request_id: "7".into(),
                author: "bob".into(),
                action: EventAction::PullRequest,
                from_branch: Some("feature".into()),
                to_branch: "main".into(),
                timestamp: "2024-01-02T00:00:00Z".into(),
            }
        );
    }

    #[test]
    fn test_pull_request_merged_uses_merged_at() {
        let event = record(
            GitHubEventKind::PullRequest,
            &pull_request_payload("closed", true),
        );

        assert_eq!(event.action, EventAction::Merge);
        assert_eq!(event.timestamp, "2024-01-03T00:00:00Z");
        assert_eq!(event.from_branch.as_deref(), Some("feature"));
        assert_eq!(event.to_branch, "main");
    }

    #[test]
    fn test_pull_request_closed_without_merge() {
        let event = record(
            GitHubEventKind::PullRequest,
            &pull_request_payload("closed", false),
        );

        assert_eq!(event.action, EventAction::PullRequest);
        assert_eq!(event.timestamp, "2024-01-02T00:00:00Z");
    }

    #[test]
    fn test_merged_flag_without_closed_action_is_pull_request() {
        let event = record(
            GitHubEventKind::PullRequest,
            &pull_request_payload("edited", true),
        );

        assert_eq!(event.action, EventAction::PullRequest);
        assert_eq!(event.timestamp, "2024-01-02T00:00:00Z");
    }

    #[test]
    fn test_pull_request_without_merged_field() {
        let mut payload = pull_request_payload("closed", false);
        let pr = payload["pull_request"].as_object_mut().unwrap();
        pr.remove("merged");
        pr.remove("merged_at");

        let event = record(GitHubEventKind::PullRequest, &payload);
        assert_eq!(event.action, EventAction::PullRequest);
    }

    #[test]
    fn test_merged_without_merged_at_is_malformed() {
        let mut payload = pull_request_payload("closed", true);
        payload["pull_request"]["merged_at"] = Value::Null;

        let err = normalize(&GitHubEventKind::PullRequest, &payload).unwrap_err();
        assert!(err.to_string().contains("merged_at"));
    }

    #[test]
    fn test_pull_request_missing_user_is_malformed() {
        let mut payload = pull_request_payload("opened", false);
        payload["pull_request"]
            .as_object_mut()
            .unwrap()
            .remove("user");

        let err = normalize(&GitHubEventKind::PullRequest, &payload).unwrap_err();
        assert!(err.is_client_error());
        assert!(err.to_string().contains("pull_request payload"));
    }

    #[test]
    fn test_pull_request_number_must_be_numeric() {
        let mut payload = pull_request_payload("opened", false);
        payload["pull_request"]["number"] = json!("seven");

        assert!(normalize(&GitHubEventKind::PullRequest, &payload).is_err());
    }

    #[test]
    fn test_other_event_kinds_are_ignored() {
        for name in ["issues", "ping", "release", ""] {
            let outcome = normalize(&GitHubEventKind::from_header(name), &json!({})).unwrap();
            assert_eq!(outcome, WebhookOutcome::Ignored, "event {:?}", name);
        }
    }

    #[test]
    fn test_delivery_ignores_before_decoding() {
        let outcome = normalize_delivery("issues", Some("application/json"), b"not json").unwrap();
        assert!(outcome.is_ignored());
    }

    #[test]
    fn test_delivery_json_push() {
        let body = br#"{"after":"abc123","pusher":{"name":"alice"},"ref":"refs/heads/main","head_commit":{"timestamp":"2024-01-01T00:00:00Z"}}"#;
        let event = normalize_delivery("push", Some("application/json"), body)
            .unwrap()
            .into_record()
            .unwrap();

        assert_eq!(event.request_id, "abc123");
        assert_eq!(event.action, EventAction::Push);
        assert_eq!(event.from_branch, None);
    }

    #[test]
    fn test_delivery_form_encoded_pull_request() {
        let json = pull_request_payload("closed", true).to_string();
        let body: String = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("payload", &json)
            .finish();

        let event = normalize_delivery(
            "pull_request",
            Some("application/x-www-form-urlencoded"),
            body.as_bytes(),
        )
        .unwrap()
        .into_record()
        .unwrap();

        assert_eq!(event.action, EventAction::Merge);
        assert_eq!(event.request_id, "7");
    }

    #[test]
    fn test_delivery_undecodable_tracked_body() {
        let err = normalize_delivery("push", Some("application/json"), b"").unwrap_err();
        assert_eq!(err.code(), ErrorCode::PayloadInvalidJson);
    }

    #[test]
    fn test_event_kind_display() {
        assert_eq!(GitHubEventKind::PullRequest.to_string(), "pull_request");
        assert_eq!(GitHubEventKind::from_header("issues").to_string(), "issues");
        assert!(!GitHubEventKind::from_header("issues").is_tracked());
    }
}
