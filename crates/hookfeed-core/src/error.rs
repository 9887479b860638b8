//! Error types for hookfeed operations.
//!
//! Every failure in the decode → normalize → store pipeline is one of these
//! variants. An unrecognized event type is not an error; see
//! [`WebhookOutcome::Ignored`](crate::types::WebhookOutcome::Ignored).

use thiserror::Error;

/// Result type alias for hookfeed operations.
pub type HookResult<T> = Result<T, HookError>;

/// Main error type for all hookfeed operations.
#[derive(Error, Debug)]
pub enum HookError {
    /// Body could not be decoded, or a recognized event lacks a required field.
    #[error("Malformed payload: {message}")]
    MalformedPayload { message: String, code: ErrorCode },

    /// The event store is unreachable or an insert/query failed.
    #[error("Storage unavailable: {message}")]
    StorageUnavailable {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Store backend not compiled into this build.
    #[error("Store provider not supported: {provider}")]
    UnsupportedProvider { provider: String },
}

/// Error codes for programmatic handling and log correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Payload (PAYLOAD_xxx)
    PayloadInvalidJson,
    PayloadMissingField,
    PayloadInvalidForm,

    // Store (STORE_xxx)
    StoreConnectionFailed,
    StoreInsertFailed,
    StoreQueryFailed,

    // Configuration
    ConfigInvalid,
}

impl ErrorCode {
    /// Get the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::PayloadInvalidJson => "PAYLOAD_001",
            ErrorCode::PayloadMissingField => "PAYLOAD_002",
            ErrorCode::PayloadInvalidForm => "PAYLOAD_003",
            ErrorCode::StoreConnectionFailed => "STORE_001",
            ErrorCode::StoreInsertFailed => "STORE_002",
            ErrorCode::StoreQueryFailed => "STORE_003",
            ErrorCode::ConfigInvalid => "CONFIG_001",
        }
    }
}

impl HookError {
    /// Create a malformed payload error for a body that is not valid JSON.
    pub fn invalid_json(message: impl Into<String>) -> Self {
        Self::MalformedPayload {
            message: message.into(),
            code: ErrorCode::PayloadInvalidJson,
        }
    }

    /// Create a malformed payload error for a missing or mistyped field.
    pub fn missing_field(message: impl Into<String>) -> Self {
        Self::MalformedPayload {
            message: message.into(),
            code: ErrorCode::PayloadMissingField,
        }
    }

    /// Create a malformed payload error for an undecodable form body.
    pub fn invalid_form(message: impl Into<String>) -> Self {
        Self::MalformedPayload {
            message: message.into(),
            code: ErrorCode::PayloadInvalidForm,
        }
    }

    /// Create a storage error for a client that could not be built or reached.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::StorageUnavailable {
            message: message.into(),
            code: ErrorCode::StoreConnectionFailed,
            source: None,
        }
    }

    /// Create a storage error for a failed insert.
    pub fn insert(message: impl Into<String>) -> Self {
        Self::StorageUnavailable {
            message: message.into(),
            code: ErrorCode::StoreInsertFailed,
            source: None,
        }
    }

    /// Create a storage error for a failed query.
    pub fn query(message: impl Into<String>) -> Self {
        Self::StorageUnavailable {
            message: message.into(),
            code: ErrorCode::StoreQueryFailed,
            source: None,
        }
    }

    /// Attach the underlying cause to a storage error.
    pub fn with_source(self, err: impl std::error::Error + Send + Sync + 'static) -> Self {
        match self {
            Self::StorageUnavailable { message, code, .. } => Self::StorageUnavailable {
                message,
                code,
                source: Some(Box::new(err)),
            },
            other => other,
        }
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MalformedPayload { code, .. } => *code,
            Self::StorageUnavailable { code, .. } => *code,
            Self::Configuration(_) | Self::UnsupportedProvider { .. } => ErrorCode::ConfigInvalid,
        }
    }

    /// Whether the failure was caused by the inbound request rather than the system.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MalformedPayload { .. })
    }
}
