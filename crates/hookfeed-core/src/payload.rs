//! Webhook body decoding.
//!
//! GitHub delivers the same JSON document in one of two encodings depending on
//! how the hook was configured:
//! - `application/json`: the body is the document
//! - `application/x-www-form-urlencoded`: the document is the `payload` field
//!
//! Decoding happens before normalization, so the normalizer never sees which
//! encoding was used.

use serde_json::Value;

use crate::error::{HookError, HookResult};

/// Content type GitHub uses for form-encoded deliveries.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Form field that carries the JSON document.
pub const FORM_PAYLOAD_FIELD: &str = "payload";

/// How a webhook body is encoded on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    Json,
    Form,
}

impl BodyEncoding {
    /// Selects the encoding from a `Content-Type` header value.
    ///
    /// Anything that is not form-encoded is read as JSON, including a missing
    /// header or parameters such as `; charset=utf-8`.
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        match content_type {
            Some(value) if value.to_ascii_lowercase().contains(FORM_CONTENT_TYPE) => Self::Form,
            _ => Self::Json,
        }
    }
}

/// Decodes a raw webhook body into its JSON document.
pub fn decode_body(content_type: Option<&str>, body: &[u8]) -> HookResult<Value> {
    match BodyEncoding::from_content_type(content_type) {
        BodyEncoding::Json => parse_json(body),
        BodyEncoding::Form => decode_form(body),
    }
}

/// `form_urlencoded::parse` decodes lossily, replacing invalid UTF-8 with
/// U+FFFD. A payload containing the replacement character is treated as
/// corrupted rather than stored as altered text.
fn decode_form(body: &[u8]) -> HookResult<Value> {
    let payload = url::form_urlencoded::parse(body)
        .find(|(key, _)| key == FORM_PAYLOAD_FIELD)
        .map(|(_, value)| value.into_owned());

    match payload {
        Some(raw) if raw.contains(char::REPLACEMENT_CHARACTER) => Err(HookError::invalid_form(
            format!("form field `{}` is not valid UTF-8", FORM_PAYLOAD_FIELD),
        )),
        Some(raw) => serde_json::from_str(&raw).map_err(|e| {
            HookError::invalid_form(format!("form field `{}` is not JSON: {}", FORM_PAYLOAD_FIELD, e))
        }),
        // An absent field decodes as an empty document; required-field checks
        // in the normalizer report what is actually missing.
        None => Ok(Value::Object(Default::default())),
    }
}

fn parse_json(body: &[u8]) -> HookResult<Value> {
    serde_json::from_slice(body)
        .map_err(|e| HookError::invalid_json(format!("request body is not JSON: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serde_json::json;

    #[test]
    fn test_encoding_from_content_type() {
        assert_eq!(
            BodyEncoding::from_content_type(Some("application/json")),
            BodyEncoding::Json
        );
        assert_eq!(
            BodyEncoding::from_content_type(Some("application/x-www-form-urlencoded; charset=utf-8")),
            BodyEncoding::Form
        );
        assert_eq!(
            BodyEncoding::from_content_type(Some("Application/X-WWW-Form-Urlencoded")),
            BodyEncoding::Form
        );
        assert_eq!(BodyEncoding::from_content_type(None), BodyEncoding::Json);
    }

    #[test]
    fn test_decode_json_body() {
        let value = decode_body(Some("application/json"), br#"{"after":"abc123"}"#).unwrap();
        assert_eq!(value, json!({"after": "abc123"}));
    }

    #[test]
    fn test_decode_json_without_content_type() {
        let value = decode_body(None, br#"{"zen":"Keep it logically awesome."}"#).unwrap();
        assert_eq!(value["zen"], "Keep it logically awesome.");
    }

    #[test]
    fn test_decode_form_body() {
        let body = b"payload=%7B%22after%22%3A%22abc123%22%2C%22ref%22%3A%22refs%2Fheads%2Fmain%22%7D";
        let value = decode_body(Some(FORM_CONTENT_TYPE), body).unwrap();
        assert_eq!(value, json!({"after": "abc123", "ref": "refs/heads/main"}));
    }

    #[test]
    fn test_decode_form_plus_as_space() {
        let body = b"payload=%7B%22message%22%3A%22fix+the+build%22%7D";
        let value = decode_body(Some(FORM_CONTENT_TYPE), body).unwrap();
        assert_eq!(value["message"], "fix the build");
    }

    #[test]
    fn test_form_without_payload_field_is_empty_document() {
        let value = decode_body(Some(FORM_CONTENT_TYPE), b"other=1").unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_form_payload_not_json() {
        let err = decode_body(Some(FORM_CONTENT_TYPE), b"payload=not-json").unwrap_err();
        assert_eq!(err.code(), ErrorCode::PayloadInvalidForm);
    }

    #[test]
    fn test_form_payload_with_invalid_utf8() {
        // %FF is not a valid UTF-8 sequence
        let body = b"payload=%7B%22after%22%3A%22ab%FFc%22%7D";
        let err = decode_body(Some(FORM_CONTENT_TYPE), body).unwrap_err();
        assert_eq!(err.code(), ErrorCode::PayloadInvalidForm);
        assert!(err.to_string().contains("UTF-8"));
    }

    #[test]
    fn test_invalid_json_body() {
        let err = decode_body(Some("application/json"), b"{not json").unwrap_err();
        assert!(matches!(err, HookError::MalformedPayload { .. }));
        assert_eq!(err.code(), ErrorCode::PayloadInvalidJson);
    }
}
