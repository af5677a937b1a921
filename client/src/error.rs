//! Client error handling
//!
//! Every failure the client can surface is a `ClientError`. HTTP error
//! responses are normalized into a variant by status, with the message
//! pulled from the usual backend error shapes.

use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;
use tracker_shared::errors::{DecodeError, FormError};
use tracker_shared::validation::flatten_field_errors;

/// Message shown for any transport failure
pub const NETWORK_ERROR_MESSAGE: &str = "Could not connect to server";

/// Client error type
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Could not connect to server")]
    Network(String),

    #[error("{}", or_default(.0, "Authentication required"))]
    Unauthorized(String),

    #[error("{}", or_default(.0, "Permission denied"))]
    Forbidden(String),

    #[error("{}", or_default(.0, "Not found"))]
    NotFound(String),

    #[error("{}", or_default(.message, "Invalid request"))]
    Validation {
        message: String,
        fields: BTreeMap<String, Vec<String>>,
    },

    #[error("Server error ({status}): {}", or_default(.message, "Internal server error"))]
    Server { status: u16, message: String },

    #[error("Request failed ({status}): {}", or_default(.message, "Unexpected response"))]
    Http { status: u16, message: String },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

fn or_default<'a>(message: &'a str, fallback: &'a str) -> &'a str {
    if message.trim().is_empty() {
        fallback
    } else {
        message
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Build an error from a non-success response
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: Option<Value> = serde_json::from_str(body).ok();
        let fields = parsed.as_ref().map(field_map).unwrap_or_default();
        let message = match &parsed {
            Some(value) => extract_message(value)
                .or_else(|| (!fields.is_empty()).then(|| flatten_field_errors(value).join(", ")))
                .unwrap_or_else(|| compact(value)),
            None => body.trim().to_string(),
        };

        match status {
            400 | 422 => ClientError::Validation { message, fields },
            401 => ClientError::Unauthorized(message),
            403 => ClientError::Forbidden(message),
            404 => ClientError::NotFound(message),
            500..=599 => ClientError::Server { status, message },
            _ => ClientError::Http { status, message },
        }
    }

    /// HTTP status, if the error came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized(_) => Some(401),
            ClientError::Forbidden(_) => Some(403),
            ClientError::NotFound(_) => Some(404),
            ClientError::Validation { .. } => Some(400),
            ClientError::Server { status, .. } | ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized(_))
    }

    /// Message the backend sent, if any
    pub fn detail(&self) -> Option<&str> {
        let message = match self {
            ClientError::Unauthorized(m)
            | ClientError::Forbidden(m)
            | ClientError::NotFound(m)
            | ClientError::Validation { message: m, .. }
            | ClientError::Server { message: m, .. }
            | ClientError::Http { message: m, .. } => m.as_str(),
            ClientError::Network(_) => NETWORK_ERROR_MESSAGE,
            _ => return None,
        };
        (!message.trim().is_empty()).then_some(message)
    }

    /// Text for a page-level banner
    pub fn banner(&self) -> String {
        match self {
            ClientError::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
            ClientError::Server { .. } => "Server error. Please try again later.".to_string(),
            ClientError::Decode(_) => "Unexpected response from server".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            ClientError::Config(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl From<config::ConfigError> for ClientError {
    fn from(err: config::ConfigError) -> Self {
        ClientError::Config(err.to_string())
    }
}

/// `{"error": msg}` or `{"detail": msg}`
fn extract_message(value: &Value) -> Option<String> {
    ["error", "detail"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::to_string)
}

fn compact(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Field-error map, keeping only array-of-string entries
fn field_map(value: &Value) -> BTreeMap<String, Vec<String>> {
    let Some(map) = value.as_object() else {
        return BTreeMap::new();
    };
    map.iter()
        .filter_map(|(field, messages)| {
            let messages: Vec<String> = messages
                .as_array()?
                .iter()
                .filter_map(|m| m.as_str().map(str::to_string))
                .collect();
            (!messages.is_empty()).then(|| (field.clone(), messages))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_error_key_message() {
        let err = ClientError::from_response(401, r#"{"error": "Invalid credentials"}"#);
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn test_detail_key_message() {
        let err = ClientError::from_response(401, r#"{"detail": "Token is invalid or expired"}"#);
        assert_eq!(err.detail(), Some("Token is invalid or expired"));
    }

    #[test]
    fn test_field_errors_are_flattened() {
        let err = ClientError::from_response(
            400,
            r#"{"username": ["A user with that username already exists."]}"#,
        );
        match &err {
            ClientError::Validation { message, fields } => {
                assert_eq!(message, "Username: A user with that username already exists.");
                assert_eq!(fields["username"].len(), 1);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_body_has_no_detail() {
        let err = ClientError::from_response(401, "");
        assert_eq!(err.detail(), None);
        assert_eq!(err.to_string(), "Authentication required");
    }

    #[test]
    fn test_unrecognized_json_is_compacted() {
        let err = ClientError::from_response(409, r#"{"code": 7}"#);
        assert_eq!(err.detail(), Some(r#"{"code":7}"#));
    }

    #[rstest]
    #[case(400, Some(400))]
    #[case(401, Some(401))]
    #[case(403, Some(403))]
    #[case(404, Some(404))]
    #[case(502, Some(502))]
    #[case(418, Some(418))]
    fn test_status_mapping(#[case] status: u16, #[case] expected: Option<u16>) {
        assert_eq!(ClientError::from_response(status, "").status(), expected);
    }

    #[test]
    fn test_banners() {
        assert_eq!(
            ClientError::Network("refused".into()).banner(),
            "Could not connect to server"
        );
        assert_eq!(
            ClientError::from_response(500, "boom").banner(),
            "Server error. Please try again later."
        );
        assert_eq!(ClientError::from_response(404, "").banner(), "Not found");
    }
}
