//! Error types for the admin API client.
//!
//! # Design
//! The API reports failures as a JSON body with an `error` message field.
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the resource does not exist" from "the server returned an unexpected
//! status"; both carry the server's message when the body parses.
//! `user_message` produces the single string the notification layer shows,
//! falling back to a generic message when the server gave none.

use std::fmt;

/// Fallback shown to the user when the server reports no usable message.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Errors returned by `AdminClient` parse methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The server returned 404 — the requested resource does not exist.
    NotFound { message: Option<String> },

    /// The server returned a non-2xx status other than 404.
    Server { status: u16, message: Option<String> },

    /// The response body could not be deserialized into the expected type.
    Deserialization(String),

    /// The request payload could not be serialized.
    Serialization(String),
}

impl ApiError {
    /// The user-visible message for this error: the server-reported text
    /// when present, otherwise the generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::NotFound { message } | ApiError::Server { message, .. } => message
                .clone()
                .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string()),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound { message: Some(m) } => write!(f, "resource not found: {m}"),
            ApiError::NotFound { message: None } => write!(f, "resource not found"),
            ApiError::Server {
                status,
                message: Some(m),
            } => write!(f, "HTTP {status}: {m}"),
            ApiError::Server {
                status,
                message: None,
            } => write!(f, "HTTP {status}"),
            ApiError::Deserialization(msg) => write!(f, "deserialization failed: {msg}"),
            ApiError::Serialization(msg) => write!(f, "serialization failed: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_server_text() {
        let err = ApiError::Server {
            status: 400,
            message: Some("Title is required".to_string()),
        };
        assert_eq!(err.user_message(), "Title is required");
    }

    #[test]
    fn user_message_falls_back_when_absent() {
        let err = ApiError::Server {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn not_found_carries_server_text() {
        let err = ApiError::NotFound {
            message: Some("Donation not found".to_string()),
        };
        assert_eq!(err.user_message(), "Donation not found");
    }
}
