//! Client error types.

use thiserror::Error;

/// Message shown when the endpoint answers with a non-success status.
pub const STATUS_FAILURE_MESSAGE: &str = "Failed to fetch response";

/// Message shown when a failure carries no message of its own.
pub const UNEXPECTED_FAILURE_MESSAGE: &str = "An unexpected error occurred.";

/// Errors produced while asking the query endpoint.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The endpoint answered, but with a non-success status.
    ///
    /// The response body is never inspected for a more specific message.
    #[error("Failed to fetch response")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// Sending the request or reading the response body failed.
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("{0}")]
    Decode(#[from] serde_json::Error),

    /// A backend-specific failure with a message.
    #[error("{0}")]
    Transport(String),

    /// A failure that carries no message.
    #[error("An unexpected error occurred.")]
    Unexpected,
}

impl ClientError {
    pub fn transport(message: impl Into<String>) -> Self {
        ClientError::Transport(message.into())
    }

    /// The failure's own message, if it has one.
    ///
    /// `Status` always maps to the fixed generic message; `Unexpected` has none.
    pub fn message(&self) -> Option<String> {
        match self {
            ClientError::Unexpected => None,
            ClientError::Transport(msg) if msg.is_empty() => None,
            other => Some(other.to_string()),
        }
    }

    /// Message to display to the user.
    pub fn display_message(&self) -> String {
        self.message()
            .unwrap_or_else(|| UNEXPECTED_FAILURE_MESSAGE.to_string())
    }

    pub fn is_status(&self) -> bool {
        matches!(self, ClientError::Status { .. })
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Status { status } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_uses_generic_message() {
        let err = ClientError::Status { status: 500 };
        assert_eq!(err.display_message(), "Failed to fetch response");
        assert_eq!(err.to_string(), STATUS_FAILURE_MESSAGE);
        assert_eq!(ClientError::Unexpected.to_string(), UNEXPECTED_FAILURE_MESSAGE);
        assert_eq!(err.status_code(), Some(500));
        assert!(err.is_status());
    }

    #[test]
    fn test_transport_keeps_own_message() {
        let err = ClientError::transport("network down");
        assert_eq!(err.message().as_deref(), Some("network down"));
        assert_eq!(err.display_message(), "network down");
    }

    #[test]
    fn test_messageless_failures_fall_back() {
        assert_eq!(ClientError::Unexpected.message(), None);
        assert_eq!(
            ClientError::Unexpected.display_message(),
            "An unexpected error occurred."
        );
        assert_eq!(
            ClientError::transport("").display_message(),
            "An unexpected error occurred."
        );
    }

    #[test]
    fn test_decode_error_message() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let expected = json_err.to_string();
        let err = ClientError::from(json_err);
        assert_eq!(err.display_message(), expected);
        assert!(!err.is_status());
    }
}
