//! Error types for Asana calls and task submission.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure reported by an [`AsanaApi`](crate::ports::AsanaApi) call.
///
/// Serializable so recorded cassettes can carry the exact failure back
/// through a replaying adapter.
#[derive(Debug, Clone, Error, PartialEq, Serialize, Deserialize)]
pub enum ApiError {
    /// The request never produced a response (timeout, refused, DNS).
    #[error("network error: {0}")]
    Network(String),

    /// Asana answered with a non-success status.
    #[error("Asana rejected the request ({status}): {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the error payload.
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Failure of a single task submission.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SubmissionError {
    /// Transport-level failure; the task may or may not exist remotely.
    #[error("Failed to reach Asana: {0}")]
    Network(String),

    /// Asana refused the task.
    #[error("{0}")]
    Rejected(String),

    /// Asana accepted the call but the response could not be read.
    #[error("Unexpected response from Asana: {0}")]
    Malformed(String),
}

impl SubmissionError {
    /// Human-readable message suitable for a failure notification.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Network(msg) | Self::Rejected(msg) | Self::Malformed(msg) => msg,
        }
    }
}

impl From<ApiError> for SubmissionError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Network(msg) => Self::Network(msg),
            ApiError::Rejected { message, .. } => Self::Rejected(message),
            ApiError::Malformed(msg) => Self::Malformed(msg),
        }
    }
}

/// Invalid or missing configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("{0} environment variable not set")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("invalid value for {name}: {value:?}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_keeps_only_the_service_message() {
        let err = SubmissionError::from(ApiError::Rejected {
            status: 400,
            message: "Invalid custom field".into(),
        });
        assert_eq!(err, SubmissionError::Rejected("Invalid custom field".into()));
        assert_eq!(err.to_string(), "Invalid custom field");
    }

    #[test]
    fn network_error_message_is_preserved() {
        let err = SubmissionError::from(ApiError::Network("connection refused".into()));
        assert_eq!(err.message(), "connection refused");
        assert!(err.to_string().contains("Failed to reach Asana"));
    }

    #[test]
    fn api_error_survives_json() {
        let err = ApiError::Rejected { status: 403, message: "Forbidden".into() };
        let value = serde_json::to_value(&err).unwrap();
        let back: ApiError = serde_json::from_value(value).unwrap();
        assert_eq!(err, back);
    }
}
