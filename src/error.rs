//! Unified error types for the air-quality backend.

use thiserror::Error;

/// Unified error type for the backend.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration values failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Outbound provider error.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// HTTP client construction error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Errors raised while talking to an external provider (search or text generation).
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Response status code.
        status: u16,
        /// Response body, possibly truncated.
        body: String,
    },

    /// Response body did not have the expected shape.
    #[error("failed to parse provider response: {0}")]
    Parse(String),

    /// Provider answered successfully but with no usable content.
    #[error("provider returned an empty response")]
    EmptyResponse,
}

impl ProviderError {
    /// Longest status body kept in the error, in characters.
    pub const STATUS_BODY_LIMIT: usize = 200;

    /// Build a [`ProviderError::Status`], cutting the body on a character boundary.
    pub fn status(status: u16, body: &str) -> Self {
        Self::Status {
            status,
            body: body.chars().take(Self::STATUS_BODY_LIMIT).collect(),
        }
    }
}

/// Errors on the push side of a streaming connection.
#[derive(Error, Debug)]
pub enum StreamError {
    /// The peer already closed the connection.
    #[error("connection closed")]
    Closed,

    /// Sending a frame failed at the transport level.
    #[error("failed to send update: {0}")]
    SendFailed(String),

    /// The update could not be encoded.
    #[error("failed to encode update: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_body_is_cut_on_char_boundary() {
        let body = format!("{}é tail", "a".repeat(199));
        let ProviderError::Status { status, body } = ProviderError::status(503, &body) else {
            panic!("expected status error");
        };
        assert_eq!(status, 503);
        assert_eq!(body.chars().count(), 200);
        assert!(body.ends_with('é'));
    }

    #[test]
    fn provider_error_converts_into_app_error() {
        let err: AppError = ProviderError::EmptyResponse.into();
        assert!(matches!(err, AppError::Provider(ProviderError::EmptyResponse)));
        assert!(err.to_string().starts_with("provider error"));
    }

    #[test]
    fn status_error_includes_code() {
        let err = ProviderError::Status {
            status: 503,
            body: "unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 503: unavailable");
    }
}
