//! Gateway error taxonomy
//!
//! Every failure a caller can observe from the gateway is one of these
//! variants. Only [`GatewayError::Http`] carries a status, which is what the
//! retry layer inspects.

use backoffice_domain::constants::SESSION_EXPIRED_MESSAGE;
use backoffice_domain::{BackofficeError, RetryConfig};
use reqwest::StatusCode;
use thiserror::Error;

/// Gateway operation errors
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error("request exceeded time limit")]
    Timeout,

    /// Non-2xx response; `message` is server-provided when available
    #[error("{message}")]
    Http { status: StatusCode, message: String },

    #[error("{}", SESSION_EXPIRED_MESSAGE)]
    SessionExpired,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Failed to encode request: {0}")]
    Encode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Credential store error: {0}")]
    Credentials(String),

    #[error("Authentication response did not contain an access token")]
    InvalidAuthResponse,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GatewayError {
    /// HTTP status attached to this error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether `retry` allows another attempt after this error.
    ///
    /// Errors without a status are never retried.
    pub fn is_retryable(&self, retry: &RetryConfig) -> bool {
        self.status().is_some_and(|status| retry.is_retryable_status(status.as_u16()))
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }
}

impl From<BackofficeError> for GatewayError {
    fn from(err: BackofficeError) -> Self {
        Self::Credentials(err.to_string())
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_builder() {
            Self::InvalidUrl(err.to_string())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<url::ParseError> for GatewayError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16) -> GatewayError {
        GatewayError::Http {
            status: StatusCode::from_u16(status).unwrap(),
            message: "boom".into(),
        }
    }

    #[test]
    fn timeout_message_is_stable() {
        assert_eq!(GatewayError::Timeout.to_string(), "request exceeded time limit");
    }

    #[test]
    fn http_errors_display_server_message() {
        assert_eq!(http(400).to_string(), "boom");
        assert_eq!(http(400).status(), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn only_configured_statuses_are_retryable() {
        let retry = RetryConfig::default();
        assert!(http(503).is_retryable(&retry));
        assert!(http(408).is_retryable(&retry));
        assert!(!http(404).is_retryable(&retry));
        assert!(!http(401).is_retryable(&retry));
    }

    #[test]
    fn statusless_errors_are_never_retryable() {
        let retry = RetryConfig::default();
        assert!(!GatewayError::Timeout.is_retryable(&retry));
        assert!(!GatewayError::Network("reset".into()).is_retryable(&retry));
        assert!(!GatewayError::Decode("eof".into()).is_retryable(&retry));
        assert!(GatewayError::Timeout.status().is_none());
    }

    #[test]
    fn domain_errors_map_to_credentials() {
        let err: GatewayError = BackofficeError::Storage("disk full".into()).into();
        assert!(matches!(err, GatewayError::Credentials(msg) if msg.contains("disk full")));
    }
}
