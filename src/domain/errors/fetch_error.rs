//! Fetch error types.

use bytes::Bytes;
use thiserror::Error;

/// Error variants for token fetching, request dispatch and downloads.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum FetchError {
    #[error("either an access token or a username and password must be provided")]
    MissingCredentials,

    #[error("unsupported HTTP method: {method}")]
    UnsupportedMethod { method: String },

    #[error("network error: {message}")]
    Network { message: String },

    #[error("invalid token response: {message}")]
    InvalidResponse { message: String },

    #[error("token response does not contain an access_token")]
    MissingAccessToken,

    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("cannot derive an output file name from {url:?}")]
    InvalidFileName { url: String },

    #[error("unexpected HTTP status {status}")]
    HttpStatus { status: u16, body: Bytes },

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected error: {message}")]
    Unexpected { message: String },
}

impl FetchError {
    /// Creates unsupported method error.
    #[must_use]
    pub fn unsupported_method(method: impl Into<String>) -> Self {
        Self::UnsupportedMethod {
            method: method.into(),
        }
    }

    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates invalid response error.
    #[must_use]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Creates invalid URL error.
    #[must_use]
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether the error was raised before any network activity.
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::MissingCredentials | Self::UnsupportedMethod { .. } | Self::InvalidUrl { .. }
        )
    }

    /// Returns the HTTP status carried by the error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
