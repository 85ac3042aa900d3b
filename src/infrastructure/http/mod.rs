//! reqwest-based HTTP adapters.

mod client;

pub use client::ReqwestDispatcher;

use std::time::Duration;

use reqwest::Client;
use tracing::warn;

use crate::domain::errors::FetchError;

/// Default `User-Agent` sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("oidc-fetch/", env!("CARGO_PKG_VERSION"));

/// Options shared by every HTTP client in the crate.
#[derive(Debug, Clone)]
pub struct HttpClientOptions {
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Total request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for HttpClientOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

impl HttpClientOptions {
    /// Builds a reqwest client from the options.
    ///
    /// # Errors
    /// Returns error if the TLS backend cannot be initialized.
    pub fn build_client(&self) -> Result<Client, FetchError> {
        let mut builder = Client::builder().user_agent(&self.user_agent);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        builder
            .build()
            .map_err(|e| FetchError::unexpected(format!("failed to create HTTP client: {e}")))
    }
}

/// Maps a reqwest transport failure to a network error.
pub(crate) fn transport_error(e: &reqwest::Error, target: &str) -> FetchError {
    warn!(error = %e, target, "HTTP transport failure");
    if e.is_timeout() {
        FetchError::network(format!("request to {target} timed out"))
    } else if e.is_connect() {
        FetchError::network(format!("failed to connect to {target}"))
    } else {
        FetchError::network(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        assert!(HttpClientOptions::default().build_client().is_ok());
    }

    #[test]
    fn test_client_creation_with_timeout() {
        let options = HttpClientOptions {
            timeout: Some(Duration::from_secs(5)),
            ..HttpClientOptions::default()
        };
        assert!(options.build_client().is_ok());
    }

    #[test]
    fn test_default_user_agent_carries_version() {
        assert!(DEFAULT_USER_AGENT.starts_with("oidc-fetch/"));
    }
}
