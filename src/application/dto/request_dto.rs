//! Request and download DTOs.

use std::fmt;
use std::path::PathBuf;

use zeroize::Zeroizing;

use crate::domain::entities::{Credentials, RequestData};

/// Parameters for a single authorized request.
#[derive(Clone)]
pub struct DispatchRequest {
    /// Target URL.
    pub url: String,
    /// Method name, matched case-insensitively.
    pub method: String,
    /// Bearer token.
    pub token: Option<String>,
    /// Basic-auth username.
    pub username: Option<String>,
    /// Basic-auth password.
    pub password: Option<Zeroizing<String>>,
    /// Optional payload.
    pub data: Option<RequestData>,
}

impl DispatchRequest {
    /// Creates new request with no credentials.
    #[must_use]
    pub fn new(url: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: method.into(),
            token: None,
            username: None,
            password: None,
            data: None,
        }
    }

    /// Creates new GET request.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(url, "get")
    }

    /// Creates new POST request.
    #[must_use]
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(url, "post")
    }

    /// Sets the bearer token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the basic-auth pair.
    #[must_use]
    pub fn with_basic(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(Zeroizing::new(password.into()));
        self
    }

    /// Sets the payload.
    #[must_use]
    pub fn with_data(mut self, data: RequestData) -> Self {
        self.data = Some(data);
        self
    }

    /// Returns the basic-auth pair when both halves are present.
    #[must_use]
    pub fn credentials(&self) -> Option<Credentials> {
        Credentials::from_parts(
            self.username.as_deref(),
            self.password.as_ref().map(|p| p.as_str()),
        )
    }
}

impl fmt::Debug for DispatchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchRequest")
            .field("url", &self.url)
            .field("method", &self.method)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("data", &self.data)
            .finish()
    }
}

/// Parameters for a download.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    /// Resource URL; its last path segment names the output file.
    pub url: String,
    /// Credentials exchanged for a token.
    pub credentials: Credentials,
}

impl DownloadRequest {
    /// Creates new download request.
    #[must_use]
    pub fn new(url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            url: url.into(),
            credentials,
        }
    }
}

/// Result of a successful download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadResponse {
    /// Path of the written file.
    pub path: PathBuf,
    /// Number of bytes written.
    pub bytes_written: usize,
}

impl DownloadResponse {
    /// Creates new download response.
    #[must_use]
    pub const fn new(path: PathBuf, bytes_written: usize) -> Self {
        Self {
            path,
            bytes_written,
        }
    }
}
