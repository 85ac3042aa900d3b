//! HTTP request and response value objects.

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use url::Url;
use zeroize::Zeroizing;

use super::{AccessToken, Credentials};
use crate::domain::errors::FetchError;

/// Query parameter carrying the token when [`TokenPlacement::Query`] is used.
pub const ACCESS_TOKEN_PARAM: &str = "access_token";

/// Supported request methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET.
    Get,
    /// HTTP POST.
    Post,
}

impl FromStr for HttpMethod {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "post" => Ok(Self::Post),
            _ => Err(FetchError::unsupported_method(s)),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// Where the bearer token travels on a download request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenPlacement {
    /// `Authorization: Bearer <token>` header.
    #[default]
    Header,
    /// `access_token=<token>` query parameter.
    Query,
}

impl FromStr for TokenPlacement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "header" => Ok(Self::Header),
            "query" => Ok(Self::Query),
            other => Err(format!("unknown token placement {other:?}, expected header or query")),
        }
    }
}

impl fmt::Display for TokenPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header => write!(f, "header"),
            Self::Query => write!(f, "query"),
        }
    }
}

/// Authorization scheme for an outbound request.
#[derive(Debug, Clone)]
pub enum Authorization {
    /// Bearer token.
    Bearer(AccessToken),
    /// HTTP basic authentication.
    Basic(Credentials),
}

impl Authorization {
    /// Picks the scheme from the available credentials. A token wins over a
    /// username/password pair.
    ///
    /// # Errors
    /// Returns `MissingCredentials` if neither form is available.
    pub fn resolve(
        token: Option<AccessToken>,
        credentials: Option<Credentials>,
    ) -> Result<Self, FetchError> {
        match (token, credentials) {
            (Some(token), _) => Ok(Self::Bearer(token)),
            (None, Some(credentials)) => Ok(Self::Basic(credentials)),
            (None, None) => Err(FetchError::MissingCredentials),
        }
    }

    /// Returns the scheme name.
    #[must_use]
    pub const fn scheme(&self) -> &'static str {
        match self {
            Self::Bearer(_) => "Bearer",
            Self::Basic(_) => "Basic",
        }
    }

    /// Returns the full `Authorization` header value.
    #[must_use]
    pub fn header_value(&self) -> Zeroizing<String> {
        match self {
            Self::Bearer(token) => Zeroizing::new(format!("Bearer {}", token.as_str())),
            Self::Basic(credentials) => {
                Zeroizing::new(format!("Basic {}", credentials.basic_encoded().as_str()))
            }
        }
    }
}

/// Request payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestData {
    /// Form fields, sent as `application/x-www-form-urlencoded`.
    Form(Vec<(String, String)>),
    /// Raw bytes, sent without a content type.
    Raw(Bytes),
}

/// Fully resolved request handed to the HTTP adapter.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    /// Request method.
    pub method: HttpMethod,
    /// Target URL.
    pub url: Url,
    /// Authorization header, if any.
    pub authorization: Option<Authorization>,
    /// Extra query parameters appended to the URL.
    pub query: Vec<(String, String)>,
    /// Optional payload.
    pub data: Option<RequestData>,
}

impl OutboundRequest {
    /// Creates a request without authorization or payload.
    #[must_use]
    pub const fn new(method: HttpMethod, url: Url) -> Self {
        Self {
            method,
            url,
            authorization: None,
            query: Vec::new(),
            data: None,
        }
    }

    /// Sets the authorization header.
    #[must_use]
    pub fn with_authorization(mut self, authorization: Authorization) -> Self {
        self.authorization = Some(authorization);
        self
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Sets the payload.
    #[must_use]
    pub fn with_data(mut self, data: Option<RequestData>) -> Self {
        self.data = data;
        self
    }
}

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    status: u16,
    body: Bytes,
}

impl HttpResponse {
    /// Creates new response.
    #[must_use]
    pub const fn new(status: u16, body: Bytes) -> Self {
        Self { status, body }
    }

    /// Returns the status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns the body.
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Consumes the response and returns the body.
    #[must_use]
    pub fn into_body(self) -> Bytes {
        self.body
    }

    /// Returns whether the status is exactly 200.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Parses an absolute URL.
///
/// # Errors
/// Returns `InvalidUrl` if the string is not an absolute URL.
pub fn parse_url(raw: &str) -> Result<Url, FetchError> {
    Url::parse(raw).map_err(|e| FetchError::invalid_url(raw, e.to_string()))
}
