//! Token endpoint response.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::AccessToken;
use crate::domain::errors::FetchError;

const SECRET_FIELDS: [&str; 3] = ["access_token", "refresh_token", "id_token"];

/// JSON object returned by the token endpoint, kept verbatim.
///
/// Only `access_token` is required by callers; every other OIDC field is
/// passed through untouched.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenResponse {
    fields: Map<String, Value>,
}

impl TokenResponse {
    /// Wraps an already parsed JSON object.
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Parses a raw response body.
    ///
    /// # Errors
    /// Returns `InvalidResponse` if the body is not a JSON object.
    pub fn from_slice(body: &[u8]) -> Result<Self, FetchError> {
        serde_json::from_slice::<Map<String, Value>>(body)
            .map(Self::new)
            .map_err(|e| FetchError::invalid_response(e.to_string()))
    }

    /// Returns all fields of the response.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consumes the response and returns the underlying JSON object.
    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.fields
    }

    /// Extracts the access token.
    ///
    /// # Errors
    /// Returns `MissingAccessToken` if the field is absent, empty or not a string.
    pub fn access_token(&self) -> Result<AccessToken, FetchError> {
        self.str_field("access_token")
            .and_then(AccessToken::new)
            .ok_or(FetchError::MissingAccessToken)
    }

    /// Returns the refresh token, if issued.
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.str_field("refresh_token")
    }

    /// Returns the token type, usually `Bearer`.
    #[must_use]
    pub fn token_type(&self) -> Option<&str> {
        self.str_field("token_type")
    }

    /// Returns the token lifetime in seconds.
    #[must_use]
    pub fn expires_in(&self) -> Option<u64> {
        self.fields.get("expires_in").and_then(Value::as_u64)
    }

    /// Returns a copy with token values masked, suitable for printing.
    #[must_use]
    pub fn masked(&self) -> Value {
        let mut fields = self.fields.clone();
        for key in SECRET_FIELDS {
            if let Some(Value::String(secret)) = fields.get_mut(key) {
                *secret = AccessToken::new(secret.as_str())
                    .map(|token| token.masked())
                    .unwrap_or_default();
            }
        }
        Value::Object(fields)
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenResponse")
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .finish()
    }
}
