//! OIDC token endpoint client.

use async_trait::async_trait;
use reqwest::{Client, header};
use tracing::{debug, warn};

use crate::domain::entities::{Credentials, TokenResponse};
use crate::domain::errors::FetchError;
use crate::domain::ports::TokenProviderPort;
use crate::infrastructure::config::IdentityProviderConfig;
use crate::infrastructure::http::{HttpClientOptions, transport_error};

const PASSWORD_GRANT: &str = "password";

/// Password-grant client for a realm's token endpoint.
pub struct OidcTokenClient {
    client: Client,
    token_endpoint: String,
    client_id: String,
    scope: String,
}

impl OidcTokenClient {
    /// Creates client for the configured identity provider.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(
        provider: &IdentityProviderConfig,
        options: &HttpClientOptions,
    ) -> Result<Self, FetchError> {
        Self::with_endpoint(
            provider.token_endpoint_url(),
            &provider.client_id,
            &provider.scope,
            options,
        )
    }

    /// Creates client for an explicit token endpoint.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_endpoint(
        token_endpoint: impl Into<String>,
        client_id: impl Into<String>,
        scope: impl Into<String>,
        options: &HttpClientOptions,
    ) -> Result<Self, FetchError> {
        Ok(Self {
            client: options.build_client()?,
            token_endpoint: token_endpoint.into(),
            client_id: client_id.into(),
            scope: scope.into(),
        })
    }

    /// Returns the token endpoint URL.
    #[must_use]
    pub fn token_endpoint(&self) -> &str {
        &self.token_endpoint
    }
}

#[async_trait]
impl TokenProviderPort for OidcTokenClient {
    async fn fetch_token(&self, credentials: &Credentials) -> Result<TokenResponse, FetchError> {
        debug!(
            endpoint = %self.token_endpoint,
            client_id = %self.client_id,
            username = %credentials.username(),
            "Requesting token with password grant"
        );

        let fields = [
            ("grant_type", PASSWORD_GRANT),
            ("client_id", self.client_id.as_str()),
            ("scope", self.scope.as_str()),
            ("username", credentials.username()),
            ("password", credentials.password()),
        ];

        let response = self
            .client
            .post(&self.token_endpoint)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .form(&fields)
            .send()
            .await
            .map_err(|e| transport_error(&e, "token endpoint"))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Token endpoint returned an error status");
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(&e, "token endpoint"))?;

        let tokens = TokenResponse::from_slice(&body).map_err(|e| {
            warn!(%status, error = %e, "Failed to parse token response");
            e
        })?;

        debug!(
            token_type = tokens.token_type().unwrap_or("unknown"),
            expires_in = tokens.expires_in(),
            "Token response received"
        );

        Ok(tokens)
    }
}
