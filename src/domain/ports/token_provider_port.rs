//! Token provider port definition.

use async_trait::async_trait;

use crate::domain::entities::{Credentials, TokenResponse};
use crate::domain::errors::FetchError;

/// Port for exchanging credentials for an OIDC token.
#[async_trait]
pub trait TokenProviderPort: Send + Sync {
    /// Exchanges username and password for a token response.
    ///
    /// The response is returned as parsed, whatever the HTTP status was.
    async fn fetch_token(&self, credentials: &Credentials) -> Result<TokenResponse, FetchError>;
}
