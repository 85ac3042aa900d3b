//! Authorized request use case.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::DispatchRequest;
use crate::domain::entities::{
    AccessToken, Authorization, HttpMethod, HttpResponse, OutboundRequest, parse_url,
};
use crate::domain::errors::FetchError;
use crate::domain::ports::HttpDispatchPort;

/// Sends one GET or POST with a bearer or basic `Authorization` header.
#[derive(Clone)]
pub struct SendRequestUseCase {
    http_port: Arc<dyn HttpDispatchPort>,
}

impl SendRequestUseCase {
    /// Creates new use case.
    #[must_use]
    pub const fn new(http_port: Arc<dyn HttpDispatchPort>) -> Self {
        Self { http_port }
    }

    /// Executes the request.
    ///
    /// Credentials and method are validated before anything is sent. The
    /// response is returned whatever its status.
    ///
    /// # Errors
    /// Returns `MissingCredentials` when neither a token nor a full
    /// username/password pair is given, `UnsupportedMethod` for methods other
    /// than GET and POST, and transport errors from the adapter.
    pub async fn execute(&self, request: DispatchRequest) -> Result<HttpResponse, FetchError> {
        let token = request.token.as_deref().and_then(AccessToken::new);
        let authorization = Authorization::resolve(token, request.credentials()).map_err(|e| {
            warn!("No credentials provided for request");
            e
        })?;

        let method: HttpMethod = request.method.parse().map_err(|e| {
            warn!(method = %request.method, "Unsupported HTTP method");
            e
        })?;

        let url = parse_url(&request.url)?;

        debug!(
            %method,
            url = %url,
            scheme = authorization.scheme(),
            "Dispatching request"
        );

        let outbound = OutboundRequest::new(method, url)
            .with_authorization(authorization)
            .with_data(request.data);

        let response = self.http_port.send(outbound).await?;

        info!(
            %method,
            status = response.status(),
            bytes = response.body().len(),
            "Request completed"
        );

        Ok(response)
    }
}
