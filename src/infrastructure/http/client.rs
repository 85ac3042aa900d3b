//! Request dispatcher backed by reqwest.

use async_trait::async_trait;
use reqwest::header::{self, HeaderValue};
use reqwest::Client;
use tracing::debug;

use super::{HttpClientOptions, transport_error};
use crate::domain::entities::{HttpMethod, HttpResponse, OutboundRequest, RequestData};
use crate::domain::errors::FetchError;
use crate::domain::ports::HttpDispatchPort;

/// Sends resolved requests with reqwest.
pub struct ReqwestDispatcher {
    client: Client,
}

impl ReqwestDispatcher {
    /// Creates dispatcher with default options.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_options(&HttpClientOptions::default())
    }

    /// Creates dispatcher with custom options.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_options(options: &HttpClientOptions) -> Result<Self, FetchError> {
        Ok(Self {
            client: options.build_client()?,
        })
    }
}

#[async_trait]
impl HttpDispatchPort for ReqwestDispatcher {
    async fn send(&self, request: OutboundRequest) -> Result<HttpResponse, FetchError> {
        let target = request.url.host_str().unwrap_or("server").to_string();

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(request.url),
            HttpMethod::Post => self.client.post(request.url),
        };

        if let Some(authorization) = &request.authorization {
            let mut value = HeaderValue::from_str(&authorization.header_value()).map_err(|_| {
                FetchError::unexpected("authorization value contains invalid header characters")
            })?;
            value.set_sensitive(true);
            builder = builder.header(header::AUTHORIZATION, value);
        }

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        builder = match request.data {
            Some(RequestData::Form(fields)) => builder.form(&fields),
            Some(RequestData::Raw(bytes)) => builder.body(bytes),
            None => builder,
        };

        let response = builder
            .send()
            .await
            .map_err(|e| transport_error(&e, &target))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(&e, &target))?;

        debug!(status, bytes = body.len(), "Response received");

        Ok(HttpResponse::new(status, body))
    }
}
