//! Download use case implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::{DownloadRequest, DownloadResponse};
use crate::domain::entities::{
    ACCESS_TOKEN_PARAM, Authorization, HttpMethod, OutboundRequest, TokenPlacement, parse_url,
};
use crate::domain::errors::FetchError;
use crate::domain::ports::{HttpDispatchPort, OutputPort, TokenProviderPort};

/// Fetches a token, downloads a resource with it and saves the body.
#[derive(Clone)]
pub struct DownloadUseCase {
    token_port: Arc<dyn TokenProviderPort>,
    http_port: Arc<dyn HttpDispatchPort>,
    output_port: Arc<dyn OutputPort>,
    placement: TokenPlacement,
}

impl DownloadUseCase {
    /// Creates new download use case sending the token as a header.
    #[must_use]
    pub fn new(
        token_port: Arc<dyn TokenProviderPort>,
        http_port: Arc<dyn HttpDispatchPort>,
        output_port: Arc<dyn OutputPort>,
    ) -> Self {
        Self {
            token_port,
            http_port,
            output_port,
            placement: TokenPlacement::default(),
        }
    }

    /// Sets where the token travels on the download request.
    #[must_use]
    pub const fn with_token_placement(mut self, placement: TokenPlacement) -> Self {
        self.placement = placement;
        self
    }

    /// Executes the download.
    ///
    /// Only a 200 response is saved. The output file is named after the
    /// last path segment of the URL and overwritten if it exists.
    ///
    /// # Errors
    /// Returns `HttpStatus` with the status and body for any other status,
    /// `MissingAccessToken` if the token endpoint did not issue a token, and
    /// transport or I/O errors from the adapters.
    pub async fn execute(&self, request: DownloadRequest) -> Result<DownloadResponse, FetchError> {
        let url = parse_url(&request.url)?;

        debug!(username = %request.credentials.username(), "Requesting access token");

        let tokens = self.token_port.fetch_token(&request.credentials).await?;
        let token = tokens.access_token().map_err(|e| {
            warn!("Token endpoint response has no access token");
            e
        })?;

        debug!(url = %url, placement = %self.placement, "Downloading resource");

        let outbound = match self.placement {
            TokenPlacement::Header => OutboundRequest::new(HttpMethod::Get, url.clone())
                .with_authorization(Authorization::Bearer(token)),
            TokenPlacement::Query => OutboundRequest::new(HttpMethod::Get, url.clone())
                .with_query(ACCESS_TOKEN_PARAM, token.into_inner()),
        };

        let response = self.http_port.send(outbound).await?;

        if !response.is_ok() {
            warn!(status = response.status(), url = %url, "Download failed");
            return Err(FetchError::HttpStatus {
                status: response.status(),
                body: response.into_body(),
            });
        }

        let file_name = output_file_name(&request.url)?;
        let body = response.into_body();
        let path = self.output_port.write(&file_name, &body).await?;

        info!(
            path = %path.display(),
            bytes = body.len(),
            "Download saved"
        );

        Ok(DownloadResponse::new(path, body.len()))
    }
}

/// Returns the last `/`-delimited segment of `raw` as the caller wrote it.
///
/// Query and fragment are dropped; the segment is neither decoded nor
/// re-encoded, so the saved name matches the URL text byte-for-byte.
fn output_file_name(raw: &str) -> Result<String, FetchError> {
    let path = raw.split_once('#').map_or(raw, |(before, _)| before);
    let path = path.split_once('?').map_or(path, |(before, _)| before);

    path.rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(ToString::to_string)
        .ok_or_else(|| FetchError::InvalidFileName {
            url: raw.to_string(),
        })
}
