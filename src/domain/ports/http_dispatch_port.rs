//! HTTP dispatch port definition.

use async_trait::async_trait;

use crate::domain::entities::{HttpResponse, OutboundRequest};
use crate::domain::errors::FetchError;

/// Port for sending a single resolved HTTP request.
#[async_trait]
pub trait HttpDispatchPort: Send + Sync {
    /// Sends the request and returns the response, whatever its status.
    async fn send(&self, request: OutboundRequest) -> Result<HttpResponse, FetchError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use bytes::Bytes;
    use parking_lot::Mutex;

    /// Mock dispatcher recording every request it receives.
    pub struct MockHttpDispatch {
        response: HttpResponse,
        requests: Mutex<Vec<OutboundRequest>>,
    }

    impl MockHttpDispatch {
        /// Creates mock answering every request with the given status and body.
        pub fn new(status: u16, body: &'static [u8]) -> Self {
            Self {
                response: HttpResponse::new(status, Bytes::from_static(body)),
                requests: Mutex::new(Vec::new()),
            }
        }

        /// Returns the recorded requests.
        pub fn requests(&self) -> Vec<OutboundRequest> {
            self.requests.lock().clone()
        }
    }

    #[async_trait]
    impl HttpDispatchPort for MockHttpDispatch {
        async fn send(&self, request: OutboundRequest) -> Result<HttpResponse, FetchError> {
            self.requests.lock().push(request);
            Ok(self.response.clone())
        }
    }
}
