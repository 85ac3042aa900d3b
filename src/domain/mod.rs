//! Domain layer with value objects, errors, and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{AccessToken, Credentials, HttpResponse, TokenResponse};
pub use errors::FetchError;
pub use ports::{HttpDispatchPort, OutputPort, TokenProviderPort};
