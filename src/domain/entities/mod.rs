//! Domain entity definitions.

mod credentials;
mod http;
mod token;
mod token_response;

pub use credentials::Credentials;
pub use http::{
    ACCESS_TOKEN_PARAM, Authorization, HttpMethod, HttpResponse, OutboundRequest, RequestData,
    TokenPlacement, parse_url,
};
pub use token::AccessToken;
pub use token_response::TokenResponse;
