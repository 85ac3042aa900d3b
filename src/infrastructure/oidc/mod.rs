//! OIDC identity provider adapter.

mod client;

pub use client::OidcTokenClient;
