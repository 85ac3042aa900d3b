//! oidc-fetch - password-grant OIDC tokens and authorized downloads.
//!
//! This crate exchanges a username and password for an access token at a
//! Keycloak realm, sends single GET/POST requests with bearer or basic
//! authorization, and saves downloaded resources under their URL file name.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases and DTOs.
pub mod application;
/// Domain layer containing value objects, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "oidc-fetch";
