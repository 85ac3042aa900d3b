//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// HTTP request dispatch.
pub mod http;
/// OIDC token endpoint client.
pub mod oidc;
/// Download output.
pub mod output;

pub use config::{AppConfig, CliArgs, ConfigStore, LogLevel};
pub use http::{HttpClientOptions, ReqwestDispatcher};
pub use oidc::OidcTokenClient;
pub use output::FileOutputWriter;
