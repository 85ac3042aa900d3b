//! Application configuration.

pub mod app_config;
pub mod args;
pub mod storage;

pub use app_config::{AppConfig, HttpConfig, IdentityProviderConfig, LogLevel};
pub use args::{CliArgs, Command, CredentialArgs};
pub use storage::{ConfigError, ConfigStore};
