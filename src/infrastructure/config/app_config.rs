//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::entities::TokenPlacement;
use crate::infrastructure::http::{DEFAULT_USER_AGENT, HttpClientOptions};

pub(crate) const APP_NAME: &str = "oidc-fetch";
pub(crate) const APP_QUALIFIER: &str = "eu";
pub(crate) const APP_ORGANIZATION: &str = "eodc";

const DEFAULT_ISSUER: &str = "https://keycloak.dev.services.eodc.eu";
const DEFAULT_REALM: &str = "eodc-dev";
const DEFAULT_CLIENT_ID: &str = "sdk-login";
const DEFAULT_SCOPE: &str = "offline_access";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path. Logs go to stderr when unset.
    #[serde(default)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Identity provider settings.
    #[serde(default)]
    pub identity_provider: IdentityProviderConfig,

    /// HTTP settings.
    #[serde(default)]
    pub http: HttpConfig,
}

/// Identity provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityProviderConfig {
    /// Base URL of the Keycloak server.
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Realm name.
    #[serde(default = "default_realm")]
    pub realm: String,

    /// Public client used for the password grant.
    #[serde(default = "default_client_id")]
    pub client_id: String,

    /// Requested scope.
    #[serde(default = "default_scope")]
    pub scope: String,

    /// Full token endpoint URL, overriding `issuer` and `realm`.
    #[serde(default)]
    pub token_endpoint: Option<String>,
}

impl IdentityProviderConfig {
    /// Returns the token endpoint URL.
    #[must_use]
    pub fn token_endpoint_url(&self) -> String {
        self.token_endpoint.clone().unwrap_or_else(|| {
            format!(
                "{}/auth/realms/{}/protocol/openid-connect/token",
                self.issuer.trim_end_matches('/'),
                self.realm
            )
        })
    }
}

impl Default for IdentityProviderConfig {
    fn default() -> Self {
        Self {
            issuer: default_issuer(),
            realm: default_realm(),
            client_id: default_client_id(),
            scope: default_scope(),
            token_endpoint: None,
        }
    }
}

/// HTTP configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Total request timeout in seconds. No timeout when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// `User-Agent` header value.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Where the token travels on downloads.
    #[serde(default)]
    pub token_placement: TokenPlacement,

    /// Directory downloads are written to. Working directory when unset.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl HttpConfig {
    /// Returns client options for the HTTP adapters.
    #[must_use]
    pub fn client_options(&self) -> HttpClientOptions {
        HttpClientOptions {
            user_agent: self.user_agent.clone(),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            user_agent: default_user_agent(),
            token_placement: TokenPlacement::default(),
            output_dir: None,
        }
    }
}

fn default_issuer() -> String {
    DEFAULT_ISSUER.to_string()
}

fn default_realm() -> String {
    DEFAULT_REALM.to_string()
}

fn default_client_id() -> String {
    DEFAULT_CLIENT_ID.to_string()
}

fn default_scope() -> String {
    DEFAULT_SCOPE.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(issuer) = &args.issuer {
            self.identity_provider.issuer.clone_from(issuer);
        }
        if let Some(realm) = &args.realm {
            self.identity_provider.realm.clone_from(realm);
        }
        if let Some(client_id) = &args.client_id {
            self.identity_provider.client_id.clone_from(client_id);
        }
        if let Some(token_endpoint) = &args.token_endpoint {
            self.identity_provider.token_endpoint = Some(token_endpoint.clone());
        }
        if let Some(timeout_secs) = args.timeout_secs {
            self.http.timeout_secs = Some(timeout_secs);
        }
        if let Some(token_placement) = args.token_placement {
            self.http.token_placement = token_placement;
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        Self::default_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns effective config path.
    #[must_use]
    pub fn effective_config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(Self::default_config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
            log_level = "debug"

            [identity_provider]
            realm = "eodc"
            client_id = "openeo"

            [http]
            timeout_secs = 60
            token_placement = "query"
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.identity_provider.realm, "eodc");
        assert_eq!(config.identity_provider.client_id, "openeo");
        assert_eq!(config.identity_provider.scope, "offline_access");
        assert_eq!(config.http.timeout_secs, Some(60));
        assert_eq!(config.http.token_placement, TokenPlacement::Query);
        assert_eq!(
            config.identity_provider.token_endpoint_url(),
            "https://keycloak.dev.services.eodc.eu/auth/realms/eodc/protocol/openid-connect/token"
        );
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.http.timeout_secs, None);
        assert_eq!(config.http.token_placement, TokenPlacement::Header);
        assert!(config.http.client_options().timeout.is_none());
        assert_eq!(
            config.identity_provider.token_endpoint_url(),
            "https://keycloak.dev.services.eodc.eu/auth/realms/eodc-dev/protocol/openid-connect/token"
        );
    }

    #[test]
    fn test_explicit_token_endpoint_wins() {
        let provider = IdentityProviderConfig {
            token_endpoint: Some("https://idp.example.com/token".to_string()),
            ..IdentityProviderConfig::default()
        };

        assert_eq!(provider.token_endpoint_url(), "https://idp.example.com/token");
    }

    #[test]
    fn test_issuer_trailing_slash_is_trimmed() {
        let provider = IdentityProviderConfig {
            issuer: "https://idp.example.com/".to_string(),
            realm: "main".to_string(),
            ..IdentityProviderConfig::default()
        };

        assert_eq!(
            provider.token_endpoint_url(),
            "https://idp.example.com/auth/realms/main/protocol/openid-connect/token"
        );
    }

    #[test]
    fn test_merge_with_args() {
        let args = CliArgs::parse_from([
            "oidc-fetch",
            "--realm",
            "prod",
            "--timeout-secs",
            "10",
            "--token-placement",
            "query",
            "token",
            "--username",
            "alice",
            "--password",
            "secret",
        ]);
        let mut config = AppConfig::default();

        config.merge_with_args(&args);

        assert_eq!(config.identity_provider.realm, "prod");
        assert_eq!(config.http.timeout_secs, Some(10));
        assert_eq!(config.http.token_placement, TokenPlacement::Query);
        assert_eq!(config.identity_provider.client_id, "sdk-login");
    }
}
