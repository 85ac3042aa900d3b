use super::app_config::LogLevel;
use crate::domain::entities::TokenPlacement;
use clap::{Args, Parser, Subcommand};
use std::convert::Infallible;
use std::path::PathBuf;
use zeroize::Zeroizing;

#[derive(Debug, Parser)]
#[command(
    name = "oidc-fetch",
    version,
    about = "Fetch OIDC tokens with the password grant and download protected resources",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Identity provider base URL.
    #[arg(long, value_name = "URL", global = true)]
    pub issuer: Option<String>,

    /// Identity provider realm.
    #[arg(long, global = true)]
    pub realm: Option<String>,

    /// OIDC client id.
    #[arg(long, global = true)]
    pub client_id: Option<String>,

    /// Full token endpoint URL, overriding issuer and realm.
    #[arg(long, value_name = "URL", global = true)]
    pub token_endpoint: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, value_name = "SECONDS", global = true)]
    pub timeout_secs: Option<u64>,

    /// Send the download token as a header or as a query parameter.
    #[arg(long, value_name = "header|query", global = true)]
    pub token_placement: Option<TokenPlacement>,

    #[command(subcommand)]
    pub command: Command,
}

/// Username and password for the identity provider or basic auth.
#[derive(Debug, Clone, Args)]
pub struct CredentialArgs {
    /// Username.
    #[arg(short, long, env = "OIDC_FETCH_USERNAME")]
    pub username: Option<String>,

    /// Password.
    #[arg(
        short,
        long,
        env = "OIDC_FETCH_PASSWORD",
        hide_env_values = true,
        value_parser = parse_secret
    )]
    pub password: Option<Zeroizing<String>>,
}

impl CredentialArgs {
    /// Returns the password as a string slice.
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password.as_ref().map(|password| password.as_str())
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Exchange username and password for a token and print the response.
    Token {
        #[command(flatten)]
        credentials: CredentialArgs,

        /// Print tokens unmasked.
        #[arg(long)]
        raw: bool,
    },

    /// Send one authorized GET or POST request.
    Request {
        /// Target URL.
        url: String,

        /// HTTP method (get or post).
        #[arg(short = 'X', long, default_value = "get")]
        method: String,

        /// Bearer token; takes precedence over username and password.
        #[arg(short, long, env = "OIDC_FETCH_TOKEN", hide_env_values = true)]
        token: Option<String>,

        #[command(flatten)]
        credentials: CredentialArgs,

        /// Form field sent url-encoded, may be repeated.
        #[arg(short, long = "data", value_name = "KEY=VALUE", value_parser = parse_key_val)]
        data: Vec<(String, String)>,

        /// File sent as the raw request body.
        #[arg(long, value_name = "PATH", conflicts_with = "data")]
        body_file: Option<PathBuf>,

        /// Write the response body here instead of stdout.
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Fetch a token and save a resource under its URL file name.
    Download {
        /// Resource URL.
        url: String,

        #[command(flatten)]
        credentials: CredentialArgs,

        /// Directory to write into.
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
}

#[allow(clippy::unnecessary_wraps)]
fn parse_secret(raw: &str) -> Result<Zeroizing<String>, Infallible> {
    Ok(Zeroizing::new(raw.to_string()))
}

fn parse_key_val(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got {raw:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("a=b=c").unwrap(),
            ("a".to_string(), "b=c".to_string())
        );
        assert!(parse_key_val("novalue").is_err());
    }

    #[test]
    fn test_request_command() {
        let args = CliArgs::parse_from([
            "oidc-fetch",
            "request",
            "https://example.com/items",
            "-X",
            "POST",
            "--token",
            "tok",
            "-d",
            "name=value",
        ]);

        match args.command {
            Command::Request {
                url,
                method,
                token,
                data,
                ..
            } => {
                assert_eq!(url, "https://example.com/items");
                assert_eq!(method, "POST");
                assert_eq!(token.as_deref(), Some("tok"));
                assert_eq!(data, vec![("name".to_string(), "value".to_string())]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = CliArgs::parse_from([
            "oidc-fetch",
            "download",
            "https://example.com/data/file.tif",
            "-u",
            "alice",
            "-p",
            "secret",
            "--log-level",
            "debug",
        ]);

        assert_eq!(args.log_level, Some(LogLevel::Debug));
        assert!(matches!(args.command, Command::Download { .. }));
    }

    #[test]
    fn test_password_is_parsed_as_secret() {
        let args = CliArgs::parse_from([
            "oidc-fetch",
            "token",
            "--username",
            "alice",
            "--password",
            "s3cret",
        ]);

        match args.command {
            Command::Token { credentials, .. } => {
                let password: &Option<Zeroizing<String>> = &credentials.password;
                assert_eq!(password.as_deref().map(String::as_str), Some("s3cret"));
                assert_eq!(credentials.password(), Some("s3cret"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_body_file_conflicts_with_data() {
        let result = CliArgs::try_parse_from([
            "oidc-fetch",
            "request",
            "https://example.com",
            "-d",
            "a=b",
            "--body-file",
            "payload.bin",
        ]);

        assert!(result.is_err());
    }
}
