use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use oidc_fetch::application::{
    DispatchRequest, DownloadRequest, DownloadUseCase, SendRequestUseCase,
};
use oidc_fetch::domain::entities::{Credentials, RequestData};
use oidc_fetch::domain::{FetchError, TokenProviderPort};
use oidc_fetch::infrastructure::config::{Command, CredentialArgs};
use oidc_fetch::infrastructure::{
    AppConfig, CliArgs, ConfigStore, FileOutputWriter, OidcTokenClient, ReqwestDispatcher,
};

const BODY_EXCERPT_LEN: usize = 512;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let store = ConfigStore::resolve(args.config.as_deref())?;

    let mut config = store.load()?;
    config.config = Some(store.path().to_path_buf());
    config.merge_with_args(args);
    Ok(config)
}

fn require_credentials(args: &CredentialArgs) -> Result<Credentials, FetchError> {
    Credentials::from_parts(args.username.as_deref(), args.password())
        .ok_or(FetchError::MissingCredentials)
}

fn body_excerpt(body: &Bytes) -> String {
    let end = body.len().min(BODY_EXCERPT_LEN);
    String::from_utf8_lossy(&body[..end]).into_owned()
}

async fn run_token(config: &AppConfig, credentials: &CredentialArgs, raw: bool) -> Result<()> {
    let credentials = require_credentials(credentials)?;
    let client = OidcTokenClient::new(&config.identity_provider, &config.http.client_options())?;

    let tokens = client.fetch_token(&credentials).await?;
    let printable = if raw {
        serde_json::to_value(&tokens)?
    } else {
        tokens.masked()
    };

    println!("{}", serde_json::to_string_pretty(&printable)?);
    Ok(())
}

async fn run_request(
    config: &AppConfig,
    request: DispatchRequest,
    output: Option<PathBuf>,
) -> Result<()> {
    let dispatcher = Arc::new(ReqwestDispatcher::with_options(
        &config.http.client_options(),
    )?);
    let use_case = SendRequestUseCase::new(dispatcher);

    let response = use_case.execute(request).await?;
    eprintln!("HTTP {}", response.status());

    match output {
        Some(path) => tokio::fs::write(&path, response.body())
            .await
            .wrap_err_with(|| format!("failed to write {}", path.display()))?,
        None => std::io::stdout().write_all(response.body())?,
    }

    Ok(())
}

async fn run_download(
    config: &AppConfig,
    url: String,
    credentials: &CredentialArgs,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let credentials = require_credentials(credentials)?;
    let options = config.http.client_options();

    let token_client = Arc::new(OidcTokenClient::new(&config.identity_provider, &options)?);
    let dispatcher = Arc::new(ReqwestDispatcher::with_options(&options)?);
    let writer = Arc::new(
        output_dir
            .or_else(|| config.http.output_dir.clone())
            .map_or_else(FileOutputWriter::new, FileOutputWriter::with_dir),
    );

    let use_case = DownloadUseCase::new(token_client, dispatcher, writer)
        .with_token_placement(config.http.token_placement);

    match use_case.execute(DownloadRequest::new(url, credentials)).await {
        Ok(response) => {
            println!("{}", response.path.display());
            Ok(())
        }
        Err(FetchError::HttpStatus { status, body }) => Err(eyre!(
            "download failed with HTTP {status}: {}",
            body_excerpt(&body)
        )),
        Err(e) => Err(e.into()),
    }
}

async fn build_request_data(
    data: Vec<(String, String)>,
    body_file: Option<PathBuf>,
) -> Result<Option<RequestData>> {
    if let Some(path) = body_file {
        let bytes = tokio::fs::read(&path)
            .await
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        return Ok(Some(RequestData::Raw(Bytes::from(bytes))));
    }

    Ok((!data.is_empty()).then_some(RequestData::Form(data)))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    let config = load_config(&args)?;

    init_logging(&config)?;

    info!(
        name = oidc_fetch::NAME,
        version = oidc_fetch::VERSION,
        config = ?config.effective_config_path(),
        "Starting"
    );

    match args.command {
        Command::Token { credentials, raw } => run_token(&config, &credentials, raw).await,
        Command::Request {
            url,
            method,
            token,
            credentials,
            data,
            body_file,
            output,
        } => {
            let mut request = DispatchRequest::new(url, method);
            request.token = token;
            request.username = credentials.username;
            request.password = credentials.password;
            request.data = build_request_data(data, body_file).await?;

            run_request(&config, request, output).await
        }
        Command::Download {
            url,
            credentials,
            output_dir,
        } => run_download(&config, url, &credentials, output_dir).await,
    }
}
