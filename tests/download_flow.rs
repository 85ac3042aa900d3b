use std::sync::Arc;

use httpmock::prelude::*;
use tempfile::tempdir;

use oidc_fetch::application::{DispatchRequest, DownloadRequest, DownloadUseCase, SendRequestUseCase};
use oidc_fetch::domain::FetchError;
use oidc_fetch::domain::entities::{Credentials, TokenPlacement};
use oidc_fetch::infrastructure::{
    FileOutputWriter, HttpClientOptions, OidcTokenClient, ReqwestDispatcher,
};

const TOKEN_PATH: &str = "/auth/realms/eodc-dev/protocol/openid-connect/token";

fn mock_token_endpoint(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(POST)
            .path(TOKEN_PATH)
            .body_includes("grant_type=password")
            .body_includes("username=alice");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"access_token":"tok-123","token_type":"Bearer","expires_in":300}"#);
    })
}

fn download_use_case(server: &MockServer, dir: &std::path::Path) -> DownloadUseCase {
    let options = HttpClientOptions::default();
    let token_client = OidcTokenClient::with_endpoint(
        server.url(TOKEN_PATH),
        "sdk-login",
        "offline_access",
        &options,
    )
    .unwrap();
    let dispatcher = ReqwestDispatcher::with_options(&options).unwrap();

    DownloadUseCase::new(
        Arc::new(token_client),
        Arc::new(dispatcher),
        Arc::new(FileOutputWriter::with_dir(dir)),
    )
}

fn credentials() -> Credentials {
    Credentials::new("alice", "secret")
}

#[tokio::test]
async fn download_saves_body_under_url_file_name() {
    let server = MockServer::start();
    let dir = tempdir().unwrap();
    let token_mock = mock_token_endpoint(&server);
    let data_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/data/file.tif")
            .header("authorization", "Bearer tok-123");
        then.status(200).body("hello");
    });

    let response = download_use_case(&server, dir.path())
        .execute(DownloadRequest::new(server.url("/data/file.tif"), credentials()))
        .await
        .unwrap();

    assert_eq!(response.path, dir.path().join("file.tif"));
    assert_eq!(response.path.file_name().unwrap(), "file.tif");
    assert_eq!(std::fs::read(&response.path).unwrap(), b"hello");
    token_mock.assert();
    data_mock.assert();
}

#[tokio::test]
async fn download_not_found_returns_status_without_file() {
    let server = MockServer::start();
    let dir = tempdir().unwrap();
    let _token_mock = mock_token_endpoint(&server);
    let data_mock = server.mock(|when, then| {
        when.method(GET).path("/data/file.tif");
        then.status(404).body("no such file");
    });

    let result = download_use_case(&server, dir.path())
        .execute(DownloadRequest::new(server.url("/data/file.tif"), credentials()))
        .await;

    match result {
        Err(FetchError::HttpStatus { status, body }) => {
            assert_eq!(status, 404);
            assert_eq!(body.as_ref(), b"no such file");
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
    assert!(!dir.path().join("file.tif").exists());
    data_mock.assert();
}

#[tokio::test]
async fn repeated_download_overwrites_file() {
    let server = MockServer::start();
    let dir = tempdir().unwrap();
    let token_mock = mock_token_endpoint(&server);
    let data_mock = server.mock(|when, then| {
        when.method(GET).path("/data/file.tif");
        then.status(200).body("hello");
    });
    let use_case = download_use_case(&server, dir.path());

    for _ in 0..2 {
        let response = use_case
            .execute(DownloadRequest::new(server.url("/data/file.tif"), credentials()))
            .await
            .unwrap();
        assert_eq!(std::fs::read(&response.path).unwrap(), b"hello");
    }

    token_mock.assert_calls(2);
    data_mock.assert_calls(2);
}

#[tokio::test]
async fn download_with_query_token() {
    let server = MockServer::start();
    let dir = tempdir().unwrap();
    let _token_mock = mock_token_endpoint(&server);
    let data_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/data/scene.nc")
            .query_param("access_token", "tok-123");
        then.status(200).body("netcdf");
    });

    let response = download_use_case(&server, dir.path())
        .with_token_placement(TokenPlacement::Query)
        .execute(DownloadRequest::new(server.url("/data/scene.nc"), credentials()))
        .await
        .unwrap();

    assert_eq!(std::fs::read(response.path).unwrap(), b"netcdf");
    data_mock.assert();
}

#[tokio::test]
async fn rejected_credentials_stop_before_download() {
    let server = MockServer::start();
    let dir = tempdir().unwrap();
    let token_mock = server.mock(|when, then| {
        when.method(POST).path(TOKEN_PATH);
        then.status(401)
            .header("content-type", "application/json")
            .body(r#"{"error":"invalid_grant"}"#);
    });
    let data_mock = server.mock(|when, then| {
        when.method(GET).path("/data/file.tif");
        then.status(200).body("hello");
    });

    let result = download_use_case(&server, dir.path())
        .execute(DownloadRequest::new(server.url("/data/file.tif"), credentials()))
        .await;

    assert!(matches!(result, Err(FetchError::MissingAccessToken)));
    token_mock.assert();
    data_mock.assert_calls(0);
}

#[tokio::test]
async fn send_request_uses_basic_auth_fallback() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/jobs")
            .header("authorization", "Basic YWxpY2U6c2VjcmV0");
        then.status(202).body("accepted");
    });
    let use_case = SendRequestUseCase::new(Arc::new(ReqwestDispatcher::new().unwrap()));

    let response = use_case
        .execute(DispatchRequest::new(server.url("/jobs"), "POST").with_basic("alice", "secret"))
        .await
        .unwrap();

    assert_eq!(response.status(), 202);
    assert_eq!(response.body().as_ref(), b"accepted");
    mock.assert();
}
