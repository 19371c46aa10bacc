//! Integration tests for the login and registration endpoints
//!
//! These tests use wiremock to stand in for the Miichu backend and check
//! the wire format of both requests and the handling of failures.

use api_client::{ApiClient, ApiClientConfig, AuthApi};
use app_core::{Credentials, Location, Registration, Sex};
use serde_json::json;
use std::path::Path;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(ApiClientConfig::new(server.uri())).unwrap()
}

fn registration(dir: &Path, organization: Option<&str>) -> Registration {
    let front = dir.join("front.jpg");
    let back = dir.join("back.jpg");
    std::fs::write(&front, b"FRONT-JPEG-BYTES").unwrap();
    std::fs::write(&back, b"BACK-JPEG-BYTES").unwrap();

    Registration {
        full_name: "Abebe Kebede".to_string(),
        phone_number: "0912345678".to_string(),
        sex: Sex::Female,
        password: "secret1".to_string(),
        workplace_id: None,
        organization: organization.map(str::to_string),
        location_start: Location::Hayat,
        location_end: Location::Bole,
        fiyda_id_image: front,
        fiyda_id_image_back: back,
    }
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_login_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/mobile/login"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "phoneNumber": "0912345678", "password": "secret1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "66f0c1",
            "fullName": "Abebe Kebede",
            "phoneNumber": "0912345678",
            "locationStart": "Hayat",
            "token": "jwt-token"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let user = client_for(&server)
        .login(&Credentials::new("0912345678", "secret1"))
        .await
        .unwrap();

    assert_eq!(user.id, "66f0c1");
    assert_eq!(user.full_name, "Abebe Kebede");
    assert_eq!(user.location_start, Some(Location::Hayat));
    assert_eq!(user.token.as_deref(), Some("jwt-token"));
}

#[tokio::test]
async fn test_login_tolerates_extra_id_and_blank_picks() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/mobile/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "66f0c1",
            "id": "66f0c1",
            "fullName": "Abebe Kebede",
            "phoneNumber": "0912345678",
            "sex": "",
            "locationStart": "",
            "locationEnd": "Bole"
        })))
        .mount(&server)
        .await;

    let user = client_for(&server)
        .login(&Credentials::new("0912345678", "secret1"))
        .await
        .unwrap();

    assert_eq!(user.id, "66f0c1");
    assert_eq!(user.sex, None);
    assert_eq!(user.location_start, None);
    assert_eq!(user.location_end, Some(Location::Bole));
}

#[tokio::test]
async fn test_login_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/mobile/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .login(&Credentials::new("0912345678", "wrongpass"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), 401);
    assert!(err.is_unauthorized());
    assert_eq!(err.message(), "Invalid credentials");
}

#[tokio::test]
async fn test_login_non_json_error_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/mobile/login"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .login(&Credentials::new("0912345678", "secret1"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), 500);
    assert_eq!(err.code(), "Unknown");
    assert!(err.message().contains("Internal Server Error"));
}

#[tokio::test]
async fn test_login_rejects_malformed_user() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/mobile/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .login(&Credentials::new("0912345678", "secret1"))
        .await
        .unwrap_err();

    assert_eq!(err.code(), "ParseError");
}

#[tokio::test]
async fn test_login_timeout_is_network_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/mobile/login"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let config = ApiClientConfig::new(server.uri()).with_timeout(Duration::from_millis(100));
    let err = ApiClient::new(config)
        .unwrap()
        .login(&Credentials::new("0912345678", "secret1"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), 0);
    assert!(err.is_network_error());
}

#[tokio::test]
async fn test_default_headers_are_sent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/mobile/login"))
        .and(header("x-app-platform", "android"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "1",
            "fullName": "Sara Tesfaye",
            "phoneNumber": "0911000000"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = ApiClientConfig::new(server.uri()).with_header("X-App-Platform", "android");
    let user = ApiClient::new(config)
        .unwrap()
        .login(&Credentials::new("0911000000", "secret1"))
        .await
        .unwrap();

    assert_eq!(user.id, "1");
}

// =============================================================================
// Registration
// =============================================================================

#[tokio::test]
async fn test_register_sends_multipart_form() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/mobile/register"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "message": "Client registered" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let receipt = client_for(&server)
        .register(&registration(dir.path(), Some("Ethio Telecom")))
        .await
        .unwrap();
    assert_eq!(receipt.message.as_deref(), Some("Client registered"));

    let requests = server.received_requests().await.unwrap();
    let request = &requests[0];

    let content_type = request.headers.get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("multipart/form-data; boundary="));

    let body = String::from_utf8_lossy(&request.body);
    for (field, value) in [
        ("fullName", "Abebe Kebede"),
        ("phoneNumber", "0912345678"),
        ("sex", "Female"),
        ("password", "secret1"),
        ("locationStart", "Hayat"),
        ("locationEnd", "Bole"),
        ("organization", "Ethio Telecom"),
    ] {
        assert!(body.contains(&format!("name=\"{}\"", field)), "missing part {}", field);
        assert!(body.contains(value), "missing value {}", value);
    }
    assert!(!body.contains("name=\"workplaceId\""));

    assert!(body.contains("name=\"fiydaIdImage\"; filename=\"fiydaIdImage.jpg\""));
    assert!(body.contains("name=\"fiydaIdImageback\"; filename=\"fiydaIdImageback.jpg\""));
    assert!(body.contains("Content-Type: image/jpeg"));
    assert!(body.contains("FRONT-JPEG-BYTES"));
    assert!(body.contains("BACK-JPEG-BYTES"));
}

#[tokio::test]
async fn test_register_failure_status() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/mobile/register"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(json!({ "error": "Conflict", "message": "Phone number taken" })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .register(&registration(dir.path(), None))
        .await
        .unwrap_err();

    assert_eq!(err.status(), 409);
    assert_eq!(err.code(), "Conflict");
    assert_eq!(err.message(), "Phone number taken");
}

#[tokio::test]
async fn test_register_missing_photo_sends_nothing() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/mobile/register"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let mut registration = registration(dir.path(), None);
    registration.fiyda_id_image_back = dir.path().join("gone.jpg");

    let err = client_for(&server).register(&registration).await.unwrap_err();
    assert_eq!(err.code(), "ImageRead");
}
