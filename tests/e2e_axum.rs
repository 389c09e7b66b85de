//! End-to-end tests for the Axum HTTP API layer.
//!
//! These tests use the mock backend - no upstream server required.
//! Run with: `cargo test --test e2e_axum`

#![cfg(all(feature = "axum_api", feature = "mocks"))]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use axum::Router;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Request, Response, StatusCode};
use axum::routing::get;
use enclave_gateway::api::axum::{AppState, gateway_router};
use enclave_gateway::{
    BackendCall, FailureHint, GatewayConfig, LoginOutcome, LogoutOutcome, MockBackendClient,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

fn create_app(backend: MockBackendClient) -> Router {
    let pages = Router::new()
        .route("/admin", get(|| async { "dashboard" }))
        .route("/admin/login", get(|| async { "login form" }))
        .route("/admin/blogs", get(|| async { "blogs" }))
        .route("/", get(|| async { "home" }));

    gateway_router(AppState::new(backend, GatewayConfig::default()), pages)
}

async fn body_to_json(body: Body) -> serde_json::Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_owned())
        .collect()
}

fn json_login(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_login_success_forwards_backend_cookies() {
    let backend = MockBackendClient::new().with_login(LoginOutcome::Success {
        set_cookies: vec![
            "session=abc123; HttpOnly; Path=/".to_owned(),
            "remember_token=r1; Path=/".to_owned(),
        ],
    });
    let app = create_app(backend.clone());

    let response = app
        .oneshot(json_login(serde_json::json!({
            "username": "admin",
            "password": "correct-horse"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        set_cookies(&response),
        vec![
            "session=abc123; HttpOnly; Path=/".to_owned(),
            "remember_token=r1; Path=/".to_owned(),
        ]
    );

    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["username"], "admin");
    assert_eq!(
        backend.calls(),
        vec![BackendCall::Login {
            username: "admin".to_owned()
        }]
    );
}

#[tokio::test]
async fn test_login_accepts_form_body() {
    let backend = MockBackendClient::new();
    let app = create_app(backend.clone());

    let request = Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("username=admin&password=pw"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(backend.call_count(), 1);
}

const MULTIPART_BOUNDARY: &str = "gateway-boundary";

fn multipart_body(fields: &[(&str, &str)]) -> String {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{MULTIPART_BOUNDARY}--\r\n"));
    body
}

fn multipart_login(fields: &[(&str, &str)]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .body(Body::from(multipart_body(fields)))
        .unwrap()
}

#[tokio::test]
async fn test_login_accepts_multipart_body() {
    let backend = MockBackendClient::new();
    let app = create_app(backend.clone());

    let response = app
        .oneshot(multipart_login(&[("username", "admin"), ("password", "pw")]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        backend.calls(),
        vec![BackendCall::Login {
            username: "admin".to_owned()
        }]
    );
}

#[tokio::test]
async fn test_multipart_login_without_password_is_bad_request() {
    let backend = MockBackendClient::new();
    let app = create_app(backend.clone());

    let response = app
        .oneshot(multipart_login(&[("username", "admin")]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_login_missing_fields_never_reaches_backend() {
    for body in [
        serde_json::json!({}),
        serde_json::json!({ "username": "admin" }),
        serde_json::json!({ "password": "pw" }),
        serde_json::json!({ "username": "   ", "password": "pw" }),
        serde_json::json!({ "username": "admin", "password": "" }),
    ] {
        let backend = MockBackendClient::new();
        let app = create_app(backend.clone());

        let response = app.oneshot(json_login(body.clone())).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");

        let json = body_to_json(response.into_body()).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Username and password are required");
        assert_eq!(backend.call_count(), 0, "{body}");
    }
}

#[tokio::test]
async fn test_login_unreadable_body_is_bad_request() {
    let backend = MockBackendClient::new();
    let app = create_app(backend.clone());

    let request = Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_login_rejections_share_one_message() {
    for outcome in [
        LoginOutcome::CredentialFailure,
        LoginOutcome::AmbiguousFailure(FailureHint::NoFailureMarker),
        LoginOutcome::AmbiguousFailure(FailureHint::RedirectWithoutCookie),
        LoginOutcome::AmbiguousFailure(FailureHint::UnexpectedStatus(404)),
    ] {
        let app = create_app(MockBackendClient::new().with_login(outcome.clone()));

        let response = app
            .oneshot(json_login(serde_json::json!({
                "username": "admin",
                "password": "wrong"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{outcome:?}");
        assert!(set_cookies(&response).is_empty());
        let json = body_to_json(response.into_body()).await;
        assert_eq!(json["message"], "Invalid username or password");
    }
}

#[tokio::test]
async fn test_login_transport_failure_is_server_error() {
    let app = create_app(MockBackendClient::new().with_login(LoginOutcome::TransportFailure(
        "connection refused".to_owned(),
    )));

    let response = app
        .oneshot(json_login(serde_json::json!({
            "username": "admin",
            "password": "pw"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["message"], "Login failed");
    assert!(!json.to_string().contains("connection refused"));
}

#[tokio::test]
async fn test_logout_forwards_cookies_and_clears_session() {
    let backend = MockBackendClient::new();
    let app = create_app(backend.clone());

    let request = Request::builder()
        .method("POST")
        .uri("/auth/logout")
        .header(COOKIE, "session=abc123")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cleared = set_cookies(&response);
    assert_eq!(cleared.len(), 1);
    assert!(cleared[0].starts_with("session=;"));
    assert!(cleared[0].contains("Max-Age=0"));

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Logout successful");
    assert_eq!(
        backend.calls(),
        vec![BackendCall::Logout {
            cookies: "session=abc123".to_owned()
        }]
    );
}

#[tokio::test]
async fn test_logout_clears_cookie_when_backend_fails() {
    let backend =
        MockBackendClient::new().with_logout(LogoutOutcome::Failed("timeout".to_owned()));
    let app = create_app(backend);

    let request = Request::builder()
        .method("GET")
        .uri("/auth/logout")
        .header(COOKIE, "session=abc123")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookies(&response)[0].contains("Max-Age=0"));

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Logged out locally");
}

#[tokio::test]
async fn test_logout_without_cookie_skips_backend() {
    let backend = MockBackendClient::new();
    let app = create_app(backend.clone());

    let request = Request::builder()
        .method("POST")
        .uri("/auth/logout")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookies(&response)[0].contains("Max-Age=0"));
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_status_reports_backend_answer() {
    for authenticated in [true, false] {
        let backend = MockBackendClient::new().with_status(authenticated);
        let app = create_app(backend.clone());

        let request = Request::builder()
            .uri("/auth/status")
            .header(COOKIE, "session=abc123")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_to_json(response.into_body()).await;
        assert_eq!(json, serde_json::json!({ "authenticated": authenticated }));
        assert_eq!(
            backend.calls(),
            vec![BackendCall::CheckStatus {
                cookies: "session=abc123".to_owned()
            }]
        );
    }
}

#[tokio::test]
async fn test_status_without_cookie_is_unauthenticated() {
    let backend = MockBackendClient::new().with_status(true);
    let app = create_app(backend.clone());

    let request = Request::builder()
        .uri("/auth/status")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["authenticated"], false);
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_gate_redirects_protected_page_without_cookie() {
    let app = create_app(MockBackendClient::new());

    let request = Request::builder()
        .uri("/admin/blogs")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()[LOCATION], "/admin/login");
}

#[tokio::test]
async fn test_gate_allows_any_session_cookie_without_backend_call() {
    let backend = MockBackendClient::new().with_status(false);
    let app = create_app(backend.clone());

    let request = Request::builder()
        .uri("/admin")
        .header(COOKIE, "session=expired-on-the-backend")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_gate_leaves_login_page_and_public_pages_alone() {
    for uri in ["/admin/login", "/"] {
        let app = create_app(MockBackendClient::new());
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }
}

#[tokio::test]
async fn test_verified_gate_consults_backend() {
    use axum::middleware::from_fn_with_state;
    use enclave_gateway::api::axum::verified_gate;

    let backend = MockBackendClient::new().with_status(false);
    let state = AppState::new(backend.clone(), GatewayConfig::default());
    let app = Router::new()
        .route("/admin", get(|| async { "dashboard" }))
        .layer(from_fn_with_state(state, verified_gate::<MockBackendClient>));

    let request = Request::builder()
        .uri("/admin")
        .header(COOKIE, "session=revoked")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(backend.call_count(), 1);
}
