//! Loopback stand-in for a session-cookie backend.
//!
//! Behaves like a server-rendered login app: a good login redirects with a
//! `Set-Cookie`, a bad one redisplays the form with a flashed error list.

#![allow(dead_code, clippy::unwrap_used)]

use std::net::SocketAddr;

use axum::Form;
use axum::Router;
use axum::http::header::{COOKIE, LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use serde::Deserialize;

pub const VALID_SESSION: &str = "session=backend-session-1";

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

async fn login(Form(form): Form<LoginForm>) -> Response {
    match (form.username.as_str(), form.password.as_str()) {
        ("admin", "secret") => (
            StatusCode::FOUND,
            [
                (LOCATION, "/".to_owned()),
                (SET_COOKIE, format!("{VALID_SESSION}; HttpOnly; Path=/")),
            ],
        )
            .into_response(),
        ("nocookie", _) => (StatusCode::FOUND, [(LOCATION, "/")]).into_response(),
        ("plain", _) => Html("<form>Please sign in</form>").into_response(),
        ("boom", _) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        _ => Html("<form><ul><li>Invalid username or password</li></ul></form>").into_response(),
    }
}

fn has_valid_session(headers: &HeaderMap) -> bool {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.contains(VALID_SESSION))
}

async fn logout(headers: HeaderMap) -> Response {
    if headers
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("session=broken"))
    {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    (StatusCode::FOUND, [(LOCATION, "/login")]).into_response()
}

async fn index(headers: HeaderMap) -> Response {
    if has_valid_session(&headers) {
        Html("<h1>Dashboard</h1>").into_response()
    } else {
        (StatusCode::FOUND, [(LOCATION, "/login")]).into_response()
    }
}

pub fn backend_router() -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/logout", get(logout))
        .route("/", get(index))
}

/// Serves `app` on an ephemeral loopback port.
pub async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// A loopback address with nothing listening on it.
pub async fn closed_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
