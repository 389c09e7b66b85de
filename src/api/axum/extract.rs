use std::convert::Infallible;

use axum::{Form, Json};
use axum::extract::{FromRequest, FromRequestParts, Multipart, Request};
use axum::http::HeaderMap;
use axum::http::header::{CONTENT_TYPE, COOKIE};
use axum::http::request::Parts;

use super::error::AppError;
use crate::api::LoginRequest;
use crate::{GatewayError, SessionCredential};

/// Raw `Cookie` header values, skipping any that are not visible ASCII.
pub fn cookie_header_values(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(ToOwned::to_owned)
        .collect()
}

/// The caller's cookies, ready to forward. `None` when none were sent.
#[derive(Debug, Clone)]
pub struct ForwardedCredential(pub Option<SessionCredential>);

impl<S> FromRequestParts<S> for ForwardedCredential
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let values = cookie_header_values(&parts.headers);
        Ok(Self(SessionCredential::from_cookie_headers(
            values.iter().map(String::as_str),
        )))
    }
}

/// Login body as JSON, urlencoded form or multipart form, picked by
/// `Content-Type`.
///
/// A body that cannot be read at all is treated like one without credentials.
#[derive(Debug)]
pub struct LoginBody(pub LoginRequest);

impl<S> FromRequest<S> for LoginBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let body = if content_type.starts_with("application/json") {
            Json::<LoginRequest>::from_request(req, state)
                .await
                .map(|Json(body)| body)
                .map_err(|rejection| rejection.body_text())
        } else if content_type.starts_with("multipart/form-data") {
            read_multipart(req, state).await
        } else {
            Form::<LoginRequest>::from_request(req, state)
                .await
                .map(|Form(body)| body)
                .map_err(|rejection| rejection.body_text())
        };

        match body {
            Ok(body) => Ok(Self(body)),
            Err(reason) => {
                log::debug!(target: "enclave_gateway::api", "msg=\"unreadable login body\" reason=\"{reason}\"");
                Err(AppError(GatewayError::MissingCredentials))
            }
        }
    }
}

async fn read_multipart<S>(req: Request, state: &S) -> Result<LoginRequest, String>
where
    S: Send + Sync,
{
    let mut multipart = Multipart::from_request(req, state)
        .await
        .map_err(|rejection| rejection.body_text())?;

    let mut fields = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(|e| e.body_text())? {
        let Some(name) = field.name().map(ToOwned::to_owned) else {
            continue;
        };
        let value = field.text().await.map_err(|e| e.body_text())?;
        fields.push((name, value));
    }

    Ok(LoginRequest::from_fields(fields))
}
