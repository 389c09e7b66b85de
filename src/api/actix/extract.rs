use std::future::{Future, Ready, ready};
use std::pin::Pin;

use actix_multipart::Multipart;
use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, web};
use futures::TryStreamExt;

use super::error::ApiError;
use crate::api::LoginRequest;
use crate::{GatewayError, SessionCredential};

/// Raw `Cookie` header values, skipping any that are not visible ASCII.
pub fn cookie_header_values(req: &HttpRequest) -> Vec<String> {
    req.headers()
        .get_all(header::COOKIE)
        .filter_map(|v| v.to_str().ok())
        .map(ToOwned::to_owned)
        .collect()
}

/// The caller's cookies, ready to forward. `None` when none were sent.
#[derive(Debug, Clone)]
pub struct ForwardedCredential(pub Option<SessionCredential>);

impl FromRequest for ForwardedCredential {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let values = cookie_header_values(req);
        ready(Ok(Self(SessionCredential::from_cookie_headers(
            values.iter().map(String::as_str),
        ))))
    }
}

/// Login body as JSON, urlencoded form or multipart form, picked by
/// `Content-Type`.
///
/// A body that cannot be read at all is treated like one without credentials.
#[derive(Debug)]
pub struct LoginBody(pub LoginRequest);

impl FromRequest for LoginBody {
    type Error = ApiError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let req = req.clone();
        let mut payload = payload.take();

        Box::pin(async move {
            let body = if content_type.starts_with("application/json") {
                web::Json::<LoginRequest>::from_request(&req, &mut payload)
                    .await
                    .map(web::Json::into_inner)
                    .map_err(|e| e.to_string())
            } else if content_type.starts_with("multipart/form-data") {
                read_multipart(Multipart::new(req.headers(), payload)).await
            } else {
                web::Form::<LoginRequest>::from_request(&req, &mut payload)
                    .await
                    .map(web::Form::into_inner)
                    .map_err(|e| e.to_string())
            };

            body.map(Self).map_err(|reason| {
                log::debug!(target: "enclave_gateway::api", "msg=\"unreadable login body\" reason=\"{reason}\"");
                ApiError(GatewayError::MissingCredentials)
            })
        })
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<LoginRequest, String> {
    let mut fields = Vec::new();
    while let Some(mut field) = multipart.try_next().await.map_err(|e| e.to_string())? {
        let Some(name) = field.name().map(ToOwned::to_owned) else {
            continue;
        };
        let mut value = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(|e| e.to_string())? {
            value.extend_from_slice(&chunk);
        }
        let value = String::from_utf8(value).map_err(|e| e.to_string())?;
        fields.push((name, value));
    }

    Ok(LoginRequest::from_fields(fields))
}
