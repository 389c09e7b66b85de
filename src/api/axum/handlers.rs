//! HTTP handlers for the Axum auth endpoints.

use axum::Json;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, IntoResponse};

use super::error::AppError;
use super::extract::{ForwardedCredential, LoginBody};
use super::routes::AppState;
use crate::BackendAuthClient;
use crate::actions::{CheckStatusAction, LoginAction, LogoutAction};
use crate::api::{LoginResponse, LogoutResponse, StatusResponse};
use crate::session::removal_cookie;

/// Proxy credentials to the backend and hand its session cookies to the caller.
///
/// POST /login
#[cfg_attr(feature = "tracing", tracing::instrument(name = "http.login", skip_all))]
pub async fn login<B>(
    State(state): State<AppState<B>>,
    LoginBody(body): LoginBody,
) -> Result<impl IntoResponse, AppError>
where
    B: BackendAuthClient + Clone + 'static,
{
    let action = LoginAction::new(state.backend);
    let success = action
        .execute(body.username.as_deref(), body.password.as_ref())
        .await?;

    let headers = success
        .set_cookies
        .into_iter()
        .map(|cookie| (SET_COOKIE, cookie))
        .collect::<Vec<_>>();

    Ok((
        AppendHeaders(headers),
        Json(LoginResponse::success(success.username)),
    ))
}

/// End the session upstream when possible and always clear it locally.
///
/// GET|POST /logout
#[cfg_attr(feature = "tracing", tracing::instrument(name = "http.logout", skip_all))]
pub async fn logout<B>(
    State(state): State<AppState<B>>,
    ForwardedCredential(credential): ForwardedCredential,
) -> impl IntoResponse
where
    B: BackendAuthClient + Clone + 'static,
{
    let action = LogoutAction::new(state.backend);
    let acknowledged = action.execute(credential.as_ref()).await;

    (
        AppendHeaders([(SET_COOKIE, removal_cookie(&state.config.cookie))]),
        Json(LogoutResponse::new(acknowledged)),
    )
}

/// GET /status
#[cfg_attr(feature = "tracing", tracing::instrument(name = "http.status", skip_all))]
pub async fn status<B>(
    State(state): State<AppState<B>>,
    ForwardedCredential(credential): ForwardedCredential,
) -> Json<StatusResponse>
where
    B: BackendAuthClient + Clone + 'static,
{
    let action = CheckStatusAction::new(state.backend);
    let authenticated = action.execute(credential.as_ref()).await;
    Json(StatusResponse { authenticated })
}
