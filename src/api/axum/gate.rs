//! Page gating middleware.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use super::extract::cookie_header_values;
use super::routes::AppState;
use crate::gate::{self, GateDecision};
use crate::{BackendAuthClient, GatewayConfig};

/// Redirects protected navigations that carry no session cookie.
///
/// ```rust,ignore
/// let app = pages.layer(axum::middleware::from_fn_with_state(config, edge_gate));
/// ```
pub async fn edge_gate(
    State(config): State<Arc<GatewayConfig>>,
    request: Request,
    next: Next,
) -> Response {
    let cookies = cookie_header_values(request.headers());
    let decision = gate::evaluate(
        request.uri().path(),
        cookies.iter().map(String::as_str),
        &config,
    );

    match decision {
        GateDecision::Redirect(to) => Redirect::temporary(&to).into_response(),
        GateDecision::Allow | GateDecision::Bypass => next.run(request).await,
    }
}

/// Like [`edge_gate`] but also confirms the session with the backend.
pub async fn verified_gate<B>(
    State(state): State<AppState<B>>,
    request: Request,
    next: Next,
) -> Response
where
    B: BackendAuthClient + Clone + 'static,
{
    let cookies = cookie_header_values(request.headers());
    let path = request.uri().path().to_owned();
    let decision = gate::require_session(
        &state.backend,
        &path,
        cookies.iter().map(String::as_str),
        &state.config,
    )
    .await;

    match decision {
        GateDecision::Redirect(to) => Redirect::temporary(&to).into_response(),
        GateDecision::Allow | GateDecision::Bypass => next.run(request).await,
    }
}
