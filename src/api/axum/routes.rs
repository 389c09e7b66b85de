use std::sync::Arc;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};

use super::{gate, handlers};
use crate::{BackendAuthClient, GatewayConfig};

#[derive(Clone)]
pub struct AppState<B> {
    pub backend: B,
    pub config: Arc<GatewayConfig>,
}

impl<B> AppState<B> {
    pub fn new(backend: B, config: GatewayConfig) -> Self {
        Self {
            backend,
            config: Arc::new(config),
        }
    }
}

/// `/login`, `/logout` and `/status`, meant to be nested under `/auth`.
pub fn auth_routes<B>() -> Router<AppState<B>>
where
    B: BackendAuthClient + Clone + 'static,
{
    Router::new()
        .route("/login", post(handlers::login::<B>))
        .route(
            "/logout",
            get(handlers::logout::<B>).post(handlers::logout::<B>),
        )
        .route("/status", get(handlers::status::<B>))
}

/// Auth endpoints under `/auth` plus the application's pages, all behind the
/// edge gate.
pub fn gateway_router<B>(state: AppState<B>, pages: Router) -> Router
where
    B: BackendAuthClient + Clone + 'static,
{
    let config = state.config.clone();

    Router::new()
        .nest("/auth", auth_routes::<B>())
        .with_state(state)
        .merge(pages)
        .layer(from_fn_with_state(config, gate::edge_gate))
}
