//! Standalone gateway server.
//!
//! Configuration comes from `GATEWAY_*` environment variables (see
//! [`GatewayConfig::from_env`]) plus:
//!
//! - `GATEWAY_LISTEN_ADDR`: bind address, default `0.0.0.0:8080`
//! - `GATEWAY_ALLOWED_ORIGINS`: comma-separated origins for credentialed CORS
//! - `RUST_LOG`: log filter, default `info`

use axum::Router;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use enclave_gateway::api::axum::{AppState, credentialed_cors, gateway_router, permissive_cors};
use enclave_gateway::events::listeners::LoggingListener;
use enclave_gateway::{GatewayConfig, HttpBackendClient, register_event_listeners};

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = GatewayConfig::from_env()?;
    config.validate()?;

    register_event_listeners(|registry| {
        registry.listen(LoggingListener::new());
    });

    let backend = HttpBackendClient::new(config.backend.clone())?;
    log::info!(target: "enclave_gateway", "msg=\"backend configured\" base_url=\"{}\"", config.backend.base_url);

    let origins = std::env::var("GATEWAY_ALLOWED_ORIGINS").unwrap_or_default();
    let origins: Vec<&str> = origins
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .collect();
    let cors = if origins.is_empty() {
        log::warn!(target: "enclave_gateway", "msg=\"GATEWAY_ALLOWED_ORIGINS unset, using permissive CORS\"");
        permissive_cors()
    } else {
        credentialed_cors(&origins)
    };

    let app = gateway_router(AppState::new(backend, config), pages())
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = std::env::var("GATEWAY_LISTEN_ADDR").unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_owned());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!(target: "enclave_gateway", "msg=\"listening\" addr=\"{addr}\"");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!(target: "enclave_gateway", "msg=\"failed to listen for ctrl-c\" error=\"{e}\"");
            }
            log::info!(target: "enclave_gateway", "msg=\"shutting down\"");
        })
        .await?;

    Ok(())
}

fn pages() -> Router {
    Router::new()
        .route("/admin", get(admin_page))
        .route("/admin/login", get(login_page))
        .fallback(|| async { (StatusCode::NOT_FOUND, "not found") })
}

async fn admin_page() -> Html<&'static str> {
    Html("<!doctype html><title>Admin</title><p>Signed in.</p>")
}

/// Where the gate sends callers without a session. Posts to the auth proxy.
async fn login_page() -> Html<&'static str> {
    Html(
        "<!doctype html><title>Sign in</title>\
         <form method=\"post\" action=\"/auth/login\">\
         <input name=\"username\" autocomplete=\"username\">\
         <input name=\"password\" type=\"password\" autocomplete=\"current-password\">\
         <button>Sign in</button></form>",
    )
}
