use actix_web::web;

use super::handlers;
use crate::BackendAuthClient;

/// Configures the auth routes under the `/auth` scope.
///
/// Requires `web::Data<B>` and `web::Data<GatewayConfig>` to be registered in
/// the app.
///
/// Routes:
/// - `POST /auth/login` - proxy login
/// - `GET|POST /auth/logout` - end the session and clear the cookie
/// - `GET /auth/status` - ask the backend whether the cookie is live
pub fn auth_routes<B>(cfg: &mut web::ServiceConfig)
where
    B: BackendAuthClient + Clone + 'static,
{
    cfg.service(
        web::scope("/auth")
            .route("/login", web::post().to(handlers::login::<B>))
            .route("/logout", web::get().to(handlers::logout::<B>))
            .route("/logout", web::post().to(handlers::logout::<B>))
            .route("/status", web::get().to(handlers::status::<B>)),
    );
}
