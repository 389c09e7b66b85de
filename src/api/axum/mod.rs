mod cors;
mod error;
mod extract;
mod gate;
mod handlers;
mod routes;

pub use cors::{credentialed as credentialed_cors, permissive as permissive_cors};
pub use error::AppError;
pub use extract::{ForwardedCredential, LoginBody, cookie_header_values};
pub use gate::{edge_gate, verified_gate};
pub use routes::{AppState, auth_routes, gateway_router};
