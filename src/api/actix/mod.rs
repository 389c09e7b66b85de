pub mod cors;
mod error;
mod extract;
mod gate;
mod handlers;
mod routes;

pub use error::ApiError;
pub use extract::{ForwardedCredential, LoginBody, cookie_header_values};
pub use gate::edge_gate;
pub use routes::auth_routes;
