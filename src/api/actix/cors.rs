use actix_cors::Cors;
use actix_web::http::{Method, header};

/// development only - allows all origins
pub fn permissive() -> Cors {
    Cors::permissive()
}

/// Credentialed CORS for the auth endpoints.
pub fn credentialed(allowed_origins: &[&str]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .supports_credentials()
        .max_age(3600);

    for origin in allowed_origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}
