use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::GatewayError;
use crate::api::ErrorResponse;

/// converts `GatewayError` into appropriate HTTP responses
#[derive(Debug)]
pub struct AppError(pub GatewayError);

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            GatewayError::MissingCredentials => StatusCode::BAD_REQUEST,
            GatewayError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            GatewayError::BackendUnavailable(_)
            | GatewayError::ConfigurationError(_)
            | GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(ErrorResponse::from(self.0))).into_response()
    }
}
