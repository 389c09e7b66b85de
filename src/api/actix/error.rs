use actix_web::{HttpResponse, ResponseError};

use crate::GatewayError;
use crate::api::ErrorResponse;

/// converts `GatewayError` into appropriate HTTP responses
#[derive(Debug)]
pub struct ApiError(pub GatewayError);

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        Self(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        let error_response = ErrorResponse::from(self.0.clone());

        match &self.0 {
            GatewayError::MissingCredentials => HttpResponse::BadRequest().json(error_response),
            GatewayError::InvalidCredentials => HttpResponse::Unauthorized().json(error_response),
            GatewayError::BackendUnavailable(_)
            | GatewayError::ConfigurationError(_)
            | GatewayError::Internal(_) => HttpResponse::InternalServerError().json(error_response),
        }
    }
}
