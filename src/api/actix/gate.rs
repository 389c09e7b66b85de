//! Page gating middleware for `actix_web::middleware::from_fn`.

use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::middleware::Next;
use actix_web::{HttpResponse, web};

use crate::api::ErrorResponse;
use crate::gate::{self, GateDecision};
use crate::{GatewayConfig, GatewayError};

/// Redirects protected navigations that carry no session cookie.
///
/// Needs `web::Data<GatewayConfig>` in the app; without it every request
/// fails with 500 rather than slipping through ungated.
pub async fn edge_gate(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<EitherBody<impl MessageBody>>, actix_web::Error> {
    let Some(config) = req.app_data::<web::Data<GatewayConfig>>().cloned() else {
        log::error!(target: "enclave_gateway::gate", "msg=\"GatewayConfig not registered\"");
        let response = HttpResponse::InternalServerError().json(ErrorResponse::from(
            GatewayError::ConfigurationError("GatewayConfig not found".to_owned()),
        ));
        return Ok(req.into_response(response).map_into_right_body());
    };

    let cookies: Vec<String> = req
        .headers()
        .get_all(header::COOKIE)
        .filter_map(|v| v.to_str().ok())
        .map(ToOwned::to_owned)
        .collect();

    match gate::evaluate(req.path(), cookies.iter().map(String::as_str), &config) {
        GateDecision::Redirect(to) => {
            let response = HttpResponse::TemporaryRedirect()
                .insert_header((header::LOCATION, to))
                .finish();
            Ok(req.into_response(response).map_into_right_body())
        }
        GateDecision::Allow | GateDecision::Bypass => next
            .call(req)
            .await
            .map(ServiceResponse::map_into_left_body),
    }
}
