use actix_web::http::header;
use actix_web::{HttpResponse, web};

use super::error::ApiError;
use super::extract::{ForwardedCredential, LoginBody};
use crate::actions::{CheckStatusAction, LoginAction, LogoutAction};
use crate::api::{LoginResponse, LogoutResponse, StatusResponse};
use crate::session::removal_cookie;
use crate::{BackendAuthClient, GatewayConfig};

pub async fn login<B>(
    LoginBody(body): LoginBody,
    backend: web::Data<B>,
) -> Result<HttpResponse, ApiError>
where
    B: BackendAuthClient + Clone + 'static,
{
    let action = LoginAction::new(backend.get_ref().clone());
    let success = action
        .execute(body.username.as_deref(), body.password.as_ref())
        .await?;

    let mut response = HttpResponse::Ok();
    for cookie in success.set_cookies {
        response.append_header((header::SET_COOKIE, cookie));
    }
    Ok(response.json(LoginResponse::success(success.username)))
}

pub async fn logout<B>(
    credential: ForwardedCredential,
    backend: web::Data<B>,
    config: web::Data<GatewayConfig>,
) -> HttpResponse
where
    B: BackendAuthClient + Clone + 'static,
{
    let action = LogoutAction::new(backend.get_ref().clone());
    let acknowledged = action.execute(credential.0.as_ref()).await;

    HttpResponse::Ok()
        .append_header((header::SET_COOKIE, removal_cookie(&config.cookie)))
        .json(LogoutResponse::new(acknowledged))
}

pub async fn status<B>(credential: ForwardedCredential, backend: web::Data<B>) -> HttpResponse
where
    B: BackendAuthClient + Clone + 'static,
{
    let action = CheckStatusAction::new(backend.get_ref().clone());
    let authenticated = action.execute(credential.0.as_ref()).await;
    HttpResponse::Ok().json(StatusResponse { authenticated })
}
