use reqwest::StatusCode;

use super::{FailureHint, LoginOutcome};
use crate::config::FailureMarkers;

/// The parts of a backend login response that matter for classification.
#[derive(Debug, Clone)]
pub struct BackendResponse {
    pub status: StatusCode,
    pub set_cookies: Vec<String>,
    /// Only read for 200 responses.
    pub body: String,
}

/// Maps a raw login response onto a [`LoginOutcome`].
///
/// Success requires a redirect that carries at least one `Set-Cookie`. A 200
/// is a redisplayed login page: a recognized marker makes it a credential
/// failure, anything else is ambiguous. Absence of proof is never success.
pub fn classify_login_response(response: BackendResponse, markers: &FailureMarkers) -> LoginOutcome {
    match response.status {
        StatusCode::MOVED_PERMANENTLY
        | StatusCode::FOUND
        | StatusCode::SEE_OTHER
        | StatusCode::TEMPORARY_REDIRECT
        | StatusCode::PERMANENT_REDIRECT => {
            if response.set_cookies.is_empty() {
                LoginOutcome::AmbiguousFailure(FailureHint::RedirectWithoutCookie)
            } else {
                LoginOutcome::Success {
                    set_cookies: response.set_cookies,
                }
            }
        }
        StatusCode::OK => {
            if markers.matches(&response.body) {
                LoginOutcome::CredentialFailure
            } else {
                LoginOutcome::AmbiguousFailure(FailureHint::NoFailureMarker)
            }
        }
        other => LoginOutcome::AmbiguousFailure(FailureHint::UnexpectedStatus(other.as_u16())),
    }
}
