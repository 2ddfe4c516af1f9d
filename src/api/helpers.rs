//! Response mapping helpers
//!
//! Error kinds map 1:1 onto status codes and stable tags; handlers never
//! build error bodies by hand.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;

use crate::api::types::ErrorResponse;
use crate::errors::LinkletError;

pub fn http_status(err: &LinkletError) -> StatusCode {
    match err {
        LinkletError::InvalidUrl(_)
        | LinkletError::InvalidCode(_)
        | LinkletError::InvalidValidity(_)
        | LinkletError::InvalidLogEntry(_) => StatusCode::BAD_REQUEST,
        LinkletError::CodeTaken(_) => StatusCode::CONFLICT,
        LinkletError::NotFound(_) => StatusCode::NOT_FOUND,
        LinkletError::Expired(_) => StatusCode::GONE,
        LinkletError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        LinkletError::Forbidden(_) => StatusCode::FORBIDDEN,
        LinkletError::Serialization(_) | LinkletError::FileOperation(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

pub fn error_tag(err: &LinkletError) -> &'static str {
    match err {
        LinkletError::InvalidUrl(_) => "INVALID_URL",
        LinkletError::InvalidCode(_) => "INVALID_SHORTCODE",
        LinkletError::InvalidValidity(_) => "INVALID_VALIDITY",
        LinkletError::CodeTaken(_) => "CODE_TAKEN",
        LinkletError::NotFound(_) => "NOT_FOUND",
        LinkletError::Expired(_) => "EXPIRED",
        LinkletError::Unauthorized(_) => "UNAUTHORIZED",
        LinkletError::Forbidden(_) => "ACCESS_DENIED",
        LinkletError::InvalidLogEntry(_) => "INVALID_LOG_ENTRY",
        LinkletError::Serialization(_) | LinkletError::FileOperation(_) => "SERVER_ERROR",
    }
}

pub fn error_response(err: &LinkletError) -> HttpResponse {
    HttpResponse::build(http_status(err)).json(ErrorResponse {
        message: err.message().to_string(),
        error: error_tag(err).to_string(),
    })
}
