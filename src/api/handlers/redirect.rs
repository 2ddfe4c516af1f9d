//! Redirect endpoint
//!
//! The public hot path: short code in, 307 out. Click metadata is captured
//! from the request before the lookup so the recorded event reflects what
//! the caller actually sent.

use std::sync::Arc;

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use chrono::Utc;

use crate::api::helpers::error_response;
use crate::services::ShortenerService;
use crate::storages::ClickEvent;
use crate::utils::ip::client_address;

fn header_or<'a>(req: &'a HttpRequest, name: header::HeaderName, default: &'a str) -> &'a str {
    req.headers()
        .get(name)
        .and_then(|h| h.to_str().ok())
        .unwrap_or(default)
}

pub async fn redirect_short_code(
    req: HttpRequest,
    path: web::Path<String>,
    shortener: web::Data<Arc<ShortenerService>>,
) -> impl Responder {
    let code = path.into_inner();

    let event = ClickEvent {
        timestamp: Utc::now(),
        source: header_or(&req, header::REFERER, "direct").to_string(),
        location: client_address(&req),
        user_agent: header_or(&req, header::USER_AGENT, "unknown").to_string(),
    };

    match shortener.resolve(&code, event).await {
        Ok(target) => HttpResponse::TemporaryRedirect()
            .insert_header((header::LOCATION, target))
            .finish(),
        Err(e) => error_response(&e),
    }
}
