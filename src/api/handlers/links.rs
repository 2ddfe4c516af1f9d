//! Short link endpoints: create, stats, list
//!
//! All three run behind the optional auth gate: authenticated callers get
//! their identity snapshotted onto created records, anonymous callers are
//! served all the same.

use std::sync::Arc;

use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, web};

use crate::api::helpers::error_response;
use crate::api::jwt::SessionClaims;
use crate::api::types::{
    ANONYMOUS, CreateLinkBody, CreateLinkResponse, ListLinksResponse, StatsResponse,
};
use crate::config::get_config;
use crate::services::ShortenerService;
use crate::services::shortener::CreateLinkRequest;

fn session_claims(req: &HttpRequest) -> Option<SessionClaims> {
    req.extensions().get::<SessionClaims>().cloned()
}

fn caller_name(claims: &Option<SessionClaims>) -> String {
    claims
        .as_ref()
        .map(|c| c.name.clone())
        .unwrap_or_else(|| ANONYMOUS.to_string())
}

pub async fn create_short_url(
    req: HttpRequest,
    body: web::Json<CreateLinkBody>,
    shortener: web::Data<Arc<ShortenerService>>,
) -> impl Responder {
    let claims = session_claims(&req);
    let created_by = caller_name(&claims);
    let body = body.into_inner();

    let request = CreateLinkRequest {
        target: body.url,
        validity_minutes: body.validity,
        custom_code: body.shortcode,
        created_by: claims.as_ref().map(SessionClaims::identity),
    };

    match shortener.create(request).await {
        Ok(result) => {
            let base_url = get_config().server.base_url.trim_end_matches('/');
            HttpResponse::Created().json(CreateLinkResponse {
                short_link: format!("{}/{}", base_url, result.link.code),
                expiry: result.link.expires_at.to_rfc3339(),
                code: result.link.code,
                created_by,
            })
        }
        Err(e) => error_response(&e),
    }
}

pub async fn get_url_stats(
    path: web::Path<String>,
    shortener: web::Data<Arc<ShortenerService>>,
) -> impl Responder {
    match shortener.stats(&path.into_inner()).await {
        Ok(stats) => HttpResponse::Ok().json(StatsResponse::from(stats)),
        Err(e) => error_response(&e),
    }
}

pub async fn get_all_urls(
    req: HttpRequest,
    shortener: web::Data<Arc<ShortenerService>>,
) -> impl Responder {
    let claims = session_claims(&req);
    let summaries = shortener.list_all().await;

    HttpResponse::Ok().json(ListLinksResponse {
        total: summaries.len(),
        urls: summaries.into_iter().map(Into::into).collect(),
        requested_by: caller_name(&claims),
    })
}
