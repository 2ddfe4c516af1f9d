//! Audit log endpoints
//!
//! Every route here requires a valid session and the configured access
//! code; the gate lives in the handlers so the 403 carries the standard
//! error payload.

use std::str::FromStr;
use std::sync::Arc;

use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, web};

use crate::api::helpers::error_response;
use crate::api::jwt::SessionClaims;
use crate::api::types::{CreateLogBody, CreateLogResponse, ErrorResponse, ListLogsResponse, LogQuery};
use crate::errors::LinkletError;
use crate::services::audit::{AuditFilter, AuditLevel, NewAuditEntry};
use crate::services::{AuditService, AuthService};
use crate::utils::ip::client_address;

const DEFAULT_QUERY_LIMIT: usize = 100;

fn authorized_claims(
    req: &HttpRequest,
    auth: &AuthService,
) -> Result<SessionClaims, HttpResponse> {
    let Some(claims) = req.extensions().get::<SessionClaims>().cloned() else {
        return Err(HttpResponse::Unauthorized().json(ErrorResponse {
            message: "Access token required".to_string(),
            error: "UNAUTHORIZED".to_string(),
        }));
    };

    match auth.verify_access_code(&claims) {
        Ok(()) => Ok(claims),
        Err(e) => Err(error_response(&e)),
    }
}

fn parse_level(raw: Option<&str>) -> Result<Option<AuditLevel>, LinkletError> {
    match raw {
        None => Ok(None),
        Some(s) => AuditLevel::from_str(s)
            .map(Some)
            .map_err(LinkletError::invalid_log_entry),
    }
}

pub async fn create_log(
    req: HttpRequest,
    body: web::Json<CreateLogBody>,
    audit: web::Data<Arc<AuditService>>,
    auth: web::Data<Arc<AuthService>>,
) -> impl Responder {
    let claims = match authorized_claims(&req, &auth) {
        Ok(claims) => claims,
        Err(response) => return response,
    };

    let body = body.into_inner();
    let level = match parse_level(body.level.as_deref()) {
        Ok(level) => level,
        Err(e) => return error_response(&e),
    };

    let user_agent = req
        .headers()
        .get("User-Agent")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let entry = NewAuditEntry {
        action: body.action,
        details: body.details,
        level,
        identity: Some(claims.identity()),
        ip: client_address(&req),
        user_agent,
    };

    match audit.append(entry) {
        Ok(stored) => HttpResponse::Created().json(CreateLogResponse {
            log_id: stored.log_id,
            message: "Log created successfully".to_string(),
        }),
        Err(e) => error_response(&e),
    }
}

pub async fn get_logs(
    req: HttpRequest,
    query: web::Query<LogQuery>,
    audit: web::Data<Arc<AuditService>>,
    auth: web::Data<Arc<AuthService>>,
) -> impl Responder {
    if let Err(response) = authorized_claims(&req, &auth) {
        return response;
    }

    let query = query.into_inner();
    let level = match parse_level(query.level.as_deref()) {
        Ok(level) => level,
        Err(e) => return error_response(&e),
    };

    let filter = AuditFilter {
        level,
        action: query.action,
        start: query.start_date,
        end: query.end_date,
        limit: query.limit.unwrap_or(DEFAULT_QUERY_LIMIT),
    };

    let logs = audit.query(&filter);
    HttpResponse::Ok().json(ListLogsResponse {
        total: logs.len(),
        logs,
    })
}

pub async fn get_log_by_id(
    req: HttpRequest,
    path: web::Path<String>,
    audit: web::Data<Arc<AuditService>>,
    auth: web::Data<Arc<AuthService>>,
) -> impl Responder {
    if let Err(response) = authorized_claims(&req, &auth) {
        return response;
    }

    match audit.get(&path.into_inner()) {
        Ok(entry) => HttpResponse::Ok().json(entry),
        Err(e) => error_response(&e),
    }
}
