//! Authentication endpoints: login, profile, logout

use std::sync::Arc;

use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, web};

use crate::api::helpers::error_response;
use crate::api::jwt::SessionClaims;
use crate::api::types::{ErrorResponse, LoginBody, LoginResponse, MessageResponse, ProfileResponse};
use crate::services::AuthService;

fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.to_string())
}

pub async fn login(body: web::Json<LoginBody>, auth: web::Data<Arc<AuthService>>) -> impl Responder {
    let body = body.into_inner();

    if body.email.is_empty() || body.roll_no.is_empty() || body.access_code.is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            message: "Email, roll number, and access code are required".to_string(),
            error: "MISSING_FIELDS".to_string(),
        });
    }

    match auth.login(&body.email, &body.roll_no, &body.access_code) {
        Ok(outcome) => HttpResponse::Ok().json(LoginResponse {
            token_type: "Bearer".to_string(),
            access_token: outcome.access_token,
            expires_in: outcome.expires_at,
            user: outcome.user,
        }),
        Err(e) => error_response(&e),
    }
}

pub async fn profile(req: HttpRequest) -> impl Responder {
    match req.extensions().get::<SessionClaims>() {
        Some(claims) => HttpResponse::Ok().json(ProfileResponse {
            email: claims.email.clone(),
            name: claims.name.clone(),
            roll_no: claims.roll_no.clone(),
            access_code: claims.access_code.clone(),
            client_id: claims.sub.clone(),
        }),
        None => HttpResponse::Unauthorized().json(ErrorResponse {
            message: "Access token required".to_string(),
            error: "UNAUTHORIZED".to_string(),
        }),
    }
}

pub async fn logout(req: HttpRequest, auth: web::Data<Arc<AuthService>>) -> impl Responder {
    if let Some(token) = bearer_token(&req) {
        auth.logout(&token);
    }

    HttpResponse::Ok().json(MessageResponse {
        message: "Logged out successfully".to_string(),
    })
}
