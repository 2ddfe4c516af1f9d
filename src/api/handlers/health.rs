//! Health check endpoint

use actix_web::{HttpResponse, Responder};
use chrono::Utc;

use crate::api::types::HealthResponse;

pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "OK".to_string(),
        message: "URL shortener backend is running".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
