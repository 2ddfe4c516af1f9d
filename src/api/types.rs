//! HTTP request and response types
//!
//! Wire format is camelCase where the field crosses the boundary under a
//! different name than the Rust one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::audit::AuditEntry;
use crate::services::shortener::{LinkStats, LinkSummary};
use crate::storages::{ClickEvent, CreatorIdentity};

pub const ANONYMOUS: &str = "Anonymous";

// ============ Requests ============

#[derive(Debug, Clone, Deserialize)]
pub struct CreateLinkBody {
    pub url: String,
    pub validity: Option<i64>,
    pub shortcode: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub roll_no: String,
    #[serde(default)]
    pub access_code: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateLogBody {
    pub action: String,
    pub details: Option<serde_json::Value>,
    pub level: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogQuery {
    pub level: Option<String>,
    pub action: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
}

// ============ Responses ============

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkResponse {
    pub short_link: String,
    pub expiry: String,
    pub code: String,
    pub created_by: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub original_url: String,
    pub created_at: String,
    pub expiry: String,
    pub total_clicks: usize,
    pub click_details: Vec<ClickEvent>,
    pub is_expired: bool,
    pub created_by: Option<CreatorIdentity>,
}

impl From<LinkStats> for StatsResponse {
    fn from(stats: LinkStats) -> Self {
        Self {
            original_url: stats.link.target,
            created_at: stats.link.created_at.to_rfc3339(),
            expiry: stats.link.expires_at.to_rfc3339(),
            total_clicks: stats.total_clicks,
            click_details: stats.link.clicks,
            is_expired: stats.is_expired,
            created_by: stats.link.created_by,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSummaryResponse {
    pub code: String,
    pub original_url: String,
    pub created_at: String,
    pub expiry: String,
    pub total_clicks: usize,
    pub is_expired: bool,
    pub created_by: Option<CreatorIdentity>,
}

impl From<LinkSummary> for LinkSummaryResponse {
    fn from(summary: LinkSummary) -> Self {
        Self {
            code: summary.code,
            original_url: summary.target,
            created_at: summary.created_at.to_rfc3339(),
            expiry: summary.expires_at.to_rfc3339(),
            total_clicks: summary.total_clicks,
            is_expired: summary.is_expired,
            created_by: summary.created_by,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLinksResponse {
    pub total: usize,
    pub urls: Vec<LinkSummaryResponse>,
    pub requested_by: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token_type: String,
    pub access_token: String,
    pub expires_in: i64,
    pub user: CreatorIdentity,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub email: String,
    pub name: String,
    pub roll_no: String,
    pub access_code: String,
    #[serde(rename = "clientID")]
    pub client_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLogResponse {
    #[serde(rename = "logID")]
    pub log_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListLogsResponse {
    pub logs: Vec<AuditEntry>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub timestamp: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Error payload; `error` is the stable machine-readable tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    pub error: String,
}
