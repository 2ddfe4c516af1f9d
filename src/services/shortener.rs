//! Short link service
//!
//! Orchestrates the code generator, the registry store and click recording
//! behind the create / resolve / stats / list operations.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use crate::errors::{LinkletError, Result};
use crate::storages::{ClickEvent, CreatorIdentity, ShortLink, Storage};
use crate::utils::url_validator::validate_url;
use crate::utils::{MAX_CODE_LENGTH, generate_short_code, is_valid_short_code};

/// Validity window bounds, in minutes (one minute to one week).
pub const MIN_VALIDITY_MINUTES: i64 = 1;
pub const MAX_VALIDITY_MINUTES: i64 = 10080;

/// Request to register a new short link.
#[derive(Debug, Clone)]
pub struct CreateLinkRequest {
    /// Redirect target.
    pub target: String,
    /// Minutes until expiry; the configured default applies when absent.
    pub validity_minutes: Option<i64>,
    /// Caller-chosen code (no collision retry); a random one is generated
    /// when absent.
    pub custom_code: Option<String>,
    /// Identity snapshot for authenticated callers.
    pub created_by: Option<CreatorIdentity>,
}

/// Result of link creation.
#[derive(Debug, Clone)]
pub struct LinkCreateResult {
    pub link: ShortLink,
    /// Whether the code was auto-generated.
    pub generated_code: bool,
}

/// Full record snapshot plus read-time derivations.
#[derive(Debug, Clone)]
pub struct LinkStats {
    pub link: ShortLink,
    pub is_expired: bool,
    pub total_clicks: usize,
}

/// Per-link summary for listings; clicks are collapsed to a count.
#[derive(Debug, Clone)]
pub struct LinkSummary {
    pub code: String,
    pub target: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub total_clicks: usize,
    pub is_expired: bool,
    pub created_by: Option<CreatorIdentity>,
}

pub struct ShortenerService {
    storage: Arc<dyn Storage>,
    default_validity_minutes: i64,
    code_length: usize,
}

impl ShortenerService {
    pub fn new(storage: Arc<dyn Storage>, default_validity_minutes: i64, code_length: usize) -> Self {
        Self {
            storage,
            default_validity_minutes,
            code_length,
        }
    }

    pub fn from_config(storage: Arc<dyn Storage>) -> Self {
        let config = crate::config::get_config();
        Self::new(
            storage,
            config.shortener.default_validity_minutes,
            config.shortener.code_length,
        )
    }

    /// Register a new short link.
    pub async fn create(&self, req: CreateLinkRequest) -> Result<LinkCreateResult> {
        validate_url(&req.target).map_err(|e| LinkletError::invalid_url(e.to_string()))?;

        let validity_minutes = match req.validity_minutes {
            Some(v) if !(MIN_VALIDITY_MINUTES..=MAX_VALIDITY_MINUTES).contains(&v) => {
                return Err(LinkletError::invalid_validity(format!(
                    "validity must be between {} and {} minutes, got {}",
                    MIN_VALIDITY_MINUTES, MAX_VALIDITY_MINUTES, v
                )));
            }
            Some(v) => v,
            None => self.default_validity_minutes,
        };

        let (code, generated) = match req.custom_code.filter(|c| !c.is_empty()) {
            Some(c) => {
                if !is_valid_short_code(&c) {
                    return Err(LinkletError::invalid_code(format!(
                        "invalid short code '{}': use 1-{} characters from [A-Za-z0-9_-]",
                        c, MAX_CODE_LENGTH
                    )));
                }
                (c, false)
            }
            None => (generate_short_code(self.code_length), true),
        };

        let now = Utc::now();
        let mut link = ShortLink {
            code,
            target: req.target,
            created_at: now,
            expires_at: now + Duration::minutes(validity_minutes),
            clicks: Vec::new(),
            created_by: req.created_by,
        };

        match self.storage.insert(link.clone()).await {
            Ok(()) => {}
            Err(LinkletError::CodeTaken(_)) if generated => {
                // Random collision: retry once with a fresh code, then give up.
                let retry_code = generate_short_code(self.code_length);
                warn!(
                    "generated code '{}' collided, retrying once with '{}'",
                    link.code, retry_code
                );
                link.code = retry_code;
                self.storage.insert(link.clone()).await?;
            }
            Err(e) => return Err(e),
        }

        info!("created link '{}' -> '{}'", link.code, link.target);
        Ok(LinkCreateResult {
            link,
            generated_code: generated,
        })
    }

    /// Resolve a code for redirecting, recording the click.
    ///
    /// A failed click append is logged and swallowed: the redirect target is
    /// still returned. Expiry beats click accounting, so expired links never
    /// accumulate clicks.
    pub async fn resolve(&self, code: &str, event: ClickEvent) -> Result<String> {
        let link = self.storage.get(code).await?;

        if link.is_expired() {
            return Err(LinkletError::expired(format!(
                "short code '{}' expired at {}",
                code,
                link.expires_at.to_rfc3339()
            )));
        }

        if let Err(e) = self.storage.record_click(code, event).await {
            warn!("failed to record click for '{}': {}", code, e);
        }

        Ok(link.target)
    }

    /// Full record snapshot with expiry evaluated at read time.
    pub async fn stats(&self, code: &str) -> Result<LinkStats> {
        let link = self.storage.get(code).await?;
        let is_expired = link.is_expired();
        let total_clicks = link.clicks.len();
        Ok(LinkStats {
            link,
            is_expired,
            total_clicks,
        })
    }

    /// Summaries of every registered link, expired ones included.
    pub async fn list_all(&self) -> Vec<LinkSummary> {
        let now = Utc::now();
        self.storage
            .load_all()
            .await
            .into_iter()
            .map(|link| LinkSummary {
                is_expired: link.is_expired_at(now),
                total_clicks: link.clicks.len(),
                code: link.code,
                target: link.target,
                created_at: link.created_at,
                expires_at: link.expires_at,
                created_by: link.created_by,
            })
            .collect()
    }
}
