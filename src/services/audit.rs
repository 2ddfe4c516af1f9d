//! Audit log store
//!
//! Entries live in an in-memory map and are mirrored as formatted lines
//! into daily `app-YYYY-MM-DD.log` files. The file is a write-only sink:
//! queries are served from memory, and a sink failure never loses the
//! in-memory entry.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::{LinkletError, Result};
use crate::storages::CreatorIdentity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl AuditLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for AuditLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AuditLevel {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(format!(
                "Invalid audit level: '{}'. Valid: debug, info, warn, error",
                s
            )),
        }
    }
}

/// A stored audit entry. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    #[serde(rename = "logID")]
    pub log_id: String,
    pub action: String,
    pub details: serde_json::Value,
    pub level: AuditLevel,
    pub timestamp: DateTime<Utc>,
    pub user_email: String,
    pub user_name: String,
    pub user_roll_no: String,
    pub ip: String,
    pub user_agent: String,
}

/// Input for a new entry; identity-less appends are recorded as anonymous.
#[derive(Debug, Clone)]
pub struct NewAuditEntry {
    pub action: String,
    pub details: Option<serde_json::Value>,
    pub level: Option<AuditLevel>,
    pub identity: Option<CreatorIdentity>,
    pub ip: String,
    pub user_agent: String,
}

/// Query filter; all criteria are conjunctive.
#[derive(Debug, Clone)]
pub struct AuditFilter {
    pub level: Option<AuditLevel>,
    /// Case-insensitive substring match on the action.
    pub action: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub limit: usize,
}

impl Default for AuditFilter {
    fn default() -> Self {
        Self {
            level: None,
            action: None,
            start: None,
            end: None,
            limit: 100,
        }
    }
}

pub struct AuditService {
    entries: DashMap<String, AuditEntry>,
    log_dir: PathBuf,
    /// Serializes sink appends so concurrent entries never interleave lines.
    sink_lock: Mutex<()>,
}

impl AuditService {
    pub fn new(log_dir: PathBuf) -> Self {
        Self {
            entries: DashMap::new(),
            log_dir,
            sink_lock: Mutex::new(()),
        }
    }

    pub fn from_config() -> Self {
        Self::new(crate::config::get_config().audit.log_dir.clone())
    }

    /// Record a new entry. The in-memory copy always wins: a sink write
    /// failure is logged and swallowed.
    pub fn append(&self, new: NewAuditEntry) -> Result<AuditEntry> {
        if new.action.trim().is_empty() {
            return Err(LinkletError::invalid_log_entry("action is required"));
        }

        let (user_email, user_name, user_roll_no) = match new.identity {
            Some(identity) => (identity.email, identity.name, identity.roll_no),
            None => (
                "anonymous".to_string(),
                "anonymous".to_string(),
                "unknown".to_string(),
            ),
        };

        let entry = AuditEntry {
            log_id: uuid::Uuid::new_v4().to_string(),
            action: new.action,
            details: new.details.unwrap_or_else(|| serde_json::json!({})),
            level: new.level.unwrap_or_default(),
            timestamp: Utc::now(),
            user_email,
            user_name,
            user_roll_no,
            ip: new.ip,
            user_agent: new.user_agent,
        };

        if let Err(e) = self.write_to_sink(&entry) {
            warn!("audit sink write failed: {}", e);
        }

        self.entries.insert(entry.log_id.clone(), entry.clone());
        Ok(entry)
    }

    /// Entries matching the filter, newest first, truncated to `limit`.
    pub fn query(&self, filter: &AuditFilter) -> Vec<AuditEntry> {
        let action_needle = filter.action.as_ref().map(|a| a.to_lowercase());

        let mut hits: Vec<AuditEntry> = self
            .entries
            .iter()
            .map(|entry| entry.value().clone())
            .filter(|entry| filter.level.is_none_or(|level| entry.level == level))
            .filter(|entry| {
                action_needle
                    .as_ref()
                    .is_none_or(|needle| entry.action.to_lowercase().contains(needle))
            })
            .filter(|entry| filter.start.is_none_or(|start| entry.timestamp >= start))
            .filter(|entry| filter.end.is_none_or(|end| entry.timestamp <= end))
            .collect();

        hits.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        hits.truncate(filter.limit);
        hits
    }

    pub fn get(&self, log_id: &str) -> Result<AuditEntry> {
        self.entries
            .get(log_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| LinkletError::not_found(format!("log '{}' not found", log_id)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn write_to_sink(&self, entry: &AuditEntry) -> Result<()> {
        let line = format!(
            "{} [{}] {} - User: {} - Details: {}\n",
            entry.timestamp.to_rfc3339(),
            entry.level.as_str().to_uppercase(),
            entry.action,
            entry.user_email,
            entry.details
        );
        let file_name = format!("app-{}.log", entry.timestamp.format("%Y-%m-%d"));

        let _guard = self.sink_lock.lock();
        std::fs::create_dir_all(&self.log_dir)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.log_dir.join(file_name))?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}
