use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity snapshot attached to a link at creation time.
///
/// Captured once from the authenticated session; anonymous creations carry
/// no snapshot at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorIdentity {
    pub email: String,
    pub name: String,
    pub roll_no: String,
    #[serde(rename = "clientID")]
    pub client_id: String,
}

/// A single recorded access to a short link's redirect endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickEvent {
    pub timestamp: DateTime<Utc>,
    /// Referrer, or `"direct"` when the request carried none.
    pub source: String,
    /// Caller address as seen by the server.
    pub location: String,
    pub user_agent: String,
}

/// A registered short link.
///
/// `code`, `target`, `created_at`, `expires_at` and `created_by` are fixed at
/// creation; only `clicks` grows, by appending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortLink {
    pub code: String,
    pub target: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub clicks: Vec<ClickEvent>,
    pub created_by: Option<CreatorIdentity>,
}

impl ShortLink {
    /// Expiry is evaluated lazily on read; expired records stay in the
    /// registry and keep their code reserved.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn link_expiring_at(expires_at: DateTime<Utc>) -> ShortLink {
        ShortLink {
            code: "abc123".to_string(),
            target: "https://example.com".to_string(),
            created_at: Utc::now(),
            expires_at,
            clicks: Vec::new(),
            created_by: None,
        }
    }

    #[test]
    fn test_not_expired_before_deadline() {
        let link = link_expiring_at(Utc::now() + Duration::minutes(30));
        assert!(!link.is_expired());
    }

    #[test]
    fn test_expired_after_deadline() {
        let link = link_expiring_at(Utc::now() - Duration::seconds(1));
        assert!(link.is_expired());
    }

    #[test]
    fn test_expiry_boundary_is_exclusive() {
        let deadline = Utc::now();
        let link = link_expiring_at(deadline);
        // Exactly at the deadline the link still resolves.
        assert!(!link.is_expired_at(deadline));
        assert!(link.is_expired_at(deadline + Duration::milliseconds(1)));
    }

    #[test]
    fn test_click_event_serializes_camel_case() {
        let event = ClickEvent {
            timestamp: Utc::now(),
            source: "direct".to_string(),
            location: "127.0.0.1".to_string(),
            user_agent: "curl/8.0".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"userAgent\""));
        assert!(json.contains("\"direct\""));
    }

    #[test]
    fn test_creator_identity_serializes_client_id() {
        let identity = CreatorIdentity {
            email: "user@example.com".to_string(),
            name: "User".to_string(),
            roll_no: "r42".to_string(),
            client_id: "cid-1".to_string(),
        };
        let json = serde_json::to_string(&identity).unwrap();
        assert!(json.contains("\"clientID\""));
        assert!(json.contains("\"rollNo\""));
    }
}
