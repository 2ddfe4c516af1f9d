//! Authentication service
//!
//! Validates login attempts against the single configured identity and
//! issues JWT session tokens. Revocation is a single in-memory set of
//! active token IDs; logout removes the entry and the token stops
//! authenticating.

use chrono::{DateTime, TimeZone, Utc};
use dashmap::DashMap;
use tracing::{info, warn};

use crate::api::jwt::{JwtService, SessionClaims};
use crate::config::IdentityConfig;
use crate::errors::{LinkletError, Result};
use crate::storages::CreatorIdentity;

/// Bookkeeping for an issued token, keyed by `jti`.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Successful login outcome, mapped to the token response at the boundary.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub access_token: String,
    /// Unix timestamp at which the token expires.
    pub expires_at: i64,
    pub user: CreatorIdentity,
}

pub struct AuthService {
    jwt: JwtService,
    identity: IdentityConfig,
    sessions: DashMap<String, SessionInfo>,
}

fn ct_eq(a: &str, b: &str) -> bool {
    use subtle::ConstantTimeEq;
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

impl AuthService {
    pub fn new(identity: IdentityConfig, jwt: JwtService) -> Self {
        Self {
            jwt,
            identity,
            sessions: DashMap::new(),
        }
    }

    pub fn from_config() -> Self {
        let config = crate::config::get_config();
        Self::new(config.identity.clone(), JwtService::from_config())
    }

    /// Whether login is possible at all; an empty access code disables it.
    pub fn is_configured(&self) -> bool {
        !self.identity.access_code.is_empty()
    }

    /// Validate credentials against the configured identity and issue a
    /// session token. Field comparisons are constant-time.
    pub fn login(&self, email: &str, roll_no: &str, access_code: &str) -> Result<LoginOutcome> {
        if !self.is_configured() {
            warn!("login attempt while authentication is not configured");
            return Err(LinkletError::unauthorized(
                "authentication is not configured",
            ));
        }

        let matches = ct_eq(email, &self.identity.email)
            & ct_eq(roll_no, &self.identity.roll_no)
            & ct_eq(access_code, &self.identity.access_code);
        if !matches {
            info!("login failed for '{}'", email);
            return Err(LinkletError::unauthorized("invalid credentials"));
        }

        let user = CreatorIdentity {
            email: self.identity.email.clone(),
            name: self.identity.name.clone(),
            roll_no: self.identity.roll_no.clone(),
            client_id: self.identity.client_id.clone(),
        };

        let (access_token, claims) = self
            .jwt
            .issue(&user, &self.identity.access_code)
            .map_err(|e| LinkletError::unauthorized(format!("failed to issue token: {}", e)))?;

        self.sessions.insert(
            claims.jti.clone(),
            SessionInfo {
                issued_at: Utc.timestamp_opt(claims.iat, 0).single().unwrap_or_else(Utc::now),
                expires_at: Utc.timestamp_opt(claims.exp, 0).single().unwrap_or_else(Utc::now),
            },
        );

        info!("login successful for '{}'", user.email);
        Ok(LoginOutcome {
            access_token,
            expires_at: claims.exp,
            user,
        })
    }

    /// Validate a bearer token and return its claims. Tokens issued before a
    /// logout (revoked `jti`) no longer authenticate.
    pub fn authenticate(&self, token: &str) -> Result<SessionClaims> {
        let claims = self
            .jwt
            .verify(token)
            .map_err(|e| LinkletError::unauthorized(format!("invalid or expired token: {}", e)))?;

        if !self.sessions.contains_key(&claims.jti) {
            return Err(LinkletError::unauthorized("session revoked or unknown"));
        }

        Ok(claims)
    }

    /// Drop the session for a token. Unknown or already-revoked tokens are a
    /// no-op so logout stays idempotent.
    pub fn logout(&self, token: &str) {
        if let Ok(claims) = self.jwt.verify(token) {
            self.sessions.remove(&claims.jti);
            info!("session '{}' logged out", claims.jti);
        }
    }

    /// Gate for endpoints that additionally require the configured access
    /// code (the audit log surface).
    pub fn verify_access_code(&self, claims: &SessionClaims) -> Result<()> {
        if ct_eq(&claims.access_code, &self.identity.access_code) {
            Ok(())
        } else {
            Err(LinkletError::forbidden("access denied: invalid access code"))
        }
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }
}
