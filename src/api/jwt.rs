use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::storages::CreatorIdentity;

/// Claims carried by a session token.
///
/// The identity snapshot is embedded so protected handlers never consult the
/// configuration again; `sub` holds the client ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub roll_no: String,
    pub access_code: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

impl SessionClaims {
    /// The identity snapshot attached to records created by this session.
    pub fn identity(&self) -> CreatorIdentity {
        CreatorIdentity {
            email: self.email.clone(),
            name: self.name.clone(),
            roll_no: self.roll_no.clone(),
            client_id: self.sub.clone(),
        }
    }
}

/// JWT service for issuing and validating session tokens (HS256).
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_hours: i64,
}

impl JwtService {
    pub fn new(secret: &str, token_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_hours,
        }
    }

    pub fn from_config() -> Self {
        let config = crate::config::get_config();
        Self::new(&config.auth.jwt_secret, config.auth.token_hours)
    }

    /// Issue a token for the given identity. Returns the encoded token and
    /// the claims it carries (the caller tracks the `jti`).
    pub fn issue(
        &self,
        identity: &CreatorIdentity,
        access_code: &str,
    ) -> Result<(String, SessionClaims), jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: identity.client_id.clone(),
            email: identity.email.clone(),
            name: identity.name.clone(),
            roll_no: identity.roll_no.clone(),
            access_code: access_code.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.token_hours)).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok((token, claims))
    }

    /// Validate a token and return its claims. Expiry is enforced by the
    /// default validation rules.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &Validation::default())?;
        Ok(token_data.claims)
    }
}
