//! HS256 access tokens carrying the account identity.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::session::{UserId, UserProfile};

/// Claims embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

impl AccessClaims {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: UserId(self.sub.clone()),
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}

#[derive(Clone)]
pub struct TokenSigner {
    secret: String,
    ttl_minutes: i64,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("ttl_minutes", &self.ttl_minutes)
            .finish_non_exhaustive()
    }
}

impl TokenSigner {
    pub fn new(secret: impl Into<String>, ttl_minutes: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl_minutes,
        }
    }

    pub fn issue(&self, profile: &UserProfile) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now().timestamp();
        let claims = AccessClaims {
            sub: profile.id.0.clone(),
            email: profile.email.clone(),
            name: profile.name.clone(),
            exp: now + self.ttl_minutes * 60,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        };
        self.encode(&claims)
    }

    pub(crate) fn encode(&self, claims: &AccessClaims) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    /// Checks signature and expiry.
    pub fn verify(&self, token: &str) -> Result<AccessClaims, jsonwebtoken::errors::Error> {
        let data = decode::<AccessClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(data.claims)
    }
}
