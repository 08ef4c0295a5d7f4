//! Compact signed bearer tokens carrying the user identity claim.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Payload embedded in every issued token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub username: String,
    pub id: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies tokens with a process-wide symmetric secret (HS256).
/// The secret is read-only after startup; the codec is shared across requests.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenCodec {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            ttl,
        }
    }

    /// Issue a signed token for the given identity, stamped with
    /// issued-at now and an explicit expiry of now + ttl.
    pub fn issue(&self, username: &str, id: &str) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            username: username.to_string(),
            id: id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::internal("token_encode", e.to_string()))
    }

    /// Verify signature, structure, and expiry. Any failure collapses to a
    /// single authentication error; the underlying cause is only logged.
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(target: "auth", "token verification failed: {}", e);
                AppError::auth("invalid_token", "invalid authentication token")
            })
    }
}
