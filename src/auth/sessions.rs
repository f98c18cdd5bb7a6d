/**
 * Session Tokens
 *
 * JWT issue/verify for login sessions. The signing key is explicit
 * configuration: `SessionKeys` is built once at startup from `Config` and
 * shared read-only through `AppState` - nothing in here reads the
 * environment.
 *
 * The claims payload carries the user id only (`sub`), plus the standard
 * `exp`/`iat` pair. Tokens expire after one hour. Verification failures are
 * deliberately uniform: callers cannot distinguish malformed from expired
 * from forged tokens.
 */

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Session lifetime in seconds (1 hour)
pub const SESSION_TTL_SECS: u64 = 60 * 60;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

/// HS256 key pair for session tokens.
///
/// Created once at startup and shared read-only via `AppState`.
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: u64,
}

impl SessionKeys {
    /// Build keys from the configured secret.
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    /// Issue a signed bearer token for a user.
    pub fn issue(&self, user_id: Uuid) -> Result<String, jsonwebtoken::errors::Error> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: now + self.ttl_secs,
            iat: now,
        };

        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Verify a bearer token and extract the user id.
    ///
    /// Any failure (bad signature, expired, malformed, garbage `sub`) comes
    /// back as the same error type; the middleware maps all of them to
    /// `Unauthorized` without distinction.
    pub fn verify(&self, token: &str) -> Result<Uuid, jsonwebtoken::errors::Error> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Uuid::parse_str(&data.claims.sub)
            .map_err(|_| jsonwebtoken::errors::ErrorKind::InvalidToken.into())
    }
}
