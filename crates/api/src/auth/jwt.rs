//! Access and refresh tokens.
//!
//! Access tokens are short-lived HS256 JWTs carrying the user id and role
//! name. Refresh tokens are opaque random strings; the database only ever
//! sees their SHA-256 digest, so a leaked sessions table cannot be replayed.

use askcharlie_core::types::DbId;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Payload of an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: DbId,
    /// Role name at issue time (`"admin"`, `"pastor"`, ...). Role changes
    /// take effect at the next refresh.
    pub role: String,
    /// Issued at, Unix seconds.
    pub iat: i64,
    /// Expiry, Unix seconds.
    pub exp: i64,
}

/// Token lifetimes and the HS256 signing secret.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    /// Read `JWT_SECRET` (required), `JWT_ACCESS_EXPIRY_MINS` (default 15)
    /// and `JWT_REFRESH_EXPIRY_DAYS` (default 7) from the environment.
    ///
    /// # Panics
    ///
    /// Panics when `JWT_SECRET` is missing or empty, or when an expiry
    /// override does not parse. Called once at startup.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        Self {
            secret,
            access_token_expiry_mins: env_i64("JWT_ACCESS_EXPIRY_MINS", 15),
            refresh_token_expiry_days: env_i64("JWT_REFRESH_EXPIRY_DAYS", 7),
        }
    }
}

fn env_i64(var: &str, default: i64) -> i64 {
    match std::env::var(var) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{var} must be a valid integer, got {raw:?}")),
        Err(_) => default,
    }
}

/// Sign an access token for the user.
pub fn issue_access_token(
    user_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let iat = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        iat,
        exp: iat + config.access_token_expiry_mins * 60,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify signature and expiry, returning the claims.
pub fn decode_access_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

/// A freshly minted refresh token: the plaintext goes to the client, the
/// digest goes to the sessions table.
#[derive(Debug)]
pub struct RefreshToken {
    pub plaintext: String,
    pub digest: String,
}

impl RefreshToken {
    /// Generate a new opaque token (two v4 UUIDs as 64 hex chars).
    pub fn issue() -> Self {
        let plaintext = format!(
            "{}{}",
            Uuid::new_v4().simple(),
            Uuid::new_v4().simple()
        );
        let digest = refresh_digest(&plaintext);
        RefreshToken { plaintext, digest }
    }
}

/// SHA-256 hex digest of a refresh token, for storage and lookup.
pub fn refresh_digest(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
