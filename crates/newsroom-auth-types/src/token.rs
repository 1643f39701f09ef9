//! HS256 session tokens.

use std::time::{SystemTime, UNIX_EPOCH};

#[cfg(any(feature = "issuer", test))]
use jsonwebtoken::{EncodingKey, Header, encode};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;
#[cfg(any(feature = "issuer", test))]
use serde::Serialize;
use uuid::Uuid;

/// Session lifetime in seconds (72 hours).
pub const SESSION_TTL_SECS: u64 = 72 * 60 * 60;

/// Errors returned by [`SessionIssuer`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Bad structure, bad signature, wrong algorithm or unparseable subject.
    #[error("malformed token")]
    Malformed,
    #[error("token expired")]
    Expired,
    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// JWT claims payload.
///
/// | Field | Meaning |
/// |-------|---------|
/// | `sub` | user id (UUID string) |
/// | `iat` | issued-at, seconds since epoch |
/// | `exp` | expiry, `iat + SESSION_TTL_SECS` |
///
/// [`Deserialize`] is always available. [`Serialize`] requires the **`issuer`** feature.
#[derive(Debug, Deserialize)]
#[cfg_attr(any(feature = "issuer", test), derive(Serialize))]
pub struct SessionClaims {
    pub sub: String,
    pub iat: u64,
    pub exp: u64,
}

/// A freshly minted session token.
#[cfg(any(feature = "issuer", test))]
#[derive(Debug, Clone)]
pub struct SessionToken {
    pub token: String,
    pub issued_at: u64,
    pub expires_at: u64,
}

/// Mints and validates session tokens with a process-wide secret.
///
/// Built once at startup from configuration and shared through application state.
/// The secret is never rotated at runtime.
#[derive(Clone)]
pub struct SessionIssuer {
    #[cfg(any(feature = "issuer", test))]
    encoding: EncodingKey,
    decoding: DecodingKey,
}

pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

impl SessionIssuer {
    pub fn new(secret: &str) -> Self {
        Self {
            #[cfg(any(feature = "issuer", test))]
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Verify signature, algorithm and expiry; return the user id from `sub`.
    ///
    /// Only HS256 is accepted. A token whose header names any other algorithm is
    /// rejected as [`AuthError::Malformed`] before the signature is checked.
    pub fn validate(&self, token: &str) -> Result<Uuid, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.required_spec_claims.clear();
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<SessionClaims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::Malformed,
            }
        })?;

        data.claims
            .sub
            .parse::<Uuid>()
            .map_err(|_| AuthError::Malformed)
    }
}

#[cfg(any(feature = "issuer", test))]
impl SessionIssuer {
    /// Mint a session for `user_id`, issued now.
    pub fn mint(&self, user_id: Uuid) -> Result<SessionToken, AuthError> {
        self.mint_at(user_id, now_secs())
    }

    /// Mint a session with an explicit issue time (seconds since epoch).
    pub fn mint_at(&self, user_id: Uuid, issued_at: u64) -> Result<SessionToken, AuthError> {
        let claims = SessionClaims {
            sub: user_id.to_string(),
            iat: issued_at,
            exp: issued_at + SESSION_TTL_SECS,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))?;
        Ok(SessionToken {
            token,
            issued_at: claims.iat,
            expires_at: claims.exp,
        })
    }
}
