//! HS256 bearer tokens: issuance (sign-up/sign-in) and verification (middleware).
//!
//! The signing secret is handed in at construction time; nothing here reads
//! the process environment.
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use crate::services::auth::error::AuthError;

/// Wire claims. `sub` is the principal id (UUID string).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Claims after signature/expiry checks, with `sub` promoted to a `Uuid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifiedClaims {
    pub principal_id: Uuid,
    pub issued_at: i64,
    pub expires_at: i64,
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    /// Seconds until expiry.
    pub expires_in: u64,
}

/// Signs and verifies access tokens.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: u64,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenService")
            .field("validation", &self.validation)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl TokenService {
    pub fn new(secret: &str, ttl_seconds: u64, leeway_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_seconds;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_seconds,
        }
    }

    /// Issue a token for `principal_id`, valid for `ttl_seconds` from now.
    pub fn issue(&self, principal_id: Uuid) -> Result<IssuedToken, AuthError> {
        let now = chrono::Utc::now().timestamp();
        let exp = i64::try_from(self.ttl_seconds)
            .ok()
            .and_then(|ttl| now.checked_add(ttl))
            .ok_or_else(|| {
                error!(ttl_seconds = self.ttl_seconds, "token lifetime overflows exp");
                AuthError::UpstreamUnavailable
            })?;
        let claims = TokenClaims {
            sub: principal_id.to_string(),
            iat: now,
            exp,
        };

        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        let token = jsonwebtoken::encode(&header, &claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "failed to sign JWT");
            AuthError::UpstreamUnavailable
        })?;

        Ok(IssuedToken {
            token,
            expires_in: self.ttl_seconds,
        })
    }

    /// Verify signature + expiry and return the principal id carried in `sub`.
    ///
    /// - expired (beyond leeway) => `ExpiredToken`
    /// - anything else wrong with the token => `InvalidToken`
    pub fn verify(&self, token: &str) -> Result<VerifiedClaims, AuthError> {
        let data = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
                _ => AuthError::InvalidToken,
            })?;

        let claims = data.claims;
        let principal_id =
            Uuid::parse_str(claims.sub.trim()).map_err(|_| AuthError::InvalidToken)?;

        Ok(VerifiedClaims {
            principal_id,
            issued_at: claims.iat,
            expires_at: claims.exp,
        })
    }
}
