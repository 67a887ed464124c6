//! Resolve verified claims to a live principal.
use std::sync::Arc;

use tracing::error;
use uuid::Uuid;

use crate::repos::user_repo::{UserRow, UserStore};
use crate::services::auth::{error::AuthError, token::VerifiedClaims};

/// The authenticated identity, as seen by handlers.
///
/// Deliberately excludes the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: Uuid,
    pub username: String,
}

impl From<UserRow> for Principal {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
        }
    }
}

#[derive(Clone)]
pub struct SessionResolver {
    users: Arc<dyn UserStore>,
}

impl SessionResolver {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Look the principal up in the store. No retry on store failure.
    pub async fn resolve(&self, claims: &VerifiedClaims) -> Result<Principal, AuthError> {
        let row = self
            .users
            .find_by_id(claims.principal_id)
            .await
            .map_err(|e| {
                error!(user_id = %claims.principal_id, error = %e, "user lookup failed");
                AuthError::UpstreamUnavailable
            })?
            .ok_or(AuthError::PrincipalNotFound)?;

        Ok(row.into())
    }
}
