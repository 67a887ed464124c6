/*
 * Responsibility
 * - The "authenticated context" type handlers see
 * - The auth middleware verifies the token, resolves the principal and
 *   stores this in request extensions; handlers only receive this type
 *
 * Notes
 * - Token verification / principal lookup live in middleware + services
 */
use crate::services::auth::Principal;

/// Attached to every request that passed the auth middleware.
///
/// `principal` has been loaded from the store during this request, so it is
/// never a dangling id.
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub principal: Principal,
    pub expires_at: i64,
}

impl AuthCtx {
    pub fn new(principal: Principal, expires_at: i64) -> Self {
        Self {
            principal,
            expires_at,
        }
    }
}
