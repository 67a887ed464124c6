use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::AuthError;
use crate::state::AppState;

use super::AuthCtx;

/// Extractor for handlers behind the auth middleware.
///
/// The middleware has already inserted `AuthCtx` into request extensions.
/// If it is missing (route not wired through the middleware) we reject as
/// missing credentials rather than run the handler unauthenticated.
pub struct AuthCtxExtractor(pub AuthCtx);

impl FromRequestParts<AppState> for AuthCtxExtractor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthCtx>()
            .cloned()
            .map(AuthCtxExtractor)
            .ok_or(AppError::Auth(AuthError::MissingCredentials))
    }
}
