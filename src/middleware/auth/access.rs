//! Bearer token verification -> principal resolution -> AuthCtx in extensions.
//!
//! Flow:
//! 1. `Authorization: Bearer <jwt>` is extracted (missing / malformed are distinct kinds)
//! 2. signature + expiry are checked by `TokenService` (invalid / expired are distinct kinds)
//! 3. `sub` is resolved to a live user by `SessionResolver`
//! 4. `AuthCtx` is inserted for the handler; ownership checks happen there

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::AuthError;
use crate::state::AppState;

/// Require authentication on every route of `router`.
///
/// Uses `route_layer`, so unmatched paths still fall through to the 404 fallback.
///
/// ```ignore
/// let protected = Router::new().route("/trips", post(create_trip));
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 `from_fn` cannot use the State extractor, so hand the state over explicitly
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth_ctx = match authenticate(&state, req.headers()).await {
        Ok(ctx) => ctx,
        Err(err) => {
            tracing::warn!(
                kind = err.code(),
                method = %req.method(),
                path = %req.uri().path(),
                "authentication failed"
            );
            return Err(err.into());
        }
    };

    tracing::debug!(
        user_id = %auth_ctx.principal.id,
        expires_at = auth_ctx.expires_at,
        "authenticated"
    );

    // handed to AuthCtxExtractor
    req.extensions_mut().insert(auth_ctx);

    Ok(next.run(req).await)
}

/// Verify the request's bearer token and load its principal.
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<AuthCtx, AuthError> {
    let token = extract_bearer(headers)?;
    let claims = state.tokens.verify(token)?;
    let principal = state.sessions.resolve(&claims).await?;

    Ok(AuthCtx::new(principal, claims.expires_at))
}

/// Pull the token out of `Authorization: Bearer <token>`.
///
/// The header is split on whitespace and the second part is the token.
/// A non-`Bearer` scheme (compared case-insensitively) counts as malformed.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingCredentials)?;

    let value = value
        .to_str()
        .map_err(|_| AuthError::MalformedCredentials)?;

    let mut parts = value.split_whitespace();
    let scheme = parts.next().ok_or(AuthError::MalformedCredentials)?;
    let token = parts.next().ok_or(AuthError::MalformedCredentials)?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::MalformedCredentials);
    }

    Ok(token)
}
