/*
 * Responsibility
 * - POST /auth/sign-up, POST /auth/sign-in
 * - Password hashing runs on the blocking pool (Argon2 is CPU bound)
 * - Unknown user and wrong password share one response
 */
use axum::{Json, extract::State, http::StatusCode};
use tracing::info;

use crate::{
    api::{
        dto::auth::{AuthResponse, SignInRequest, SignUpRequest},
        extractors::ApiJson,
    },
    error::AppError,
    repos::RepoError,
    services::auth::{
        Principal,
        password::{hash_password, verify_against_dummy, verify_password},
    },
    state::AppState,
};

fn auth_response(state: &AppState, principal: Principal) -> Result<AuthResponse, AppError> {
    let issued = state.tokens.issue(principal.id)?;
    Ok(AuthResponse {
        token: issued.token,
        token_type: "Bearer",
        expires_in: issued.expires_in,
        user: principal.into(),
    })
}

pub async fn sign_up(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SignUpRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    req.validate().map_err(AppError::validation)?;

    let username = req.username.trim().to_string();
    let password = req.password;
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|_| AppError::Internal)??;

    let row = state
        .users
        .create(&username, &password_hash)
        .await
        .map_err(|e| match e {
            RepoError::Conflict => AppError::conflict("USERNAME_TAKEN", "username already taken"),
            other => other.into(),
        })?;

    info!(user_id = %row.id, "user signed up");

    let res = auth_response(&state, row.into())?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn sign_in(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SignInRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    req.validate().map_err(AppError::validation)?;

    let row = state.users.find_by_username(req.username.trim()).await?;

    // An unknown user still pays one Argon2 verification
    let stored_hash = row.as_ref().map(|r| r.password_hash.clone());
    let password = req.password;
    let matches = tokio::task::spawn_blocking(move || match stored_hash {
        Some(hash) => verify_password(&hash, &password),
        None => verify_against_dummy(&password),
    })
    .await
    .map_err(|_| AppError::Internal)?;

    let row = match row {
        Some(row) if matches => row,
        _ => return Err(AppError::InvalidCredentials),
    };

    Ok(Json(auth_response(&state, row.into())?))
}
