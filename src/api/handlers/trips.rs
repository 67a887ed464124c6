/*
 * Responsibility
 * - /trips CRUD handlers
 * - Mutations go through ownership::ensure_owner before touching the store
 */
use axum::{Json, extract::State, http::StatusCode};
use tracing::info;
use uuid::Uuid;

use crate::{
    api::{
        dto::trips::{CreateTripRequest, TripResponse, UpdateTripRequest},
        extractors::{ApiJson, ApiPath, AuthCtxExtractor},
    },
    error::AppError,
    services::ownership::ensure_owner,
    state::AppState,
};

pub async fn list_trips(State(state): State<AppState>) -> Result<Json<Vec<TripResponse>>, AppError> {
    let records = state.trips.list_trips().await?;

    Ok(Json(records.into_iter().map(TripResponse::from).collect()))
}

pub async fn create_trip(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    ApiJson(req): ApiJson<CreateTripRequest>,
) -> Result<(StatusCode, Json<TripResponse>), AppError> {
    req.validate().map_err(AppError::validation)?;

    let record = state
        .trips
        .create_trip(auth.principal.id, req.into_new_trip())
        .await?;

    info!(trip_id = %record.trip.id, user_id = %auth.principal.id, "trip created");

    Ok((StatusCode::CREATED, Json(record.into())))
}

pub async fn get_trip(
    State(state): State<AppState>,
    ApiPath(trip_id): ApiPath<Uuid>,
) -> Result<Json<TripResponse>, AppError> {
    let record = state
        .trips
        .get_trip(trip_id)
        .await?
        .ok_or(AppError::not_found("trip"))?;

    Ok(Json(record.into()))
}

pub async fn update_trip(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    ApiPath(trip_id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<UpdateTripRequest>,
) -> Result<Json<TripResponse>, AppError> {
    let current = ensure_owner(
        state.trips.get_trip(trip_id).await?,
        "trip",
        &auth.principal,
    )?;
    req.validate(&current.trip).map_err(AppError::validation)?;

    // Deleted between the check and the update => plain 404
    let record = state
        .trips
        .update_trip(trip_id, req.into_changes())
        .await?
        .ok_or(AppError::not_found("trip"))?;

    Ok(Json(record.into()))
}

pub async fn delete_trip(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    ApiPath(trip_id): ApiPath<Uuid>,
) -> Result<StatusCode, AppError> {
    ensure_owner(
        state.trips.get_trip(trip_id).await?,
        "trip",
        &auth.principal,
    )?;

    if !state.trips.delete_trip(trip_id).await? {
        return Err(AppError::not_found("trip"));
    }

    info!(trip_id = %trip_id, user_id = %auth.principal.id, "trip deleted");

    Ok(StatusCode::NO_CONTENT)
}
