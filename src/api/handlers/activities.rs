/*
 * Responsibility
 * - /trips/{trip_id}/activities CRUD handlers
 * - An activity belongs to whoever owns its trip: the trip is loaded and
 *   owner-checked first, the activity looked up second
 */
use axum::{Json, extract::State, http::StatusCode};
use uuid::Uuid;

use crate::{
    api::{
        dto::activities::{ActivityResponse, CreateActivityRequest, UpdateActivityRequest},
        extractors::{ApiJson, ApiPath, AuthCtxExtractor},
    },
    error::AppError,
    repos::trip_repo::TripRecord,
    services::{auth::Principal, ownership::ensure_owner},
    state::AppState,
};

async fn load_trip(state: &AppState, trip_id: Uuid) -> Result<TripRecord, AppError> {
    state
        .trips
        .get_trip(trip_id)
        .await?
        .ok_or(AppError::not_found("trip"))
}

async fn load_owned_trip(
    state: &AppState,
    trip_id: Uuid,
    principal: &Principal,
) -> Result<TripRecord, AppError> {
    let trip = state.trips.get_trip(trip_id).await?;
    Ok(ensure_owner(trip, "trip", principal)?)
}

pub async fn list_activities(
    State(state): State<AppState>,
    ApiPath(trip_id): ApiPath<Uuid>,
) -> Result<Json<Vec<ActivityResponse>>, AppError> {
    let record = load_trip(&state, trip_id).await?;

    Ok(Json(
        record
            .activities
            .into_iter()
            .map(ActivityResponse::from)
            .collect(),
    ))
}

pub async fn create_activity(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    ApiPath(trip_id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<CreateActivityRequest>,
) -> Result<(StatusCode, Json<ActivityResponse>), AppError> {
    load_owned_trip(&state, trip_id, &auth.principal).await?;
    req.validate().map_err(AppError::validation)?;

    let row = state
        .trips
        .create_activity(trip_id, req.into_new_activity())
        .await?;

    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn get_activity(
    State(state): State<AppState>,
    ApiPath((trip_id, activity_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<Json<ActivityResponse>, AppError> {
    let record = load_trip(&state, trip_id).await?;
    let activity = record
        .activity(activity_id)
        .cloned()
        .ok_or(AppError::not_found("activity"))?;

    Ok(Json(activity.into()))
}

pub async fn update_activity(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    ApiPath((trip_id, activity_id)): ApiPath<(Uuid, Uuid)>,
    ApiJson(req): ApiJson<UpdateActivityRequest>,
) -> Result<Json<ActivityResponse>, AppError> {
    let record = load_owned_trip(&state, trip_id, &auth.principal).await?;
    if record.activity(activity_id).is_none() {
        return Err(AppError::not_found("activity"));
    }
    req.validate().map_err(AppError::validation)?;

    let row = state
        .trips
        .update_activity(trip_id, activity_id, req.into_changes())
        .await?
        .ok_or(AppError::not_found("activity"))?;

    Ok(Json(row.into()))
}

pub async fn delete_activity(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    ApiPath((trip_id, activity_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    load_owned_trip(&state, trip_id, &auth.principal).await?;

    if !state.trips.delete_activity(trip_id, activity_id).await? {
        return Err(AppError::not_found("activity"));
    }

    Ok(StatusCode::NO_CONTENT)
}
