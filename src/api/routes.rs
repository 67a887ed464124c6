/*
 * Responsibility
 * - URL structure of the API
 * - Which routes require a bearer token is decided here (public vs protected)
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::handlers::{
    activities::{create_activity, delete_activity, get_activity, list_activities, update_activity},
    auth::{sign_in, sign_up},
    health::health,
    trips::{create_trip, delete_trip, get_trip, list_trips, update_trip},
};
use crate::middleware::auth::access;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/health", get(health))
        .route("/auth/sign-up", post(sign_up))
        .route("/auth/sign-in", post(sign_in))
        .route("/trips", get(list_trips))
        .route("/trips/{trip_id}/activities", get(list_activities));

    let protected = Router::new()
        .route("/trips", post(create_trip))
        .route(
            "/trips/{trip_id}",
            get(get_trip).put(update_trip).delete(delete_trip),
        )
        .route("/trips/{trip_id}/activities", post(create_activity))
        .route(
            "/trips/{trip_id}/activities/{activity_id}",
            get(get_activity).put(update_activity).delete(delete_activity),
        );

    public.merge(access::apply(protected, state))
}
