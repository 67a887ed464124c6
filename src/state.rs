/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 *   - stores, token service, session resolver
 * - Clone is cheap (everything inside is Arc)
 */
use std::sync::Arc;

use crate::repos::{TripStore, UserStore};
use crate::services::auth::{SessionResolver, TokenService};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub trips: Arc<dyn TripStore>,
    pub tokens: Arc<TokenService>,
    pub sessions: SessionResolver,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        trips: Arc<dyn TripStore>,
        tokens: Arc<TokenService>,
    ) -> Self {
        let sessions = SessionResolver::new(users.clone());
        Self {
            users,
            trips,
            tokens,
            sessions,
        }
    }
}
