/*
 * Responsibility
 * - /auth/sign-up and /auth/sign-in request/response DTOs
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::auth::Principal;

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 32;
const PASSWORD_MIN: usize = 8;
const PASSWORD_MAX: usize = 128;

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub username: String,
    pub password: String,
}

impl SignUpRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        let username = self.username.trim();
        let len = username.chars().count();
        if len < USERNAME_MIN || len > USERNAME_MAX {
            return Err("username must be 3-32 chars");
        }
        if username.chars().any(char::is_whitespace) {
            return Err("username cannot contain whitespace");
        }
        let len = self.password.chars().count();
        if len < PASSWORD_MIN || len > PASSWORD_MAX {
            return Err("password must be 8-128 chars");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

impl SignInRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.username.trim().is_empty() {
            return Err("username is required");
        }
        if self.password.is_empty() {
            return Err("password is required");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
}

impl From<Principal> for UserResponse {
    fn from(p: Principal) -> Self {
        Self {
            id: p.id,
            username: p.username,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    /// Always "Bearer"
    pub token_type: &'static str,
    /// Seconds until expiry.
    pub expires_in: u64,
    pub user: UserResponse,
}
