/*
 * Responsibility
 * - request/response DTOs for /auth, /trips, /trips/{id}/activities
 * - validate() per request type (shape checks only, no store access)
 */
pub mod activities;
pub mod auth;
pub mod trips;

use serde::{Deserialize, Deserializer};

/// Distinguish "field absent" from "field: null" in update bodies.
///
/// Use with `#[serde(default, deserialize_with = "double_option")]`:
/// - absent => `None` (keep)
/// - null => `Some(None)` (clear)
/// - value => `Some(Some(v))` (set)
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Trim, then reject blank or over-long values.
pub(crate) fn check_text(
    value: &str,
    field: &'static str,
    max_chars: usize,
) -> Result<(), String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{field} is required"));
    }
    if trimmed.chars().count() > max_chars {
        return Err(format!("{field} must be <= {max_chars} chars"));
    }
    Ok(())
}

pub(crate) fn check_optional_text(
    value: Option<&str>,
    field: &'static str,
    max_chars: usize,
) -> Result<(), String> {
    if let Some(v) = value
        && v.chars().count() > max_chars
    {
        return Err(format!("{field} must be <= {max_chars} chars"));
    }
    Ok(())
}

/// Empty or whitespace-only optional text is stored as NULL.
pub(crate) fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
