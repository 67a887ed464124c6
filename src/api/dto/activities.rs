/*
 * Responsibility
 * - Activity request/response DTOs (nested under a trip)
 */
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::dto::{check_optional_text, check_text, double_option, normalize_optional};
use crate::repos::trip_repo::{ActivityChanges, ActivityRow, NewActivity};

const NAME_MAX: usize = 120;
const LOCATION_MAX: usize = 200;
const NOTES_MAX: usize = 2000;

#[derive(Debug, Deserialize)]
pub struct CreateActivityRequest {
    pub name: String,
    pub date: Option<NaiveDate>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl CreateActivityRequest {
    pub fn validate(&self) -> Result<(), String> {
        check_text(&self.name, "name", NAME_MAX)?;
        check_optional_text(self.location.as_deref(), "location", LOCATION_MAX)?;
        check_optional_text(self.notes.as_deref(), "notes", NOTES_MAX)
    }

    pub fn into_new_activity(self) -> NewActivity {
        NewActivity {
            name: self.name.trim().to_string(),
            date: self.date,
            location: normalize_optional(self.location),
            notes: normalize_optional(self.notes),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateActivityRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

impl UpdateActivityRequest {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name {
            check_text(name, "name", NAME_MAX)?;
        }
        if let Some(location) = &self.location {
            check_optional_text(location.as_deref(), "location", LOCATION_MAX)?;
        }
        if let Some(notes) = &self.notes {
            check_optional_text(notes.as_deref(), "notes", NOTES_MAX)?;
        }
        Ok(())
    }

    pub fn into_changes(self) -> ActivityChanges {
        ActivityChanges {
            name: self.name.map(|n| n.trim().to_string()),
            date: self.date,
            location: self.location.map(normalize_optional),
            notes: self.notes.map(normalize_optional),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ActivityResponse {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub name: String,
    pub date: Option<NaiveDate>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ActivityRow> for ActivityResponse {
    fn from(row: ActivityRow) -> Self {
        Self {
            id: row.id,
            trip_id: row.trip_id,
            name: row.name,
            date: row.date,
            location: row.location,
            notes: row.notes,
            created_at: row.created_at,
        }
    }
}
