/*
 * Responsibility
 * - Trip request/response DTOs
 * - `owner` is never taken from the body; it always comes from AuthCtx
 */
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::dto::activities::ActivityResponse;
use crate::api::dto::{check_optional_text, check_text, double_option, normalize_optional};
use crate::repos::trip_repo::{NewTrip, TripChanges, TripRecord, TripRow};

const TITLE_MAX: usize = 120;
const DESTINATION_MAX: usize = 120;
const NOTES_MAX: usize = 2000;

fn check_dates(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<(), String> {
    if let (Some(start), Some(end)) = (start, end)
        && end < start
    {
        return Err("end_date must not be before start_date".to_string());
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct CreateTripRequest {
    pub title: String,
    pub destination: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl CreateTripRequest {
    pub fn validate(&self) -> Result<(), String> {
        check_text(&self.title, "title", TITLE_MAX)?;
        check_text(&self.destination, "destination", DESTINATION_MAX)?;
        check_optional_text(self.notes.as_deref(), "notes", NOTES_MAX)?;
        check_dates(self.start_date, self.end_date)
    }

    pub fn into_new_trip(self) -> NewTrip {
        NewTrip {
            title: self.title.trim().to_string(),
            destination: self.destination.trim().to_string(),
            start_date: self.start_date,
            end_date: self.end_date,
            notes: normalize_optional(self.notes),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTripRequest {
    pub title: Option<String>,
    pub destination: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub start_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub end_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

impl UpdateTripRequest {
    /// Field checks plus date ordering against the merged result.
    pub fn validate(&self, current: &TripRow) -> Result<(), String> {
        if let Some(title) = &self.title {
            check_text(title, "title", TITLE_MAX)?;
        }
        if let Some(destination) = &self.destination {
            check_text(destination, "destination", DESTINATION_MAX)?;
        }
        if let Some(notes) = &self.notes {
            check_optional_text(notes.as_deref(), "notes", NOTES_MAX)?;
        }

        let start = self.start_date.unwrap_or(current.start_date);
        let end = self.end_date.unwrap_or(current.end_date);
        check_dates(start, end)
    }

    pub fn into_changes(self) -> TripChanges {
        TripChanges {
            title: self.title.map(|t| t.trim().to_string()),
            destination: self.destination.map(|d| d.trim().to_string()),
            start_date: self.start_date,
            end_date: self.end_date,
            notes: self.notes.map(normalize_optional),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TripResponse {
    pub id: Uuid,
    pub owner: Uuid,
    pub title: String,
    pub destination: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub activities: Vec<ActivityResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TripRecord> for TripResponse {
    fn from(record: TripRecord) -> Self {
        let TripRecord { trip, activities } = record;
        Self {
            id: trip.id,
            owner: trip.owner_id,
            title: trip.title,
            destination: trip.destination,
            start_date: trip.start_date,
            end_date: trip.end_date,
            notes: trip.notes,
            activities: activities.into_iter().map(ActivityResponse::from).collect(),
            created_at: trip.created_at,
            updated_at: trip.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn current(start: Option<NaiveDate>, end: Option<NaiveDate>) -> TripRow {
        TripRow {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            title: "Lisbon".to_string(),
            destination: "Portugal".to_string(),
            start_date: start,
            end_date: end,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn update_distinguishes_absent_from_null() {
        let req: UpdateTripRequest =
            serde_json::from_value(json!({ "notes": null, "title": "New" })).unwrap();

        assert_eq!(req.title.as_deref(), Some("New"));
        assert_eq!(req.notes, Some(None));
        assert_eq!(req.start_date, None);
        assert_eq!(req.end_date, None);
    }

    #[test]
    fn create_rejects_blank_title_and_reversed_dates() {
        let req: CreateTripRequest = serde_json::from_value(json!({
            "title": "  ",
            "destination": "Portugal",
        }))
        .unwrap();
        assert!(req.validate().is_err());

        let req: CreateTripRequest = serde_json::from_value(json!({
            "title": "Lisbon",
            "destination": "Portugal",
            "start_date": "2026-05-10",
            "end_date": "2026-05-01",
        }))
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn create_ignores_owner_in_body() {
        let req: CreateTripRequest = serde_json::from_value(json!({
            "title": " Lisbon ",
            "destination": "Portugal",
            "owner": Uuid::new_v4(),
            "notes": "   ",
        }))
        .unwrap();
        assert!(req.validate().is_ok());

        let new_trip = req.into_new_trip();
        assert_eq!(new_trip.title, "Lisbon");
        assert_eq!(new_trip.notes, None);
    }

    #[test]
    fn update_checks_dates_against_current_values() {
        let trip = current(Some(date("2026-05-10")), Some(date("2026-05-20")));

        let req = UpdateTripRequest {
            end_date: Some(Some(date("2026-05-01"))),
            ..Default::default()
        };
        assert!(req.validate(&trip).is_err());

        // clearing the start date removes the constraint
        let req = UpdateTripRequest {
            start_date: Some(None),
            end_date: Some(Some(date("2026-05-01"))),
            ..Default::default()
        };
        assert!(req.validate(&trip).is_ok());
    }
}
