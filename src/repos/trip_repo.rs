/*
 * Responsibility
 * - trips / activities CRUD via SQLx
 * - activities hang off trips (FK ON DELETE CASCADE), so deleting a trip removes them
 * - A trip is always returned together with its activities (TripRecord)
 */
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoResult;
use crate::services::ownership::Owned;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TripRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub destination: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ActivityRow {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub name: String,
    pub date: Option<NaiveDate>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub trip: TripRow,
    pub activities: Vec<ActivityRow>,
}

impl TripRecord {
    pub fn activity(&self, activity_id: Uuid) -> Option<&ActivityRow> {
        self.activities.iter().find(|a| a.id == activity_id)
    }
}

impl Owned for TripRecord {
    fn owner_id(&self) -> Uuid {
        self.trip.owner_id
    }
}

#[derive(Debug, Clone)]
pub struct NewTrip {
    pub title: String,
    pub destination: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

// Tri-state for nullable columns:
// - None: do not update
// - Some(None): set NULL
// - Some(Some(v)): set v
#[derive(Debug, Clone, Default)]
pub struct TripChanges {
    pub title: Option<String>,
    pub destination: Option<String>,
    pub start_date: Option<Option<NaiveDate>>,
    pub end_date: Option<Option<NaiveDate>>,
    pub notes: Option<Option<String>>,
}

#[derive(Debug, Clone)]
pub struct NewActivity {
    pub name: String,
    pub date: Option<NaiveDate>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ActivityChanges {
    pub name: Option<String>,
    pub date: Option<Option<NaiveDate>>,
    pub location: Option<Option<String>>,
    pub notes: Option<Option<String>>,
}

/// Trip persistence. Ownership is *not* checked here; callers run
/// `services::ownership::ensure_owner` before any mutation.
#[async_trait]
pub trait TripStore: Send + Sync + 'static {
    /// All trips, newest first.
    async fn list_trips(&self) -> RepoResult<Vec<TripRecord>>;

    async fn create_trip(&self, owner_id: Uuid, trip: NewTrip) -> RepoResult<TripRecord>;

    async fn get_trip(&self, trip_id: Uuid) -> RepoResult<Option<TripRecord>>;

    async fn update_trip(
        &self,
        trip_id: Uuid,
        changes: TripChanges,
    ) -> RepoResult<Option<TripRecord>>;

    async fn delete_trip(&self, trip_id: Uuid) -> RepoResult<bool>;

    async fn create_activity(
        &self,
        trip_id: Uuid,
        activity: NewActivity,
    ) -> RepoResult<ActivityRow>;

    async fn update_activity(
        &self,
        trip_id: Uuid,
        activity_id: Uuid,
        changes: ActivityChanges,
    ) -> RepoResult<Option<ActivityRow>>;

    async fn delete_activity(&self, trip_id: Uuid, activity_id: Uuid) -> RepoResult<bool>;
}

#[derive(Clone, Debug)]
pub struct PgTripRepo {
    pool: PgPool,
}

impl PgTripRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn activities_for(&self, trip_id: Uuid) -> RepoResult<Vec<ActivityRow>> {
        let rows = sqlx::query_as::<_, ActivityRow>(
            r#"
            SELECT id, trip_id, name, date, location, notes, created_at
            FROM activities
            WHERE trip_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

#[async_trait]
impl TripStore for PgTripRepo {
    async fn list_trips(&self) -> RepoResult<Vec<TripRecord>> {
        let trips = sqlx::query_as::<_, TripRow>(
            r#"
            SELECT id, owner_id, title, destination, start_date, end_date, notes,
                   created_at, updated_at
            FROM trips
            ORDER BY created_at DESC, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<Uuid> = trips.iter().map(|t| t.id).collect();
        let activities = sqlx::query_as::<_, ActivityRow>(
            r#"
            SELECT id, trip_id, name, date, location, notes, created_at
            FROM activities
            WHERE trip_id = ANY($1)
            ORDER BY created_at, id
            "#,
        )
        .bind(ids.as_slice())
        .fetch_all(&self.pool)
        .await?;

        let mut by_trip: HashMap<Uuid, Vec<ActivityRow>> = HashMap::new();
        for activity in activities {
            by_trip.entry(activity.trip_id).or_default().push(activity);
        }

        Ok(trips
            .into_iter()
            .map(|trip| {
                let activities = by_trip.remove(&trip.id).unwrap_or_default();
                TripRecord { trip, activities }
            })
            .collect())
    }

    async fn create_trip(&self, owner_id: Uuid, trip: NewTrip) -> RepoResult<TripRecord> {
        let row = sqlx::query_as::<_, TripRow>(
            r#"
            INSERT INTO trips (id, owner_id, title, destination, start_date, end_date, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, owner_id, title, destination, start_date, end_date, notes,
                      created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(&trip.title)
        .bind(&trip.destination)
        .bind(trip.start_date)
        .bind(trip.end_date)
        .bind(&trip.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(TripRecord {
            trip: row,
            activities: Vec::new(),
        })
    }

    async fn get_trip(&self, trip_id: Uuid) -> RepoResult<Option<TripRecord>> {
        let row = sqlx::query_as::<_, TripRow>(
            r#"
            SELECT id, owner_id, title, destination, start_date, end_date, notes,
                   created_at, updated_at
            FROM trips
            WHERE id = $1
            "#,
        )
        .bind(trip_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(trip) = row else {
            return Ok(None);
        };
        let activities = self.activities_for(trip.id).await?;

        Ok(Some(TripRecord { trip, activities }))
    }

    async fn update_trip(
        &self,
        trip_id: Uuid,
        changes: TripChanges,
    ) -> RepoResult<Option<TripRecord>> {
        let row = sqlx::query_as::<_, TripRow>(
            r#"
            UPDATE trips
            SET
                title = COALESCE($2, title),
                destination = COALESCE($3, destination),
                start_date = CASE WHEN $4 = false THEN start_date ELSE $5 END,
                end_date = CASE WHEN $6 = false THEN end_date ELSE $7 END,
                notes = CASE WHEN $8 = false THEN notes ELSE $9 END,
                updated_at = now()
            WHERE id = $1
            RETURNING id, owner_id, title, destination, start_date, end_date, notes,
                      created_at, updated_at
            "#,
        )
        .bind(trip_id)
        .bind(changes.title.as_deref())
        .bind(changes.destination.as_deref())
        .bind(changes.start_date.is_some()) // $4: flag to set start_date
        .bind(changes.start_date.flatten())
        .bind(changes.end_date.is_some())
        .bind(changes.end_date.flatten())
        .bind(changes.notes.is_some())
        .bind(changes.notes.flatten())
        .fetch_optional(&self.pool)
        .await?;

        let Some(trip) = row else {
            return Ok(None);
        };
        let activities = self.activities_for(trip.id).await?;

        Ok(Some(TripRecord { trip, activities }))
    }

    async fn delete_trip(&self, trip_id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM trips
            WHERE id = $1
            "#,
        )
        .bind(trip_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn create_activity(
        &self,
        trip_id: Uuid,
        activity: NewActivity,
    ) -> RepoResult<ActivityRow> {
        let row = sqlx::query_as::<_, ActivityRow>(
            r#"
            INSERT INTO activities (id, trip_id, name, date, location, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, trip_id, name, date, location, notes, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(trip_id)
        .bind(&activity.name)
        .bind(activity.date)
        .bind(&activity.location)
        .bind(&activity.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update_activity(
        &self,
        trip_id: Uuid,
        activity_id: Uuid,
        changes: ActivityChanges,
    ) -> RepoResult<Option<ActivityRow>> {
        let row = sqlx::query_as::<_, ActivityRow>(
            r#"
            UPDATE activities
            SET
                name = COALESCE($3, name),
                date = CASE WHEN $4 = false THEN date ELSE $5 END,
                location = CASE WHEN $6 = false THEN location ELSE $7 END,
                notes = CASE WHEN $8 = false THEN notes ELSE $9 END
            WHERE id = $1 AND trip_id = $2
            RETURNING id, trip_id, name, date, location, notes, created_at
            "#,
        )
        .bind(activity_id)
        .bind(trip_id)
        .bind(changes.name.as_deref())
        .bind(changes.date.is_some())
        .bind(changes.date.flatten())
        .bind(changes.location.is_some())
        .bind(changes.location.flatten())
        .bind(changes.notes.is_some())
        .bind(changes.notes.flatten())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete_activity(&self, trip_id: Uuid, activity_id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM activities
            WHERE id = $1 AND trip_id = $2
            "#,
        )
        .bind(activity_id)
        .bind(trip_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
