//! In-memory stores for tests (same contracts as the Postgres repos).
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::trip_repo::{
    ActivityChanges, ActivityRow, NewActivity, NewTrip, TripChanges, TripRecord, TripRow,
    TripStore,
};
use crate::repos::user_repo::{UserRow, UserStore};

#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, UserRow>>,
}

impl MemoryUserStore {
    pub async fn remove(&self, id: Uuid) {
        self.users.write().await.remove(&id);
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, username: &str, password_hash: &str) -> RepoResult<UserRow> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.username == username) {
            return Err(RepoError::Conflict);
        }

        let row = UserRow {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        users.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<UserRow>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<UserRow>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}

/// Every call fails as if the database were unreachable.
#[derive(Debug, Default)]
pub struct FailingUserStore;

#[async_trait]
impl UserStore for FailingUserStore {
    async fn create(&self, _username: &str, _password_hash: &str) -> RepoResult<UserRow> {
        Err(RepoError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn find_by_id(&self, _id: Uuid) -> RepoResult<Option<UserRow>> {
        Err(RepoError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn find_by_username(&self, _username: &str) -> RepoResult<Option<UserRow>> {
        Err(RepoError::Db(sqlx::Error::PoolTimedOut))
    }
}

#[derive(Debug, Default)]
pub struct MemoryTripStore {
    // insertion order kept so "newest first" is just a reverse
    trips: RwLock<Vec<TripRecord>>,
}

#[async_trait]
impl TripStore for MemoryTripStore {
    async fn list_trips(&self) -> RepoResult<Vec<TripRecord>> {
        Ok(self.trips.read().await.iter().rev().cloned().collect())
    }

    async fn create_trip(&self, owner_id: Uuid, trip: NewTrip) -> RepoResult<TripRecord> {
        let now = Utc::now();
        let record = TripRecord {
            trip: TripRow {
                id: Uuid::new_v4(),
                owner_id,
                title: trip.title,
                destination: trip.destination,
                start_date: trip.start_date,
                end_date: trip.end_date,
                notes: trip.notes,
                created_at: now,
                updated_at: now,
            },
            activities: Vec::new(),
        };
        self.trips.write().await.push(record.clone());
        Ok(record)
    }

    async fn get_trip(&self, trip_id: Uuid) -> RepoResult<Option<TripRecord>> {
        Ok(self
            .trips
            .read()
            .await
            .iter()
            .find(|r| r.trip.id == trip_id)
            .cloned())
    }

    async fn update_trip(
        &self,
        trip_id: Uuid,
        changes: TripChanges,
    ) -> RepoResult<Option<TripRecord>> {
        let mut trips = self.trips.write().await;
        let Some(record) = trips.iter_mut().find(|r| r.trip.id == trip_id) else {
            return Ok(None);
        };

        let trip = &mut record.trip;
        if let Some(title) = changes.title {
            trip.title = title;
        }
        if let Some(destination) = changes.destination {
            trip.destination = destination;
        }
        if let Some(start_date) = changes.start_date {
            trip.start_date = start_date;
        }
        if let Some(end_date) = changes.end_date {
            trip.end_date = end_date;
        }
        if let Some(notes) = changes.notes {
            trip.notes = notes;
        }
        trip.updated_at = Utc::now();

        Ok(Some(record.clone()))
    }

    async fn delete_trip(&self, trip_id: Uuid) -> RepoResult<bool> {
        let mut trips = self.trips.write().await;
        let before = trips.len();
        trips.retain(|r| r.trip.id != trip_id);
        Ok(trips.len() != before)
    }

    async fn create_activity(
        &self,
        trip_id: Uuid,
        activity: NewActivity,
    ) -> RepoResult<ActivityRow> {
        let mut trips = self.trips.write().await;
        // Postgres would reject the FK; surface the same class of failure.
        let record = trips
            .iter_mut()
            .find(|r| r.trip.id == trip_id)
            .ok_or(RepoError::Db(sqlx::Error::RowNotFound))?;

        let row = ActivityRow {
            id: Uuid::new_v4(),
            trip_id,
            name: activity.name,
            date: activity.date,
            location: activity.location,
            notes: activity.notes,
            created_at: Utc::now(),
        };
        record.activities.push(row.clone());
        Ok(row)
    }

    async fn update_activity(
        &self,
        trip_id: Uuid,
        activity_id: Uuid,
        changes: ActivityChanges,
    ) -> RepoResult<Option<ActivityRow>> {
        let mut trips = self.trips.write().await;
        let Some(activity) = trips
            .iter_mut()
            .find(|r| r.trip.id == trip_id)
            .and_then(|r| r.activities.iter_mut().find(|a| a.id == activity_id))
        else {
            return Ok(None);
        };

        if let Some(name) = changes.name {
            activity.name = name;
        }
        if let Some(date) = changes.date {
            activity.date = date;
        }
        if let Some(location) = changes.location {
            activity.location = location;
        }
        if let Some(notes) = changes.notes {
            activity.notes = notes;
        }

        Ok(Some(activity.clone()))
    }

    async fn delete_activity(&self, trip_id: Uuid, activity_id: Uuid) -> RepoResult<bool> {
        let mut trips = self.trips.write().await;
        let Some(record) = trips.iter_mut().find(|r| r.trip.id == trip_id) else {
            return Ok(false);
        };
        let before = record.activities.len();
        record.activities.retain(|a| a.id != activity_id);
        Ok(record.activities.len() != before)
    }
}

/// Every call fails as if the database were unreachable.
#[derive(Debug, Default)]
pub struct FailingTripStore;

fn unreachable_db<T>() -> RepoResult<T> {
    Err(RepoError::Db(sqlx::Error::PoolTimedOut))
}

#[async_trait]
impl TripStore for FailingTripStore {
    async fn list_trips(&self) -> RepoResult<Vec<TripRecord>> {
        unreachable_db()
    }

    async fn create_trip(&self, _owner_id: Uuid, _trip: NewTrip) -> RepoResult<TripRecord> {
        unreachable_db()
    }

    async fn get_trip(&self, _trip_id: Uuid) -> RepoResult<Option<TripRecord>> {
        unreachable_db()
    }

    async fn update_trip(
        &self,
        _trip_id: Uuid,
        _changes: TripChanges,
    ) -> RepoResult<Option<TripRecord>> {
        unreachable_db()
    }

    async fn delete_trip(&self, _trip_id: Uuid) -> RepoResult<bool> {
        unreachable_db()
    }

    async fn create_activity(
        &self,
        _trip_id: Uuid,
        _activity: NewActivity,
    ) -> RepoResult<ActivityRow> {
        unreachable_db()
    }

    async fn update_activity(
        &self,
        _trip_id: Uuid,
        _activity_id: Uuid,
        _changes: ActivityChanges,
    ) -> RepoResult<Option<ActivityRow>> {
        unreachable_db()
    }

    async fn delete_activity(&self, _trip_id: Uuid, _activity_id: Uuid) -> RepoResult<bool> {
        unreachable_db()
    }
}
