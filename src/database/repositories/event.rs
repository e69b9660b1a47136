//! Event repository implementation

use sqlx::PgPool;

use crate::models::event::{CreateEventRequest, Event};
use crate::utils::errors::ClubMateError;

const EVENT_COLUMNS: &str = "id, title, event_date, event_time, location, club, description, category, capacity, created_at";

#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event. The id and creation timestamp are assigned by
    /// the database, never the client clock.
    pub async fn create(&self, request: CreateEventRequest) -> Result<Event, ClubMateError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (title, event_date, event_time, location, club, description, category, capacity)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, title, event_date, event_time, location, club, description, category, capacity, created_at
            "#,
        )
        .bind(request.title)
        .bind(request.event_date)
        .bind(request.event_time)
        .bind(request.location)
        .bind(request.club)
        .bind(request.description)
        .bind(request.category.unwrap_or_else(|| "General".to_string()))
        .bind(request.capacity)
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Event>, ClubMateError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// List all events, soonest first
    pub async fn list(&self) -> Result<Vec<Event>, ClubMateError> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events ORDER BY event_date ASC, event_time ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Count total events
    pub async fn count(&self) -> Result<i64, ClubMateError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM events")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
