//! Event model

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Occupancy fraction above which an event is presented as nearly full.
pub const NEARLY_FULL_PERCENT: f64 = 80.0;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    pub location: String,
    pub club: String,
    pub description: String,
    pub category: String,
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    pub location: String,
    pub club: String,
    pub description: String,
    pub category: Option<String>,
    pub capacity: i32,
}

/// Derived occupancy figures for an event. Never stored; the admitted count
/// is always computed from non-cancelled registrations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EventOccupancy {
    pub admitted_count: i64,
    pub capacity: i32,
}

impl EventOccupancy {
    pub fn new(admitted_count: i64, capacity: i32) -> Self {
        Self {
            admitted_count,
            capacity,
        }
    }

    /// Occupancy as a percentage of capacity
    pub fn percent(&self) -> f64 {
        if self.capacity <= 0 {
            return 100.0;
        }
        self.admitted_count as f64 / self.capacity as f64 * 100.0
    }

    /// Presentation threshold: more than 80% of seats taken
    pub fn is_nearly_full(&self) -> bool {
        self.percent() > NEARLY_FULL_PERCENT
    }

    /// Hard gate: no seats left. Enforced at decision time by the
    /// admission engine, independent of the display thresholds.
    pub fn is_full(&self) -> bool {
        self.admitted_count >= self.capacity as i64
    }
}
