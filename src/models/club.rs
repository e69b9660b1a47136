//! Club model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Club {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub logo: Option<String>,
    pub category: String,
    pub member_count: i32,
    pub established_year: Option<i32>,
    pub contact_email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClubRequest {
    pub name: String,
    pub description: String,
    pub logo: Option<String>,
    pub category: Option<String>,
    pub member_count: Option<i32>,
    pub established_year: Option<i32>,
    pub contact_email: String,
}
