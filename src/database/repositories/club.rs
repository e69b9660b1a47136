//! Club repository implementation

use sqlx::PgPool;

use crate::models::club::{Club, CreateClubRequest};
use crate::utils::errors::ClubMateError;

const CLUB_COLUMNS: &str = "id, name, description, logo, category, member_count, established_year, contact_email, created_at";

#[derive(Debug, Clone)]
pub struct ClubRepository {
    pool: PgPool,
}

impl ClubRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new club
    pub async fn create(&self, request: CreateClubRequest) -> Result<Club, ClubMateError> {
        let club = sqlx::query_as::<_, Club>(
            r#"
            INSERT INTO clubs (name, description, logo, category, member_count, established_year, contact_email)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, description, logo, category, member_count, established_year, contact_email, created_at
            "#,
        )
        .bind(request.name)
        .bind(request.description)
        .bind(request.logo)
        .bind(request.category.unwrap_or_else(|| "General".to_string()))
        .bind(request.member_count.unwrap_or(0))
        .bind(request.established_year)
        .bind(request.contact_email)
        .fetch_one(&self.pool)
        .await?;

        Ok(club)
    }

    /// Find club by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Club>, ClubMateError> {
        let club = sqlx::query_as::<_, Club>(&format!(
            "SELECT {CLUB_COLUMNS} FROM clubs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(club)
    }

    /// List all clubs, alphabetically
    pub async fn list(&self) -> Result<Vec<Club>, ClubMateError> {
        let clubs = sqlx::query_as::<_, Club>(&format!(
            "SELECT {CLUB_COLUMNS} FROM clubs ORDER BY name ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(clubs)
    }

    /// Count total clubs
    pub async fn count(&self) -> Result<i64, ClubMateError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM clubs")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
