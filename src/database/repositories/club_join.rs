//! Club join repository implementation
//!
//! Club admission records. Membership is uncapped, so the guarded create
//! only needs the conditional insert against the partial unique index over
//! pending/approved (club_id, user_id) pairs.

use sqlx::PgPool;

use crate::models::admission::{ClubJoin, CreateClubJoinRequest};
use crate::utils::errors::ClubMateError;

const CLUB_JOIN_COLUMNS: &str = "id, club_id, club_name, user_id, user_name, user_email, user_phone, user_branch, user_year, joined_at, status";

#[derive(Debug, Clone)]
pub struct ClubJoinRepository {
    pool: PgPool,
}

impl ClubJoinRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a pending join request, enforcing uniqueness atomically
    pub async fn create_admission(
        &self,
        request: CreateClubJoinRequest,
    ) -> Result<ClubJoin, ClubMateError> {
        let join = sqlx::query_as::<_, ClubJoin>(
            r#"
            INSERT INTO club_joins (club_id, club_name, user_id, user_name, user_email, user_phone, user_branch, user_year, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'pending')
            ON CONFLICT (club_id, user_id) WHERE status IN ('pending', 'approved') DO NOTHING
            RETURNING id, club_id, club_name, user_id, user_name, user_email, user_phone, user_branch, user_year, joined_at, status
            "#,
        )
        .bind(request.club_id)
        .bind(request.club_name)
        .bind(&request.user_id)
        .bind(request.user_name)
        .bind(request.user_email)
        .bind(request.user_phone)
        .bind(request.user_branch)
        .bind(request.user_year)
        .fetch_optional(&self.pool)
        .await?;

        join.ok_or(ClubMateError::AlreadyJoined {
            club_id: request.club_id,
            user_id: request.user_id,
        })
    }

    /// Find the pending or approved join for a (club, user) pair
    pub async fn find_active(
        &self,
        club_id: i64,
        user_id: &str,
    ) -> Result<Option<ClubJoin>, ClubMateError> {
        let join = sqlx::query_as::<_, ClubJoin>(&format!(
            "SELECT {CLUB_JOIN_COLUMNS} FROM club_joins WHERE club_id = $1 AND user_id = $2 AND status IN ('pending', 'approved')"
        ))
        .bind(club_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(join)
    }

    /// All joins for a user, newest first
    pub async fn find_by_user(&self, user_id: &str) -> Result<Vec<ClubJoin>, ClubMateError> {
        let joins = sqlx::query_as::<_, ClubJoin>(&format!(
            "SELECT {CLUB_JOIN_COLUMNS} FROM club_joins WHERE user_id = $1 ORDER BY joined_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(joins)
    }

    /// All joins, for operator review
    pub async fn list_all(&self) -> Result<Vec<ClubJoin>, ClubMateError> {
        let joins = sqlx::query_as::<_, ClubJoin>(&format!(
            "SELECT {CLUB_JOIN_COLUMNS} FROM club_joins ORDER BY joined_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(joins)
    }

    /// Update join status (operator transition: approve or reject)
    pub async fn update_status(&self, id: i64, status: &str) -> Result<ClubJoin, ClubMateError> {
        let join = sqlx::query_as::<_, ClubJoin>(&format!(
            "UPDATE club_joins SET status = $2 WHERE id = $1 RETURNING {CLUB_JOIN_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(join)
    }
}
