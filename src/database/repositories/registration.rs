//! Registration repository implementation
//!
//! Event admission records. The guarded create runs the capacity check and
//! the duplicate check in a single transaction keyed on the event row, so
//! two concurrent attempts can never both succeed.

use sqlx::PgPool;

use crate::models::admission::{CreateRegistrationRequest, Registration};
use crate::utils::errors::ClubMateError;

const REGISTRATION_COLUMNS: &str = "id, event_id, user_id, user_name, user_email, user_phone, user_branch, user_year, registered_at, status";

#[derive(Debug, Clone)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a confirmed registration, enforcing capacity and uniqueness
    /// atomically.
    ///
    /// The event row is locked for the duration of the transaction; the
    /// admitted count is taken under that lock and the insert relies on the
    /// partial unique index over non-cancelled (event_id, user_id) pairs.
    pub async fn create_admission(
        &self,
        request: CreateRegistrationRequest,
    ) -> Result<Registration, ClubMateError> {
        let mut tx = self.pool.begin().await?;

        let capacity: Option<(i32,)> =
            sqlx::query_as("SELECT capacity FROM events WHERE id = $1 FOR UPDATE")
                .bind(request.event_id)
                .fetch_optional(&mut *tx)
                .await?;

        let (capacity,) = capacity.ok_or(ClubMateError::EventNotFound {
            event_id: request.event_id,
        })?;

        let (admitted,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM registrations WHERE event_id = $1 AND status <> 'cancelled'",
        )
        .bind(request.event_id)
        .fetch_one(&mut *tx)
        .await?;

        if admitted >= capacity as i64 {
            return Err(ClubMateError::CapacityExceeded {
                event_id: request.event_id,
                capacity,
            });
        }

        let registration = sqlx::query_as::<_, Registration>(
            r#"
            INSERT INTO registrations (event_id, user_id, user_name, user_email, user_phone, user_branch, user_year, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'confirmed')
            ON CONFLICT (event_id, user_id) WHERE status <> 'cancelled' DO NOTHING
            RETURNING id, event_id, user_id, user_name, user_email, user_phone, user_branch, user_year, registered_at, status
            "#,
        )
        .bind(request.event_id)
        .bind(&request.user_id)
        .bind(request.user_name)
        .bind(request.user_email)
        .bind(request.user_phone)
        .bind(request.user_branch)
        .bind(request.user_year)
        .fetch_optional(&mut *tx)
        .await?;

        let registration = registration.ok_or(ClubMateError::AlreadyRegistered {
            event_id: request.event_id,
            user_id: request.user_id,
        })?;

        tx.commit().await?;
        Ok(registration)
    }

    /// Find the non-cancelled registration for an (event, user) pair
    pub async fn find_active(
        &self,
        event_id: i64,
        user_id: &str,
    ) -> Result<Option<Registration>, ClubMateError> {
        let registration = sqlx::query_as::<_, Registration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE event_id = $1 AND user_id = $2 AND status <> 'cancelled'"
        ))
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(registration)
    }

    /// Admitted count for an event: non-cancelled registrations only. This
    /// is the single source of truth; no stored counter exists.
    pub async fn count_admitted(&self, event_id: i64) -> Result<i64, ClubMateError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM registrations WHERE event_id = $1 AND status <> 'cancelled'",
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// All registrations for a user, newest first
    pub async fn find_by_user(&self, user_id: &str) -> Result<Vec<Registration>, ClubMateError> {
        let registrations = sqlx::query_as::<_, Registration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE user_id = $1 ORDER BY registered_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(registrations)
    }

    /// All registrations, for operator review
    pub async fn list_all(&self) -> Result<Vec<Registration>, ClubMateError> {
        let registrations = sqlx::query_as::<_, Registration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations ORDER BY registered_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(registrations)
    }
}
