//! Database service layer
//!
//! This module provides a high-level interface to database operations

use crate::database::{
    ClubJoinRepository, ClubRepository, DatabasePool, EventRepository, RegistrationRepository,
};
use crate::utils::errors::ClubMateError;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub events: EventRepository,
    pub clubs: ClubRepository,
    pub registrations: RegistrationRepository,
    pub club_joins: ClubJoinRepository,
    pool: DatabasePool,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            events: EventRepository::new(pool.clone()),
            clubs: ClubRepository::new(pool.clone()),
            registrations: RegistrationRepository::new(pool.clone()),
            club_joins: ClubJoinRepository::new(pool.clone()),
            pool,
        }
    }

    /// Check database health
    pub async fn health_check(&self) -> Result<(), ClubMateError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;

        Ok(())
    }
}
