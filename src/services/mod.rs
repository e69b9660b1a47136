//! Services module
//!
//! This module contains business logic services

pub mod admin;
pub mod admission;
pub mod aggregator;
pub mod assistant;
pub mod notification;

// Re-export commonly used services
pub use admin::AdminService;
pub use admission::AdmissionService;
pub use aggregator::{AggregatorService, Countdown, RegistrationView};
pub use assistant::{AssistantService, ChatSession, CompletionClient};
pub use notification::{MailMessage, NotificationService};

use crate::config::Settings;
use crate::database::DatabaseService;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Debug, Clone)]
pub struct ServiceFactory {
    pub admission: AdmissionService,
    pub aggregator: AggregatorService,
    pub assistant: AssistantService,
    pub admin: AdminService,
    database: DatabaseService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(database: DatabaseService, settings: Settings) -> Result<Self> {
        let notifications = NotificationService::new(settings.mail.clone())?;

        let admission = AdmissionService::new(
            database.events.clone(),
            database.clubs.clone(),
            database.registrations.clone(),
            database.club_joins.clone(),
            notifications,
        );
        let aggregator = AggregatorService::new(
            database.events.clone(),
            database.registrations.clone(),
            database.club_joins.clone(),
        );
        let assistant = AssistantService::new(
            database.events.clone(),
            database.clubs.clone(),
            settings.assistant.clone(),
        )?;
        let admin = AdminService::new(
            database.events.clone(),
            database.clubs.clone(),
            database.registrations.clone(),
            database.club_joins.clone(),
            settings.admin.clone(),
        );

        Ok(Self {
            admission,
            aggregator,
            assistant,
            admin,
            database,
        })
    }

    /// Health check for the backing store
    pub async fn health_check(&self) -> Result<()> {
        self.database.health_check().await
    }
}
