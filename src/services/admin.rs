//! Admin authoring service
//!
//! Creates events and clubs and lists admission records for operator
//! review. Access is gated by a demo credential pair from configuration;
//! this gate is explicitly not real authentication.

use tracing::{debug, info};

use crate::config::AdminConfig;
use crate::database::{
    ClubJoinRepository, ClubRepository, EventRepository, RegistrationRepository,
};
use crate::models::{
    AdmissionRecord, Club, ClubJoin, CreateClubRequest, CreateEventRequest, Event, JoinStatus,
};
use crate::utils::errors::{ClubMateError, Result};
use crate::utils::logging;

/// Validate an event creation request. All fields are required except
/// category, which defaults at the store layer.
pub fn validate_event_request(request: &CreateEventRequest) -> Result<()> {
    if request.title.trim().is_empty() {
        return Err(ClubMateError::Validation("Event title is required".to_string()));
    }
    if request.location.trim().is_empty() {
        return Err(ClubMateError::Validation(
            "Event location is required".to_string(),
        ));
    }
    if request.club.trim().is_empty() {
        return Err(ClubMateError::Validation(
            "Organizing club is required".to_string(),
        ));
    }
    if request.description.trim().is_empty() {
        return Err(ClubMateError::Validation(
            "Event description is required".to_string(),
        ));
    }
    if request.capacity <= 0 {
        return Err(ClubMateError::Validation(
            "Event capacity must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate a club creation request
pub fn validate_club_request(request: &CreateClubRequest) -> Result<()> {
    if request.name.trim().is_empty() {
        return Err(ClubMateError::Validation("Club name is required".to_string()));
    }
    if request.description.trim().is_empty() {
        return Err(ClubMateError::Validation(
            "Club description is required".to_string(),
        ));
    }
    if request.contact_email.trim().is_empty() {
        return Err(ClubMateError::Validation(
            "Club contact email is required".to_string(),
        ));
    }

    Ok(())
}

/// Admin service for authoring and review
#[derive(Debug, Clone)]
pub struct AdminService {
    events: EventRepository,
    clubs: ClubRepository,
    registrations: RegistrationRepository,
    club_joins: ClubJoinRepository,
    settings: AdminConfig,
}

impl AdminService {
    /// Create a new AdminService instance
    pub fn new(
        events: EventRepository,
        clubs: ClubRepository,
        registrations: RegistrationRepository,
        club_joins: ClubJoinRepository,
        settings: AdminConfig,
    ) -> Self {
        Self {
            events,
            clubs,
            registrations,
            club_joins,
            settings,
        }
    }

    /// Check the demo credential pair
    pub fn verify_credentials(&self, username: &str, password: &str) -> bool {
        username == self.settings.username && password == self.settings.password
    }

    /// Create a new event
    pub async fn create_event(&self, request: CreateEventRequest) -> Result<Event> {
        validate_event_request(&request)?;

        let event = self.events.create(request).await?;
        info!(event_id = event.id, title = %event.title, "Event created");
        logging::log_admin_action("create_event", Some(&event.title), None);

        Ok(event)
    }

    /// Create a new club
    pub async fn create_club(&self, request: CreateClubRequest) -> Result<Club> {
        validate_club_request(&request)?;

        let club = self.clubs.create(request).await?;
        info!(club_id = club.id, name = %club.name, "Club created");
        logging::log_admin_action("create_club", Some(&club.name), None);

        Ok(club)
    }

    /// List all admission records for operator review, unfiltered and
    /// unpaginated
    pub async fn list_admissions_for_review(&self) -> Result<Vec<AdmissionRecord>> {
        debug!("Listing all admissions for review");

        let registrations = self.registrations.list_all().await?;
        let joins = self.club_joins.list_all().await?;

        let mut records = Vec::with_capacity(registrations.len() + joins.len());
        records.extend(registrations.into_iter().map(AdmissionRecord::Event));
        records.extend(joins.into_iter().map(AdmissionRecord::Club));

        Ok(records)
    }

    /// Transition a club join to approved or rejected
    pub async fn set_join_status(&self, join_id: i64, status: JoinStatus) -> Result<ClubJoin> {
        let join = self.club_joins.update_status(join_id, status.as_str()).await?;
        logging::log_admin_action("set_join_status", Some(&join.club_name), Some(status.as_str()));

        Ok(join)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{NaiveDate, NaiveTime};

    fn event_request() -> CreateEventRequest {
        CreateEventRequest {
            title: "Hack Day".to_string(),
            event_date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            event_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            location: "Hall A".to_string(),
            club: "GDSC".to_string(),
            description: "A day of hacking".to_string(),
            category: None,
            capacity: 100,
        }
    }

    fn club_request() -> CreateClubRequest {
        CreateClubRequest {
            name: "Google DSC".to_string(),
            description: "Developer student club".to_string(),
            logo: None,
            category: None,
            member_count: None,
            established_year: Some(2020),
            contact_email: "gdsc@campus.edu".to_string(),
        }
    }

    #[test]
    fn test_valid_event_request_accepted() {
        assert!(validate_event_request(&event_request()).is_ok());
    }

    #[test]
    fn test_event_request_requires_title() {
        let mut request = event_request();
        request.title = "  ".to_string();
        assert_matches!(
            validate_event_request(&request),
            Err(ClubMateError::Validation(_))
        );
    }

    #[test]
    fn test_event_request_requires_positive_capacity() {
        let mut request = event_request();
        request.capacity = 0;
        assert_matches!(
            validate_event_request(&request),
            Err(ClubMateError::Validation(_))
        );
    }

    #[test]
    fn test_valid_club_request_accepted() {
        assert!(validate_club_request(&club_request()).is_ok());
    }

    #[test]
    fn test_club_request_requires_contact_email() {
        let mut request = club_request();
        request.contact_email = String::new();
        assert_matches!(
            validate_club_request(&request),
            Err(ClubMateError::Validation(_))
        );
    }
}
