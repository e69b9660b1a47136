//! Admission engine
//!
//! Decides whether a student may register for an event or join a club.
//! Identity is always passed in explicitly; the engine performs no
//! authentication and refuses to proceed without a resolved user.
//!
//! Checks run in a fixed order: missing identity, missing target entity,
//! duplicate admission, capacity (events only), contact validation. The
//! duplicate check deliberately precedes the capacity check so a user who
//! is already admitted to a full event is told so instead of "event full".
//! The decision is evaluated against a fresh read, then re-applied
//! atomically by the guarded repository insert to close the race window
//! between check and create.

use tracing::{debug, info};

use crate::database::{
    ClubJoinRepository, ClubRepository, EventRepository, RegistrationRepository,
};
use crate::models::{
    Club, ClubJoin, ContactInfo, CreateClubJoinRequest, CreateRegistrationRequest, Event,
    EventOccupancy, JoinStatus, Registration, RegistrationStatus, UserIdentity,
};
use crate::services::notification::NotificationService;
use crate::utils::errors::{ClubMateError, Result};
use crate::utils::logging;

/// Admission engine for event registrations and club joins
#[derive(Debug, Clone)]
pub struct AdmissionService {
    events: EventRepository,
    clubs: ClubRepository,
    registrations: RegistrationRepository,
    club_joins: ClubJoinRepository,
    notifications: NotificationService,
}

/// Evaluate an event admission against observed state.
///
/// Pure decision logic shared with the tests; the service re-applies the
/// same rules atomically through the guarded insert.
pub fn evaluate_event_admission(
    event: &Event,
    prior: Option<&Registration>,
    admitted_count: i64,
    user_id: &str,
    contact: &ContactInfo,
) -> Result<()> {
    if let Some(prior) = prior {
        if RegistrationStatus::blocks_reregistration(&prior.status) {
            return Err(ClubMateError::AlreadyRegistered {
                event_id: event.id,
                user_id: user_id.to_string(),
            });
        }
    }

    let occupancy = EventOccupancy::new(admitted_count, event.capacity);
    if occupancy.is_full() {
        return Err(ClubMateError::CapacityExceeded {
            event_id: event.id,
            capacity: event.capacity,
        });
    }

    if contact.phone.trim().is_empty() {
        return Err(ClubMateError::Validation(
            "Please enter your phone number".to_string(),
        ));
    }

    Ok(())
}

/// Evaluate a club admission against observed state. Clubs are uncapped,
/// so only the duplicate and contact checks apply.
pub fn evaluate_club_admission(
    club: &Club,
    prior: Option<&ClubJoin>,
    user_id: &str,
    contact: &ContactInfo,
) -> Result<()> {
    if let Some(prior) = prior {
        if JoinStatus::blocks_rejoin(&prior.status) {
            return Err(ClubMateError::AlreadyJoined {
                club_id: club.id,
                user_id: user_id.to_string(),
            });
        }
    }

    if contact.phone.trim().is_empty() {
        return Err(ClubMateError::Validation(
            "Please enter your phone number".to_string(),
        ));
    }

    Ok(())
}

impl AdmissionService {
    /// Create a new AdmissionService instance
    pub fn new(
        events: EventRepository,
        clubs: ClubRepository,
        registrations: RegistrationRepository,
        club_joins: ClubJoinRepository,
        notifications: NotificationService,
    ) -> Self {
        Self {
            events,
            clubs,
            registrations,
            club_joins,
            notifications,
        }
    }

    /// Register a user for an event
    ///
    /// On success a confirmed registration exists and the confirmation
    /// email has been dispatched fire-and-forget.
    pub async fn register_for_event(
        &self,
        identity: Option<&UserIdentity>,
        event_id: i64,
        contact: &ContactInfo,
    ) -> Result<Registration> {
        let identity = identity.ok_or(ClubMateError::Unauthenticated)?;
        debug!(user_id = %identity.id, event_id = event_id, "Evaluating event registration");

        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(ClubMateError::EventNotFound { event_id })?;

        let prior = self.registrations.find_active(event_id, &identity.id).await?;
        let admitted = self.registrations.count_admitted(event_id).await?;
        evaluate_event_admission(&event, prior.as_ref(), admitted, &identity.id, contact)?;

        let request = CreateRegistrationRequest {
            event_id,
            user_id: identity.id.clone(),
            user_name: identity.name.clone(),
            user_email: identity.email.clone(),
            user_phone: contact.phone.trim().to_string(),
            user_branch: contact.branch.clone(),
            user_year: contact.year,
        };

        let registration = self.registrations.create_admission(request).await?;

        info!(
            user_id = %identity.id,
            event_id = event_id,
            registration_id = registration.id,
            "Event registration confirmed"
        );
        logging::log_admission(&identity.id, "event", event_id, "confirmed");

        self.notifications
            .dispatch_registration_confirmation(&registration, &event);

        Ok(registration)
    }

    /// Request to join a club. The join starts pending and is uncapped.
    pub async fn join_club(
        &self,
        identity: Option<&UserIdentity>,
        club_id: i64,
        contact: &ContactInfo,
    ) -> Result<ClubJoin> {
        let identity = identity.ok_or(ClubMateError::Unauthenticated)?;
        debug!(user_id = %identity.id, club_id = club_id, "Evaluating club join");

        let club = self
            .clubs
            .find_by_id(club_id)
            .await?
            .ok_or(ClubMateError::ClubNotFound { club_id })?;

        let prior = self.club_joins.find_active(club_id, &identity.id).await?;
        evaluate_club_admission(&club, prior.as_ref(), &identity.id, contact)?;

        let request = CreateClubJoinRequest {
            club_id,
            club_name: club.name.clone(),
            user_id: identity.id.clone(),
            user_name: identity.name.clone(),
            user_email: identity.email.clone(),
            user_phone: contact.phone.trim().to_string(),
            user_branch: contact.branch.clone(),
            user_year: contact.year,
        };

        let join = self.club_joins.create_admission(request).await?;

        info!(
            user_id = %identity.id,
            club_id = club_id,
            join_id = join.id,
            "Club join request created"
        );
        logging::log_admission(&identity.id, "club", club_id, "pending");

        Ok(join)
    }
}
