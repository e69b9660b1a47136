//! Registration aggregator
//!
//! Joins a user's admission records back to their source events for the
//! "My Registrations" view and computes the derived display fields. This is
//! a pure projection layer; it performs no writes.

use std::fmt;

use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::database::{ClubJoinRepository, EventRepository, RegistrationRepository};
use crate::models::{Event, EventOccupancy, Registration};
use crate::utils::errors::Result;

/// Time remaining until an event starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Countdown {
    Upcoming {
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
    },
    Started,
}

impl Countdown {
    /// Compute the countdown from `now` to the event start. Events that
    /// have started (or start exactly now) report the terminal state,
    /// never negative components.
    pub fn until(event_start: NaiveDateTime, now: NaiveDateTime) -> Self {
        let delta = event_start - now;
        if delta.num_seconds() <= 0 {
            return Countdown::Started;
        }

        let total_seconds = delta.num_seconds();
        Countdown::Upcoming {
            days: total_seconds / 86_400,
            hours: total_seconds % 86_400 / 3_600,
            minutes: total_seconds % 3_600 / 60,
            seconds: total_seconds % 60,
        }
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Countdown::Upcoming {
                days,
                hours,
                minutes,
                seconds,
            } => write!(f, "{}d {}h {}m {}s", days, hours, minutes, seconds),
            Countdown::Started => write!(f, "Event has started"),
        }
    }
}

/// A registration merged with its source event and derived display fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationView {
    pub registration: Registration,
    pub event: Event,
    pub occupancy: EventOccupancy,
}

impl RegistrationView {
    /// Countdown to the event start as of `now`
    pub fn countdown_at(&self, now: NaiveDateTime) -> Countdown {
        Countdown::until(self.event.event_date.and_time(self.event.event_time), now)
    }

    /// Countdown to the event start as of the current clock
    pub fn countdown(&self) -> Countdown {
        self.countdown_at(Utc::now().naive_utc())
    }
}

/// Read-side aggregation over admission records
#[derive(Debug, Clone)]
pub struct AggregatorService {
    events: EventRepository,
    registrations: RegistrationRepository,
    club_joins: ClubJoinRepository,
}

impl AggregatorService {
    /// Create a new AggregatorService instance
    pub fn new(
        events: EventRepository,
        registrations: RegistrationRepository,
        club_joins: ClubJoinRepository,
    ) -> Self {
        Self {
            events,
            registrations,
            club_joins,
        }
    }

    /// List a user's registrations joined to their events.
    ///
    /// Registrations whose event no longer exists are silently omitted.
    pub async fn list_my_registrations(&self, user_id: &str) -> Result<Vec<RegistrationView>> {
        debug!(user_id = user_id, "Listing registrations for user");

        let registrations = self.registrations.find_by_user(user_id).await?;
        let mut views = Vec::with_capacity(registrations.len());

        for registration in registrations {
            let Some(event) = self.events.find_by_id(registration.event_id).await? else {
                debug!(
                    registration_id = registration.id,
                    event_id = registration.event_id,
                    "Source event missing; omitting registration from view"
                );
                continue;
            };

            let admitted = self.registrations.count_admitted(event.id).await?;
            views.push(RegistrationView {
                occupancy: EventOccupancy::new(admitted, event.capacity),
                registration,
                event,
            });
        }

        Ok(views)
    }

    /// Whether a non-cancelled registration exists for the pair. Uses the
    /// same matching semantics as the admission engine's duplicate check.
    pub async fn check_already_registered(&self, user_id: &str, event_id: i64) -> Result<bool> {
        Ok(self
            .registrations
            .find_active(event_id, user_id)
            .await?
            .is_some())
    }

    /// Whether a pending or approved join exists for the pair
    pub async fn check_already_joined(&self, user_id: &str, club_id: i64) -> Result<bool> {
        Ok(self.club_joins.find_active(club_id, user_id).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_countdown_future_event() {
        let start = dt(2025, 1, 12, 12, 30, 45);
        let now = dt(2025, 1, 10, 10, 0, 0);
        let countdown = Countdown::until(start, now);

        assert_eq!(
            countdown,
            Countdown::Upcoming {
                days: 2,
                hours: 2,
                minutes: 30,
                seconds: 45,
            }
        );
        assert_eq!(countdown.to_string(), "2d 2h 30m 45s");
    }

    #[test]
    fn test_countdown_component_sum_matches_delta() {
        let start = dt(2025, 3, 1, 9, 15, 30);
        let now = dt(2025, 2, 26, 23, 59, 59);
        let delta_seconds = (start - now).num_seconds();

        match Countdown::until(start, now) {
            Countdown::Upcoming {
                days,
                hours,
                minutes,
                seconds,
            } => {
                assert_eq!(
                    days * 86_400 + hours * 3_600 + minutes * 60 + seconds,
                    delta_seconds
                );
            }
            Countdown::Started => panic!("event is in the future"),
        }
    }

    #[test]
    fn test_countdown_past_event_reports_started() {
        let start = dt(2025, 1, 10, 10, 0, 0);
        let now = dt(2025, 1, 10, 10, 0, 1);
        assert_eq!(Countdown::until(start, now), Countdown::Started);
        assert_eq!(Countdown::until(start, now).to_string(), "Event has started");
    }

    #[test]
    fn test_countdown_at_exact_start_reports_started() {
        let start = dt(2025, 1, 10, 10, 0, 0);
        assert_eq!(Countdown::until(start, start), Countdown::Started);
    }
}
