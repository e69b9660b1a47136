//! Notification service implementation
//!
//! Renders and dispatches the registration confirmation email through an
//! HTTP mail API. Dispatch is fire-and-forget: a mail failure is logged and
//! swallowed, it never rolls back the admission that triggered it.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::MailConfig;
use crate::models::{Event, Registration};
use crate::utils::errors::{ClubMateError, MailError};
use crate::utils::logging;

const MAIL_TIMEOUT: Duration = Duration::from_secs(10);

/// Outbound mail message, as accepted by the mail API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Notification service for confirmation emails
#[derive(Debug, Clone)]
pub struct NotificationService {
    client: Client,
    settings: MailConfig,
}

impl NotificationService {
    /// Create a new NotificationService instance
    pub fn new(settings: MailConfig) -> Result<Self, ClubMateError> {
        let client = Client::builder()
            .timeout(MAIL_TIMEOUT)
            .user_agent("ClubMate/1.0")
            .build()
            .map_err(ClubMateError::Http)?;

        Ok(Self { client, settings })
    }

    /// Render the confirmation email for a successful event registration
    pub fn render_registration_confirmation(
        &self,
        registration: &Registration,
        event: &Event,
    ) -> MailMessage {
        let branch_row = registration
            .user_branch
            .as_deref()
            .filter(|b| !b.is_empty())
            .map(|b| format!("<li><strong>Branch:</strong> {b}</li>"))
            .unwrap_or_default();

        let html = format!(
            r#"<h1>Registration Confirmed!</h1>
<p>Hi <strong>{name}</strong>,</p>
<p>Your registration for <strong>{title}</strong> has been confirmed.</p>
<h3>Event Details</h3>
<p><strong>Date:</strong> {date}</p>
<p><strong>Time:</strong> {time}</p>
<p><strong>Location:</strong> {location}</p>
<h3>Your Registration Details</h3>
<ul>
<li><strong>Name:</strong> {name}</li>
<li><strong>Email:</strong> {email}</li>
<li><strong>Phone:</strong> {phone}</li>
{branch_row}
<li><strong>Year:</strong> {year}</li>
</ul>
<p>We look forward to seeing you at the event!</p>
<p>ClubMate - Your Smart Campus Companion</p>"#,
            name = registration.user_name,
            title = event.title,
            date = event.event_date.format("%Y-%m-%d"),
            time = event.event_time.format("%H:%M"),
            location = event.location,
            email = registration.user_email,
            phone = registration.user_phone,
            year = registration.user_year,
        );

        MailMessage {
            from: self.settings.from_address.clone(),
            to: registration.user_email.clone(),
            subject: format!("Registration Confirmed: {}", event.title),
            html,
        }
    }

    /// Send a mail message through the mail API
    pub async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        let response = self
            .client
            .post(&self.settings.api_url)
            .bearer_auth(&self.settings.api_key)
            .json(message)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    MailError::ServiceUnavailable
                } else {
                    MailError::RequestFailed(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected(format!("HTTP {}: {}", status, body)));
        }

        info!(to = %message.to, subject = %message.subject, "Confirmation email sent");
        Ok(())
    }

    /// Dispatch the confirmation email for a registration without awaiting
    /// the result. Failures are logged only.
    pub fn dispatch_registration_confirmation(&self, registration: &Registration, event: &Event) {
        if !self.settings.enabled {
            debug!(
                registration_id = registration.id,
                "Mail dispatch disabled; skipping confirmation email"
            );
            return;
        }

        let message = self.render_registration_confirmation(registration, event);
        let service = self.clone();
        tokio::spawn(async move {
            if let Err(e) = service.send(&message).await {
                logging::log_side_effect_failure("registration_confirmation_email", &e.to_string());
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, Utc};

    fn sample_event() -> Event {
        Event {
            id: 1,
            title: "Hack Day".to_string(),
            event_date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            event_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            location: "Hall A".to_string(),
            club: "GDSC".to_string(),
            description: "A day of hacking".to_string(),
            category: "Technical".to_string(),
            capacity: 100,
            created_at: Utc::now(),
        }
    }

    fn sample_registration() -> Registration {
        Registration {
            id: 7,
            event_id: 1,
            user_id: "uid-1".to_string(),
            user_name: "Asha".to_string(),
            user_email: "asha@campus.edu".to_string(),
            user_phone: "9876543210".to_string(),
            user_branch: Some("Computer Science".to_string()),
            user_year: 2,
            registered_at: Utc::now(),
            status: "confirmed".to_string(),
        }
    }

    #[test]
    fn test_confirmation_email_contains_event_and_user_details() {
        let service = NotificationService::new(MailConfig {
            api_url: "https://mail.test/send".to_string(),
            api_key: "k".to_string(),
            from_address: "ClubMate <noreply@clubmate.app>".to_string(),
            enabled: true,
        })
        .unwrap();

        let message =
            service.render_registration_confirmation(&sample_registration(), &sample_event());

        assert_eq!(message.to, "asha@campus.edu");
        assert_eq!(message.subject, "Registration Confirmed: Hack Day");
        assert!(message.html.contains("Asha"));
        assert!(message.html.contains("2025-01-10"));
        assert!(message.html.contains("10:00"));
        assert!(message.html.contains("Hall A"));
        assert!(message.html.contains("Computer Science"));
    }

    #[test]
    fn test_confirmation_email_omits_empty_branch() {
        let service = NotificationService::new(MailConfig {
            api_url: "https://mail.test/send".to_string(),
            api_key: "k".to_string(),
            from_address: "noreply@clubmate.app".to_string(),
            enabled: true,
        })
        .unwrap();

        let mut registration = sample_registration();
        registration.user_branch = None;

        let message = service.render_registration_confirmation(&registration, &sample_event());
        assert!(!message.html.contains("Branch:"));
    }
}
