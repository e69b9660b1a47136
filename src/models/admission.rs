//! Admission record models
//!
//! A Registration (event) or ClubJoin (club) document evidences a user's
//! accepted or pending participation. Both record kinds carry a denormalized
//! snapshot of the user's contact details taken at admission time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Event admission record. At most one non-cancelled row exists per
/// (event_id, user_id) pair.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Registration {
    pub id: i64,
    pub event_id: i64,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: String,
    pub user_branch: Option<String>,
    pub user_year: i32,
    pub registered_at: DateTime<Utc>,
    pub status: String,
}

/// Club admission record. At most one pending or approved row exists per
/// (club_id, user_id) pair; a rejected join may be resubmitted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClubJoin {
    pub id: i64,
    pub club_id: i64,
    pub club_name: String,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: String,
    pub user_branch: Option<String>,
    pub user_year: i32,
    pub joined_at: DateTime<Utc>,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRegistrationRequest {
    pub event_id: i64,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: String,
    pub user_branch: Option<String>,
    pub user_year: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClubJoinRequest {
    pub club_id: i64,
    pub club_name: String,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: String,
    pub user_branch: Option<String>,
    pub user_year: i32,
}

/// Either kind of admission record, for the operator review listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AdmissionRecord {
    Event(Registration),
    Club(ClubJoin),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrationStatus {
    Confirmed,
    Cancelled,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Confirmed => "confirmed",
            RegistrationStatus::Cancelled => "cancelled",
        }
    }

    /// Whether a registration in this status blocks a new registration for
    /// the same (event, user) pair. Shared by the admission engine and the
    /// read-only existence checks so the two can never disagree.
    pub fn blocks_reregistration(status: &str) -> bool {
        status != Self::Cancelled.as_str()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinStatus {
    Pending,
    Approved,
    Rejected,
}

impl JoinStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinStatus::Pending => "pending",
            JoinStatus::Approved => "approved",
            JoinStatus::Rejected => "rejected",
        }
    }

    /// Whether a join in this status blocks a new join request for the same
    /// (club, user) pair. Rejected joins do not block resubmission.
    pub fn blocks_rejoin(status: &str) -> bool {
        status == Self::Pending.as_str() || status == Self::Approved.as_str()
    }
}
