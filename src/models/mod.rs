//! Data models
//!
//! This module contains the persisted record types and the request
//! structures used to create them

pub mod admission;
pub mod club;
pub mod event;
pub mod user;

pub use admission::{
    AdmissionRecord, ClubJoin, CreateClubJoinRequest, CreateRegistrationRequest, JoinStatus,
    Registration, RegistrationStatus,
};
pub use club::{Club, CreateClubRequest};
pub use event::{CreateEventRequest, Event, EventOccupancy};
pub use user::{ContactInfo, UserIdentity};
