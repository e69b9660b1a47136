//! Repository modules for database access

pub mod club;
pub mod club_join;
pub mod event;
pub mod registration;

pub use club::ClubRepository;
pub use club_join::ClubJoinRepository;
pub use event::EventRepository;
pub use registration::RegistrationRepository;
