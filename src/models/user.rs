//! User identity model
//!
//! Identities are issued by the external auth provider and only referenced
//! here; ClubMate never authenticates users itself.

use serde::{Deserialize, Serialize};

/// Resolved user identity from the auth provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: String,
    pub name: String,
    pub email: String,
    pub photo_url: Option<String>,
}

/// Contact details collected at admission time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactInfo {
    pub phone: String,
    pub branch: Option<String>,
    pub year: i32,
}
