//! User entity.

use super::super::value_objects::Email;
use crate::{Entity, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user.
    pub id: UserId,

    /// Display name entered at registration.
    pub fullname: String,

    /// Normalized email address, unique across users.
    pub email: Email,

    /// Hashed password (never exposed via API).
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Avatar URL derived from the email at registration.
    pub profile_image_url: String,

    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with the given details.
    #[must_use]
    pub fn new(fullname: String, email: Email, password_hash: String, profile_image_url: String) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            fullname,
            email,
            password_hash,
            profile_image_url,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity<UserId> for User {
    fn id(&self) -> &UserId {
        &self.id
    }
}
