//! User entity - the record cached in Redis and held in the in-memory store.

use crate::UserStatus;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user account. Identifiers are assigned by the caller; there is no
/// generated-key machinery behind the in-memory store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub status: UserStatus,
}

impl User {
    /// Create a new active user with both timestamps stamped now
    pub fn new(id: i64, username: impl Into<String>, password: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            username: username.into(),
            password: password.into(),
            mobile: None,
            email: None,
            created_at: now,
            updated_at: now,
            status: UserStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// Refresh the updated timestamp, e.g. before a save
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
