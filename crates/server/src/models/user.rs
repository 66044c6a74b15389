//! User domain types.

use chrono::{DateTime, Utc};

use minimart_core::{Email, UserId};

/// A registered shop user (domain type).
///
/// Immutable after registration - there is no profile-edit surface.
/// The password hash lives in the same row but is only ever read by
/// the auth service, never carried on this type.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// User's email address.
    pub email: Email,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}
