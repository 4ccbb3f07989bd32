use uuid::Uuid;
use chrono::{DateTime, Utc};

/// Represents a registered user.
#[derive(Clone, Debug)]
pub struct User {
    /// The unique identifier for the user.
    pub id: Uuid,
    /// The user's display name.
    pub username: String,
    /// The user's email address, used as the login key.
    pub email: String,
    /// The user's hashed password. Never leaves the server.
    pub password: String,
    /// The timestamp when the user was created.
    pub created_at: DateTime<Utc>,
}
