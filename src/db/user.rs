//! User model for the blog.

use std::fmt;

/// User entity representing a registered user.
#[derive(Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Login username (unique).
    pub username: String,
    /// Password hash (Argon2).
    pub password: String,
    /// Email address.
    pub email: String,
    /// Account creation timestamp.
    pub created_at: String,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("email", &self.email)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Data for creating a new user.
#[derive(Clone)]
pub struct NewUser {
    /// Login username.
    pub username: String,
    /// Password hash (should already be hashed).
    pub password: String,
    /// Email address.
    pub email: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("email", &self.email)
            .finish()
    }
}

impl NewUser {
    /// Create a new user with required fields.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            email: email.into(),
        }
    }
}
