use serde::{Deserialize, Serialize};

use crate::models::user::User;

/// The current-session snapshot: a copy of the logged-in user's record.
///
/// It is persisted separately from the registry, so later registry edits do
/// not show up here until the next login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session(pub User);

impl Session {
    /// The user record captured at login.
    pub fn user(&self) -> &User {
        &self.0
    }

    /// The email of the logged-in user.
    pub fn email(&self) -> &str {
        &self.0.email
    }

    /// Consumes the session, returning the captured record.
    pub fn into_user(self) -> User {
        self.0
    }
}

impl From<User> for Session {
    fn from(user: User) -> Self {
        Session(user)
    }
}
