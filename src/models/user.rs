use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The role a user record carries.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// Represents a user in the registry.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// The user's email address. Unique within the registry.
    pub email: String,
    /// The user's password, stored as entered.
    #[serde(default)]
    pub password: String,
    /// The user's first name.
    #[serde(default)]
    pub firstname: String,
    /// The user's last name.
    #[serde(default)]
    pub lastname: String,
    /// The user's role.
    #[serde(default)]
    pub role: Role,
    /// The timestamp when the user registered.
    pub register_time: DateTime<Utc>,
    /// The timestamp of the user's last successful login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login_time: Option<DateTime<Utc>>,
    /// The timestamp of the user's last logout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_logout_time: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a new `User` with the `user` role, registered at `now`.
    pub fn new(
        email: String,
        password: String,
        firstname: String,
        lastname: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            email,
            password,
            firstname,
            lastname,
            role: Role::User,
            register_time: now,
            last_login_time: None,
            last_logout_time: None,
        }
    }

    /// The name shown in the header profile menu.
    ///
    /// Falls back to the local part of the email when no name was given.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.firstname.trim(), self.lastname.trim());
        let full = full.trim();
        if !full.is_empty() {
            return full.to_string();
        }
        self.email
            .split('@')
            .next()
            .unwrap_or_default()
            .to_string()
    }

    /// Whether this record carries the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// A user record as shown to the UI: no password.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub display_name: String,
    pub role: Role,
    pub register_time: DateTime<Utc>,
    pub last_login_time: Option<DateTime<Utc>>,
    pub last_logout_time: Option<DateTime<Utc>>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            firstname: user.firstname.clone(),
            lastname: user.lastname.clone(),
            display_name: user.display_name(),
            role: user.role,
            register_time: user.register_time,
            last_login_time: user.last_login_time,
            last_logout_time: user.last_logout_time,
        }
    }
}
