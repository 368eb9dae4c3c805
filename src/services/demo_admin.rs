//! Demo-only admin bypass.
//!
//! A fixed credential pair that opens an admin session without a registry
//! entry. The credential ships in plain text with the binary; this must
//! never be enabled outside a local demo.

use chrono::{DateTime, Utc};

use crate::models::user::{Role, User};

/// The bypass email.
pub const ADMIN_EMAIL: &str = "admin@stackly.com";
/// The bypass password.
pub const ADMIN_PASSWORD: &str = "admin123";

/// Whether `email`/`password` are the bypass pair.
pub fn matches(email: &str, password: &str) -> bool {
    email == ADMIN_EMAIL && password == ADMIN_PASSWORD
}

/// Builds the synthetic admin record used as the session snapshot.
pub fn admin_record(now: DateTime<Utc>) -> User {
    User {
        email: ADMIN_EMAIL.to_string(),
        password: String::new(),
        firstname: "Admin".to_string(),
        lastname: "Stackly".to_string(),
        role: Role::Admin,
        register_time: now,
        last_login_time: Some(now),
        last_logout_time: None,
    }
}
