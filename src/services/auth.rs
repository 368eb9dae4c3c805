use chrono::Utc;
use subtle::ConstantTimeEq;

use crate::error::{AppError, Result};
use crate::models::{session::Session, user::User};
use crate::repositories::user as user_repo;
use crate::services::{demo_admin, session_store::LocalSessionStore};
use crate::validation::auth::*;

/// The input for a registration.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub firstname: String,
    pub lastname: String,
}

/// Options that change how logins are handled.
#[derive(Debug, Clone, Copy)]
pub struct LoginOptions {
    /// Whether the demo admin bypass is accepted.
    pub demo_admin_enabled: bool,
}

impl Default for LoginOptions {
    fn default() -> Self {
        Self {
            demo_admin_enabled: true,
        }
    }
}

/// Compares two passwords exactly, without short-circuiting on the first
/// differing byte.
fn passwords_match(stored: &str, attempt: &str) -> bool {
    stored.as_bytes().ct_eq(attempt.as_bytes()).into()
}

/// Registers a new user.
///
/// The new record is appended to the registry with the `user` role. The
/// user is not logged in.
///
/// # Arguments
///
/// * `store` - The session store.
/// * `registration` - The registration form input.
///
/// # Returns
///
/// A `Result` containing the created `User`.
pub fn register(store: &LocalSessionStore, registration: Registration) -> Result<User> {
    tracing::debug!("📝 Register attempt: {}", registration.email);
    validate_email(&registration.email)?;
    validate_password(&registration.password)?;

    let mut users = store.list_users();
    if user_repo::find_by_email(&users, &registration.email).is_some() {
        tracing::debug!("Email already registered: {}", registration.email);
        return Err(AppError::DuplicateUser);
    }

    let user = User::new(
        registration.email,
        registration.password,
        registration.firstname,
        registration.lastname,
        Utc::now(),
    );
    users.push(user.clone());
    store.replace_users(&users);

    tracing::info!("✅ User registered: {}", user.email);
    Ok(user)
}

/// Logs a user in and makes them the current session.
///
/// The demo admin pair, when enabled, is checked first and never touches
/// the registry. Otherwise the registry record matching both email and
/// password gets a fresh `lastLoginTime`.
///
/// # Arguments
///
/// * `store` - The session store.
/// * `email` - The entered email.
/// * `password` - The entered password.
/// * `options` - Login options.
///
/// # Returns
///
/// A `Result` containing the new `Session`.
pub fn login(
    store: &LocalSessionStore,
    email: &str,
    password: &str,
    options: LoginOptions,
) -> Result<Session> {
    tracing::debug!("🔐 Login attempt: {}", email);
    validate_email(email)?;
    validate_password(password)?;

    if options.demo_admin_enabled && demo_admin::matches(email, password) {
        let session = Session::from(demo_admin::admin_record(Utc::now()));
        store.set_current_session(&session);
        tracing::info!("✅ Demo admin session opened");
        return Ok(session);
    }

    let mut users = store.list_users();
    let index = users
        .iter()
        .position(|u| u.email == email && passwords_match(&u.password, password))
        .ok_or_else(|| {
            tracing::warn!("❌ Invalid credentials for {}", email);
            AppError::InvalidCredentials
        })?;

    users[index].last_login_time = Some(Utc::now());
    store.replace_users(&users);

    let session = Session::from(users.swap_remove(index));
    store.set_current_session(&session);

    tracing::info!("✅ User authenticated: {}", session.email());
    Ok(session)
}

/// Logs the current user out. See [`LocalSessionStore::logout`].
pub fn logout(store: &LocalSessionStore) {
    store.logout();
}

/// A password reset that passed the email check and awaits a new password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordReset {
    email: String,
}

impl PasswordReset {
    /// The email the reset was started for.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Finishes the reset. See [`complete_password_reset`].
    pub fn complete(
        self,
        store: &LocalSessionStore,
        new_password: &str,
        confirmation: Option<&str>,
    ) -> Result<()> {
        complete_password_reset(store, &self.email, new_password, confirmation)
    }
}

/// Starts a password reset for a registered email.
///
/// # Arguments
///
/// * `store` - The session store.
/// * `email` - The email to reset.
///
/// # Returns
///
/// A `Result` containing the pending `PasswordReset`.
pub fn start_password_reset(store: &LocalSessionStore, email: &str) -> Result<PasswordReset> {
    tracing::debug!("🔑 Password reset requested: {}", email);
    validate_email(email)?;

    if user_repo::find_by_email(&store.list_users(), email).is_none() {
        return Err(AppError::NotFound);
    }

    Ok(PasswordReset {
        email: email.to_string(),
    })
}

/// Overwrites the stored password of `email`.
///
/// The record is looked up again, since the registry may have changed
/// since the reset started. Only the password field changes.
///
/// # Arguments
///
/// * `store` - The session store.
/// * `email` - The email being reset.
/// * `new_password` - The new password.
/// * `confirmation` - The repeated password, when the form asks for one.
///
/// # Returns
///
/// A `Result<()>`.
pub fn complete_password_reset(
    store: &LocalSessionStore,
    email: &str,
    new_password: &str,
    confirmation: Option<&str>,
) -> Result<()> {
    validate_email(email)?;
    validate_password(new_password)?;
    validate_confirmation(new_password, confirmation)?;

    let mut users = store.list_users();
    let index = user_repo::position_by_email(&users, email).ok_or(AppError::NotFound)?;
    users[index].password = new_password.to_string();
    store.replace_users(&users);

    tracing::info!("✅ Password reset for {}", email);
    Ok(())
}
