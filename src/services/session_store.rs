use std::sync::Arc;

use chrono::Utc;

use crate::{
    models::{session::Session, user::User},
    repositories::{session as session_repo, user as user_repo},
    storage::{KeyValueStore, StorageResult},
};

/// The local session store: the user registry plus the current-session
/// snapshot, over an injected key-value store.
///
/// Every operation degrades instead of failing. Unreadable or unavailable
/// storage reads as an empty registry or no session, and failed writes are
/// dropped. The underlying error is logged.
#[derive(Clone)]
pub struct LocalSessionStore {
    storage: Arc<dyn KeyValueStore>,
}

impl LocalSessionStore {
    /// Creates a new `LocalSessionStore` over `storage`.
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Returns every registered user, in registration order.
    pub fn list_users(&self) -> Vec<User> {
        absorb("list registry", user_repo::list(self.storage.as_ref())).unwrap_or_default()
    }

    /// Overwrites the registry with `users`.
    pub fn replace_users(&self, users: &[User]) {
        absorb("replace registry", user_repo::replace(self.storage.as_ref(), users));
    }

    /// Returns the current-session snapshot, if someone is logged in.
    pub fn current_session(&self) -> Option<Session> {
        absorb("read current session", session_repo::get(self.storage.as_ref())).flatten()
    }

    /// Overwrites the current-session snapshot.
    pub fn set_current_session(&self, session: &Session) {
        absorb(
            "write current session",
            session_repo::set(self.storage.as_ref(), session),
        );
    }

    /// Removes the current-session snapshot.
    pub fn clear_current_session(&self) {
        absorb("clear current session", session_repo::clear(self.storage.as_ref()));
    }

    /// Logs the current user out.
    ///
    /// Stamps `lastLogoutTime` on the matching registry record, then removes
    /// the snapshot whether or not the stamp succeeded. Calling this with no
    /// session is a no-op.
    pub fn logout(&self) {
        if let Some(session) = self.current_session() {
            if !session.email().is_empty() {
                let stamped = self.stamp_logout(session.email());
                absorb("stamp logout time", stamped);
            }
        }
        self.clear_current_session();
    }

    fn stamp_logout(&self, email: &str) -> StorageResult<()> {
        let mut users = user_repo::list(self.storage.as_ref())?;
        match user_repo::position_by_email(&users, email) {
            Some(index) => {
                users[index].last_logout_time = Some(Utc::now());
                user_repo::replace(self.storage.as_ref(), &users)?;
                tracing::info!("👋 Logout recorded for {}", email);
            }
            None => tracing::debug!("No registry record for {}, nothing to stamp", email),
        }
        Ok(())
    }
}

/// Turns a storage failure into `None`, logging it.
fn absorb<T>(operation: &str, result: StorageResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("⚠️ Storage degraded during {}: {}", operation, e);
            None
        }
    }
}
