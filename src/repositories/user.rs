use crate::{
    models::user::User,
    storage::{KeyValueStore, REGISTRY_KEY, StorageResult},
};

/// Loads the full registry, in insertion order.
///
/// A missing key is an empty registry; unreadable bytes are an error.
pub fn list(store: &dyn KeyValueStore) -> StorageResult<Vec<User>> {
    match store.read(REGISTRY_KEY)? {
        Some(bytes) => Ok(sonic_rs::from_slice(&bytes)?),
        None => Ok(Vec::new()),
    }
}

/// Overwrites the registry with `users`.
pub fn replace(store: &dyn KeyValueStore, users: &[User]) -> StorageResult<()> {
    let bytes = sonic_rs::to_vec(users)?;
    store.write(REGISTRY_KEY, &bytes)
}

/// Finds the index of the record with exactly this email.
pub fn position_by_email(users: &[User], email: &str) -> Option<usize> {
    users.iter().position(|u| u.email == email)
}

/// Finds a record by email.
pub fn find_by_email<'a>(users: &'a [User], email: &str) -> Option<&'a User> {
    users.iter().find(|u| u.email == email)
}
