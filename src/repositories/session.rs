use crate::{
    models::session::Session,
    storage::{KeyValueStore, SESSION_KEY, StorageResult},
};

/// Loads the current-session snapshot, if one is stored.
pub fn get(store: &dyn KeyValueStore) -> StorageResult<Option<Session>> {
    match store.read(SESSION_KEY)? {
        Some(bytes) => Ok(Some(sonic_rs::from_slice(&bytes)?)),
        None => Ok(None),
    }
}

/// Overwrites the current-session snapshot.
pub fn set(store: &dyn KeyValueStore, session: &Session) -> StorageResult<()> {
    let bytes = sonic_rs::to_vec(session)?;
    store.write(SESSION_KEY, &bytes)
}

/// Deletes the current-session snapshot.
pub fn clear(store: &dyn KeyValueStore) -> StorageResult<()> {
    store.remove(SESSION_KEY)
}
