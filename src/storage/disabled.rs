use super::{KeyValueStore, StorageError, StorageResult};

/// A store that is never available, like a browser with storage turned off.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledStore;

impl KeyValueStore for DisabledStore {
    fn read(&self, _key: &str) -> StorageResult<Option<Vec<u8>>> {
        Err(StorageError::Unavailable)
    }

    fn write(&self, _key: &str, _value: &[u8]) -> StorageResult<()> {
        Err(StorageError::Unavailable)
    }

    fn remove(&self, _key: &str) -> StorageResult<()> {
        Err(StorageError::Unavailable)
    }
}
