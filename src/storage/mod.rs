use thiserror::Error;

pub mod disabled;
pub mod file;
pub mod memory;

pub use disabled::DisabledStore;
pub use file::FileStore;
pub use memory::MemoryStore;

/// The key holding the serialized user registry.
pub const REGISTRY_KEY: &str = "users";
/// The key holding the serialized current-session snapshot.
pub const SESSION_KEY: &str = "currentUser";

/// A storage-layer error.
///
/// Never surfaced past the session store: callers see an empty registry or
/// an absent session instead.
#[derive(Error, Debug)]
pub enum StorageError {
    /// No backing storage is available.
    #[error("Storage unavailable")]
    Unavailable,

    /// An I/O error from a file-backed store.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] sonic_rs::Error),
}

/// A `Result` type that uses `StorageError` as the error type.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// An origin-scoped, synchronous key-value store.
pub trait KeyValueStore: Send + Sync {
    /// Reads the raw bytes stored under `key`, if any.
    fn read(&self, key: &str) -> StorageResult<Option<Vec<u8>>>;

    /// Overwrites the value stored under `key`.
    fn write(&self, key: &str, value: &[u8]) -> StorageResult<()>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
}
