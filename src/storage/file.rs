use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use super::{KeyValueStore, StorageError, StorageResult};

/// Distinguishes temp files of concurrent writes within one process.
static WRITE_SEQ: AtomicU64 = AtomicU64::new(0);

/// A store that keeps one JSON file per key inside a directory.
///
/// Writes go to a temporary file first and are renamed into place, so a
/// reader never sees a half-written value. Each write gets its own temp
/// file; the last rename wins.
///
/// All I/O is blocking and runs on the caller's thread. Values are a few
/// kilobytes, so async callers invoke it inline.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens (or creates) a `FileStore` rooted at `dir`.
    ///
    /// # Arguments
    ///
    /// * `dir` - The directory that holds the stored values.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `FileStore`.
    pub fn open(dir: impl AsRef<Path>) -> StorageResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        tracing::debug!("📁 File store opened at {}", dir.display());
        Ok(Self { dir })
    }

    /// The directory this store writes to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::Io(std::io::Error::new(
                ErrorKind::InvalidInput,
                format!("invalid storage key: {:?}", key),
            )));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        match fs::read(self.path_for(key)?) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        let path = self.path_for(key)?;
        let tmp = self.dir.join(format!(
            "{}.json.{}-{}.tmp",
            key,
            std::process::id(),
            WRITE_SEQ.fetch_add(1, Ordering::Relaxed)
        ));
        fs::write(&tmp, value)?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        match fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "stackly-file-store-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn temp_files(dir: &Path) -> Vec<PathBuf> {
        fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "tmp"))
            .collect()
    }

    #[test]
    fn values_survive_reopen() {
        let dir = scratch_dir("reopen");
        let store = FileStore::open(&dir).unwrap();
        store.write("users", br#"[{"email":"a@x.com"}]"#).unwrap();

        let reopened = FileStore::open(&dir).unwrap();
        assert_eq!(
            reopened.read("users").unwrap().as_deref(),
            Some(&br#"[{"email":"a@x.com"}]"#[..])
        );
        assert!(temp_files(&dir).is_empty());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn concurrent_writes_leave_one_whole_value() {
        let dir = scratch_dir("concurrent");
        let store = FileStore::open(&dir).unwrap();

        std::thread::scope(|scope| {
            for writer in 0..8 {
                let store = &store;
                scope.spawn(move || {
                    for round in 0..20 {
                        let value = format!(r#"[{{"writer":{},"round":{}}}]"#, writer, round);
                        store.write("users", value.as_bytes()).unwrap();
                    }
                });
            }
        });

        let bytes = store.read("users").unwrap().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with(r#"[{"writer":"#) && text.ends_with("}]"));
        assert!(temp_files(&dir).is_empty());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn remove_missing_key_is_ok() {
        let dir = scratch_dir("remove");
        let store = FileStore::open(&dir).unwrap();
        store.remove("currentUser").unwrap();
        assert!(store.read("currentUser").unwrap().is_none());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn rejects_path_like_keys() {
        let dir = scratch_dir("keys");
        let store = FileStore::open(&dir).unwrap();
        assert!(store.write("../escape", b"{}").is_err());
        assert!(store.read("").is_err());

        fs::remove_dir_all(&dir).unwrap();
    }
}
