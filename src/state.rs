use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::services::{auth::LoginOptions, session_store::LocalSessionStore};
use crate::storage::{FileStore, KeyValueStore, MemoryStore};

/// The application's state.
#[derive(Clone)]
pub struct AppState {
    /// The session store.
    pub store: LocalSessionStore,
    /// The application's configuration.
    pub config: Config,
    /// Serializes auth flows the way a single browser UI thread would.
    ui_thread: Arc<Mutex<()>>,
}

impl AppState {
    /// Creates a new `AppState`, picking the storage backend from `config`.
    ///
    /// # Arguments
    ///
    /// * `config` - The application's configuration.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `AppState`.
    pub fn new(config: &Config) -> Result<Self> {
        let storage: Arc<dyn KeyValueStore> = match &config.storage_dir {
            Some(dir) => {
                let store = FileStore::open(dir)
                    .map_err(|e| AppError::Internal(format!("Failed to open storage: {}", e)))?;
                tracing::info!("✅ File storage initialized at {}", store.dir().display());
                Arc::new(store)
            }
            None => {
                tracing::info!("✅ In-memory storage initialized (nothing is persisted)");
                Arc::new(MemoryStore::new())
            }
        };

        Ok(Self::with_storage(config, storage))
    }

    /// Creates a new `AppState` over an existing storage backend.
    pub fn with_storage(config: &Config, storage: Arc<dyn KeyValueStore>) -> Self {
        AppState {
            store: LocalSessionStore::new(storage),
            config: config.clone(),
            ui_thread: Arc::new(Mutex::new(())),
        }
    }

    /// Waits for exclusive access to the session store.
    pub async fn ui_thread(&self) -> MutexGuard<'_, ()> {
        self.ui_thread.lock().await
    }

    /// The login options derived from the configuration.
    pub fn login_options(&self) -> LoginOptions {
        LoginOptions {
            demo_admin_enabled: self.config.demo_admin_enabled,
        }
    }

    /// Holds a form submission in its "processing" state.
    pub async fn processing_delay(&self) {
        if !self.config.processing_delay.is_zero() {
            tokio::time::sleep(self.config.processing_delay).await;
        }
    }
}
