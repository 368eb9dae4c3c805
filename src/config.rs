use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// The application's configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// The address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// The directory for persisted storage. `None` keeps everything in memory.
    pub storage_dir: Option<PathBuf>,
    /// How long form submissions stay in the "processing" state.
    pub processing_delay: Duration,
    /// Whether the hardcoded demo admin login is accepted.
    pub demo_admin_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            storage_dir: None,
            processing_delay: Duration::from_millis(800),
            demo_admin_enabled: true,
        }
    }
}

impl Config {
    /// Creates a new `Config` from environment variables.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Config`.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let bind_addr = match env::var("BIND_ADDR") {
            Ok(addr) => addr.parse().context("Invalid BIND_ADDR")?,
            Err(_) => defaults.bind_addr,
        };

        let storage_dir = env::var("STORAGE_DIR")
            .ok()
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        let processing_delay = match env::var("PROCESSING_DELAY_MS") {
            Ok(ms) => Duration::from_millis(ms.parse().context("Invalid PROCESSING_DELAY_MS")?),
            Err(_) => defaults.processing_delay,
        };

        let demo_admin_enabled = match env::var("DEMO_ADMIN_ENABLED") {
            Ok(flag) => flag.parse().context("DEMO_ADMIN_ENABLED must be true or false")?,
            Err(_) => defaults.demo_admin_enabled,
        };

        Ok(Self {
            bind_addr,
            storage_dir,
            processing_delay,
            demo_admin_enabled,
        })
    }
}
