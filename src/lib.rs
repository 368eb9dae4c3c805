//! Demo authentication for the Stackly site: a user registry and a single
//! current-session snapshot kept in a local key-value store, plus the HTTP
//! surface the site's forms talk to.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod storage;

pub mod models {
    pub mod session;
    pub mod user;
}

pub mod repositories {
    pub mod session;
    pub mod user;
}

pub mod services {
    pub mod auth;
    pub mod demo_admin;
    pub mod session_store;
}

pub mod handlers {
    pub mod admin;
    pub mod auth;
    pub mod json;
}

pub mod validation {
    pub mod auth;
}

pub use config::Config;
pub use error::{AppError, Result};
pub use services::session_store::LocalSessionStore;
pub use state::AppState;
