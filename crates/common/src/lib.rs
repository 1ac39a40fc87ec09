//! Veritas Common Library
//!
//! Shared client, UI components and formatting helpers used by every
//! Veritas page.

pub mod api;
pub mod db;
pub mod error;
pub mod format;
pub mod registry;
pub mod storage;
pub mod types;
pub mod ui;
pub mod validate;

// Re-export commonly used types
pub use api::ApiClient;
pub use db::Database;
pub use error::{Error, Result};
pub use format::{format_date, format_file_size, format_short_date};
pub use registry::{Service, ServiceRegistry};
pub use storage::LocalStorage;
pub use types::*;
pub use validate::{validate_email, validate_url};

/// Veritas version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default store path
pub fn default_store_path() -> std::path::PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(".veritas")
}

/// Default path of the client-side storage database
pub fn default_storage_path() -> std::path::PathBuf {
    default_store_path().join("storage.db")
}

/// Home directory helper
mod dirs {
    pub fn home_dir() -> Option<std::path::PathBuf> {
        std::env::var_os("HOME").map(std::path::PathBuf::from)
    }
}
