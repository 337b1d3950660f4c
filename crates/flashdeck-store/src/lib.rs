//! flashdeck-store — SQLite persistence and configuration.
//!
//! Implements the `CardStore` trait over a local SQLite file and resolves
//! where that file lives.

pub mod config;
pub mod sqlite;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use flashdeck_core::traits::CardStore;

pub use config::{load_config_from, FlashdeckConfig};
pub use sqlite::SqliteStore;

/// Open the database at `path`, creating parent directories as needed.
pub fn open_store(path: &Path) -> Result<Arc<dyn CardStore>> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    Ok(Arc::new(SqliteStore::open(path)?))
}
