pub mod card;
pub mod category;
pub mod init;
pub mod review;
pub mod stats;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use flashdeck_core::traits::CardStore;
use flashdeck_store::config::load_config_from;

/// Where the database comes from: `--db`, else the config file.
pub struct StoreTarget {
    pub config: Option<PathBuf>,
    pub db: Option<PathBuf>,
}

impl StoreTarget {
    pub fn database_path(&self) -> Result<PathBuf> {
        if let Some(db) = &self.db {
            return Ok(db.clone());
        }
        Ok(load_config_from(self.config.as_deref())?.database_path)
    }

    pub fn open(&self) -> Result<Arc<dyn CardStore>> {
        let path = self.database_path()?;
        tracing::debug!(path = %path.display(), "opening database");
        flashdeck_store::open_store(&path)
    }
}
