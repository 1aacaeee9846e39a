//! Application configuration.
//!
//! Settings live in `config.json` inside the platform data directory (see
//! [`DataStorage`]). Only the database location is configurable; when it is not
//! set the database is `taskdesk.db` next to the configuration file.
//!
//! Resolution order for the database path:
//!
//! 1. the `TASKDESK_DB` environment variable (a `.env` file is honoured),
//! 2. `db_path` from `config.json`,
//! 3. `<data dir>/taskdesk.db`.
//!
//! ```rust,no_run
//! use taskdesk::libs::config::Config;
//!
//! let config = Config::read()?;
//! let db_path = config.db_path()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DB_FILE_NAME: &str = "taskdesk.db";
pub const DB_PATH_ENV: &str = "TASKDESK_DB";

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    /// Explicit database file; `None` means the default inside the data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_path: Option<PathBuf>,
    #[serde(skip)]
    storage: Option<DataStorage>,
}

impl Config {
    /// Reads the configuration from the default data directory.
    ///
    /// A missing file yields the default configuration.
    pub fn read() -> Result<Self> {
        Self::read_from(DataStorage::new())
    }

    pub fn read_from(storage: DataStorage) -> Result<Self> {
        let path = storage.get_path(CONFIG_FILE_NAME)?;
        let mut config = if path.exists() {
            let content = fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str::<Config>(&content).with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            Config::default()
        };
        config.storage = Some(storage);
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = self.storage().get_path(CONFIG_FILE_NAME)?;
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    pub fn set_db_path(&mut self, path: impl AsRef<Path>) {
        self.db_path = Some(path.as_ref().to_path_buf());
    }

    /// Database file to open, applying the environment override.
    pub fn db_path(&self) -> Result<PathBuf> {
        if let Ok(path) = std::env::var(DB_PATH_ENV) {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
        if let Some(path) = &self.db_path {
            return Ok(path.clone());
        }
        Ok(self.storage().get_path(DB_FILE_NAME)?)
    }

    fn storage(&self) -> DataStorage {
        self.storage.clone().unwrap_or_default()
    }
}
