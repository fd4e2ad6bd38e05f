//! # Luxe Command Context
//!
//! File: cli/src/commands/context.rs
//! Author: Christi Mahu
//!
//! Loaded once in `main` and handed to every handler: the merged
//! configuration plus the resolved storage directory. `--data-dir` (or
//! `LUXE_DATA_DIR`) overrides `[storage] directory`.
//!
use crate::admin::panel::AdminPanel;
use crate::common::fs::io;
use crate::common::storage::FileStorage;
use crate::core::config::{self, Config};
use crate::core::error::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config: Config,
    data_dir: PathBuf,
}

impl CommandContext {
    /// Loads the layered configuration and applies the data-dir override.
    pub fn load(data_dir: Option<PathBuf>) -> Result<Self> {
        let config = config::load_config()?;
        Ok(Self::with_config(config, data_dir))
    }

    pub fn with_config(config: Config, data_dir: Option<PathBuf>) -> Self {
        let data_dir = data_dir.unwrap_or_else(|| PathBuf::from(&config.storage.directory));
        debug!("Using data directory {}", data_dir.display());
        Self { config, data_dir }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Storage handle over the data directory, creating the directory if needed.
    pub fn storage(&self) -> Result<FileStorage> {
        io::ensure_dir_exists(&self.data_dir)?;
        Ok(FileStorage::new(&self.data_dir))
    }

    pub fn admin_panel(&self) -> Result<AdminPanel<FileStorage>> {
        AdminPanel::open(self.storage()?, &self.config.whatsapp.number)
    }
}
