//! # Luxe Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module implements configuration loading, merging and validation.
//! Settings come from several sources, combined in order of precedence:
//! 1. Project-specific `.luxe.toml` in the current directory or its ancestors
//! 2. User-specific `config.toml` in the platform config directory
//! 3. Default values defined in the code
//!
//! ## Sections
//!
//! ```toml
//! [chatbot]
//! bot_name = "Luxe Assistant"
//! typing_base_ms = 500
//! typing_jitter_min_ms = 1000
//! typing_jitter_max_ms = 2000
//!
//! [admin]
//! poll_interval_secs = 5
//! simulate_interval_secs = 30
//! simulate_probability = 0.1
//! simulate_activity = false
//!
//! [storage]
//! directory = "~/.local/share/luxe"
//!
//! [whatsapp]
//! number = "+15551234567"
//! ```
//!
//! The configuration is loaded once per command execution and passed to the
//! components that need it.
//!
use crate::core::error::{LuxeError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub chatbot: ChatbotConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub whatsapp: WhatsAppConfig,
}

/// Chat widget behaviour.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct ChatbotConfig {
    /// Name shown in front of bot messages.
    pub bot_name: String,
    /// Fixed part of the simulated typing delay.
    pub typing_base_ms: u64,
    /// Lower bound of the random part of the typing delay.
    pub typing_jitter_min_ms: u64,
    /// Upper bound (inclusive) of the random part of the typing delay.
    pub typing_jitter_max_ms: u64,
}

impl Default for ChatbotConfig {
    fn default() -> Self {
        Self {
            bot_name: "Luxe Assistant".to_string(),
            typing_base_ms: 500,
            typing_jitter_min_ms: 1000,
            typing_jitter_max_ms: 2000,
        }
    }
}

/// Admin panel timers.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct AdminConfig {
    /// How often the panel re-reads the shared notification key.
    pub poll_interval_secs: u64,
    /// How often the activity simulation fires.
    pub simulate_interval_secs: u64,
    /// Chance that one simulation tick produces a notification.
    pub simulate_probability: f64,
    /// Whether `watch` runs the simulation at all.
    pub simulate_activity: bool,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 5,
            simulate_interval_secs: 30,
            simulate_probability: 0.1,
            simulate_activity: false,
        }
    }
}

impl AdminConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn simulate_interval(&self) -> Duration {
        Duration::from_secs(self.simulate_interval_secs)
    }
}

/// Where the local-storage file lives.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct StorageConfig {
    /// Directory holding `local_storage.json` (can use ~). Will be expanded.
    pub directory: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory: default_storage_dir(),
        }
    }
}

/// Destination for WhatsApp deep links.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct WhatsAppConfig {
    pub number: String,
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            number: "+15551234567".to_string(),
        }
    }
}

fn default_storage_dir() -> String {
    ProjectDirs::from("com", "LuxeInteriors", "luxe")
        .map(|dirs| dirs.data_dir().to_string_lossy().into_owned())
        .unwrap_or_else(|| "~/.luxe".to_string())
}

const PROJECT_CONFIG_FILENAME: &str = ".luxe.toml";
/// Upper bound for every `[chatbot]` typing value, in milliseconds.
pub const MAX_TYPING_MS: u64 = 60_000;

/// Loads, merges, expands and validates the configuration.
pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged_config).context("Failed to expand paths in configuration")?;
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "LuxeInteriors", "luxe") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.luxe.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

/// Walks from `start` upwards looking for `.luxe.toml`, stopping at a `.git` directory.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path: &Path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Project values win whenever they differ from the built-in defaults.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project = match project {
        Some(p) => p,
        None => return user,
    };
    let defaults = Config::default();

    Config {
        chatbot: if project.chatbot != defaults.chatbot {
            project.chatbot
        } else {
            user.chatbot
        },
        admin: if project.admin != defaults.admin {
            project.admin
        } else {
            user.admin
        },
        storage: if project.storage != defaults.storage {
            project.storage
        } else {
            user.storage
        },
        whatsapp: if project.whatsapp != defaults.whatsapp {
            project.whatsapp
        } else {
            user.whatsapp
        },
    }
}

fn expand_config_paths(config: &mut Config) -> Result<()> {
    config.storage.directory = shellexpand::tilde(&config.storage.directory).into_owned();
    debug!("Expanded storage directory: {}", config.storage.directory);
    Ok(())
}

fn validate_config(config: &Config) -> Result<()> {
    let chat = &config.chatbot;
    for (name, value) in [
        ("typing_base_ms", chat.typing_base_ms),
        ("typing_jitter_min_ms", chat.typing_jitter_min_ms),
        ("typing_jitter_max_ms", chat.typing_jitter_max_ms),
    ] {
        if value > MAX_TYPING_MS {
            return Err(anyhow!(LuxeError::Config(format!(
                "{} ({}) exceeds the {} ms limit",
                name, value, MAX_TYPING_MS
            ))));
        }
    }
    if chat.typing_jitter_min_ms > chat.typing_jitter_max_ms {
        return Err(anyhow!(LuxeError::Config(format!(
            "typing_jitter_min_ms ({}) is greater than typing_jitter_max_ms ({})",
            chat.typing_jitter_min_ms, chat.typing_jitter_max_ms
        ))));
    }
    if config.admin.poll_interval_secs == 0 {
        return Err(anyhow!(LuxeError::Config(
            "poll_interval_secs must be at least 1".to_string()
        )));
    }
    if config.admin.simulate_interval_secs == 0 {
        return Err(anyhow!(LuxeError::Config(
            "simulate_interval_secs must be at least 1".to_string()
        )));
    }
    if !(0.0..=1.0).contains(&config.admin.simulate_probability) {
        return Err(anyhow!(LuxeError::Config(format!(
            "simulate_probability must be between 0 and 1, got {}",
            config.admin.simulate_probability
        ))));
    }
    if !config.whatsapp.number.chars().any(|c| c.is_ascii_digit()) {
        return Err(anyhow!(LuxeError::Config(format!(
            "WhatsApp number '{}' contains no digits",
            config.whatsapp.number
        ))));
    }
    let storage_dir = PathBuf::from(&config.storage.directory);
    if storage_dir.exists() && !storage_dir.is_dir() {
        return Err(anyhow!(LuxeError::Config(format!(
            "Configured storage path '{}' exists but is not a directory.",
            storage_dir.display()
        ))));
    }
    Ok(())
}
