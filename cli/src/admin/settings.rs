//! # Luxe Admin Settings
//!
//! File: cli/src/admin/settings.rs
//! Author: Christi Mahu
//!
//! The flat settings object stored under `adminSettings`. Saving replaces the
//! whole object, the same way the settings form submits every field at once.
//!
use crate::common::storage::{Storage, SETTINGS_KEY};
use crate::core::error::{LuxeError, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, warn};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct AdminSettings(Map<String, Value>);

impl AdminSettings {
    /// Builds settings from `key=value` pairs. `true`/`false` become booleans.
    pub fn from_pairs<I, T>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut map = Map::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                LuxeError::Validation(format!("Expected key=value, got '{}'", pair))
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(LuxeError::Validation(format!("Missing key in '{}'", pair)).into());
            }
            let value = match value.trim() {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                other => Value::String(other.to_string()),
            };
            map.insert(key.to_string(), value);
        }
        Ok(Self(map))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Reads the stored object; missing or unreadable means empty.
    pub fn load(storage: &impl Storage) -> Result<Self> {
        let Some(raw) = storage.get_item(SETTINGS_KEY)? else {
            return Ok(Self::default());
        };
        Ok(serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Error parsing admin settings: {}", e);
            Self::default()
        }))
    }

    /// Replaces the stored object with this one.
    pub fn save(&self, storage: &impl Storage) -> Result<()> {
        let encoded = serde_json::to_string(self).context("Failed to encode settings")?;
        storage.set_item(SETTINGS_KEY, &encoded)?;
        info!("Saved {} admin settings", self.len());
        Ok(())
    }
}
