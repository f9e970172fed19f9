//! Generic settings persistence coordination.
//!
//! Provides type-safe loading and saving of any serializable preference to
//! eframe's persistent storage. Values are stored as JSON strings. Only UI
//! preferences go through here; viewer state is never persisted.

use serde::{Deserialize, Serialize};

/// Coordinates generic settings persistence.
pub struct SettingsCoordinator;

impl SettingsCoordinator {
    /// Loads a setting from persistent storage with a custom default.
    ///
    /// # Arguments
    /// * `storage` - The eframe storage interface
    /// * `key` - The storage key for this setting
    /// * `default` - The value to use if the key is missing or invalid
    pub fn load_setting_or<T>(storage: Option<&dyn eframe::Storage>, key: &str, default: T) -> T
    where
        T: for<'de> Deserialize<'de>,
    {
        Self::try_load_setting(storage, key).unwrap_or(default)
    }

    /// Attempts to load a setting, returning None if not found or invalid.
    pub fn try_load_setting<T>(storage: Option<&dyn eframe::Storage>, key: &str) -> Option<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let storage = storage?;
        let json_str = storage.get_string(key)?;
        match serde_json::from_str(&json_str) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(key, "discarding unreadable setting: {}", e);
                None
            }
        }
    }

    /// Saves a setting to persistent storage.
    pub fn save_setting<T>(storage: &mut dyn eframe::Storage, key: &str, value: &T)
    where
        T: Serialize,
    {
        match serde_json::to_string(value) {
            Ok(json_str) => {
                storage.set_string(key, json_str);
                storage.flush();
            }
            Err(e) => tracing::warn!(key, "failed to serialize setting: {}", e),
        }
    }
}
