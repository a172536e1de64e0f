//! Dashboard configuration
//!
//! Stored as TOML through `confy` under the `zonedesk` app name. Every
//! field has a default so partial files load cleanly.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const APP_NAME: &str = "zonedesk";
pub const CONFIG_NAME: &str = "dashboard";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Quiet period before a typed search term is used for querying
    pub search_debounce_ms: u64,
    /// Active filter chips shown before collapsing into "+N more"
    pub max_visible_chips: usize,
    pub messages: Messages,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: 300,
            max_visible_chips: 3,
            messages: Messages::default(),
        }
    }
}

impl DashboardConfig {
    /// Load from the user config directory, creating the file with defaults if missing.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(confy::load(APP_NAME, Some(CONFIG_NAME))?)
    }

    pub fn store(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, Some(CONFIG_NAME), self)?;
        Ok(())
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

/// User-facing notification texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub error_title: String,
    pub created_title: String,
    pub created_description: String,
    pub updated_title: String,
    pub updated_description: String,
    pub save_failed: String,
    pub load_failed: String,
    pub list_failed: String,
    pub deleted_title: String,
    pub delete_failed: String,
    pub delete_confirm_title: String,
    pub delete_confirm_description: String,
    pub delete_confirm_label: String,
    pub cancel_label: String,
    pub more_filters: String,
    pub no_zones_assigned: String,
    pub no_zones_available: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            error_title: "Error".to_string(),
            created_title: "Carrier created".to_string(),
            created_description: "The carrier was created successfully".to_string(),
            updated_title: "Carrier updated".to_string(),
            updated_description: "The carrier was updated successfully".to_string(),
            save_failed: "Could not save the carrier".to_string(),
            load_failed: "Could not load the carrier".to_string(),
            list_failed: "Could not load carriers".to_string(),
            deleted_title: "Carrier deleted".to_string(),
            delete_failed: "Could not delete the carrier".to_string(),
            delete_confirm_title: "Delete carrier?".to_string(),
            delete_confirm_description: "This action cannot be undone.".to_string(),
            delete_confirm_label: "Yes, delete".to_string(),
            cancel_label: "Cancel".to_string(),
            more_filters: "more".to_string(),
            no_zones_assigned: "-- No zones assigned --".to_string(),
            no_zones_available: "No zones available".to_string(),
        }
    }
}
