//! App settings
//!
//! User preferences persisted as `settings.json` in the data directory.
//! Loading falls back to defaults on any failure; saving logs failures and
//! carries on, so preferences can never take the app down.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Settings file name inside the data directory
const SETTINGS_FILE: &str = "settings.json";

/// Distance unit label
///
/// Display-only: readings are stored as entered and never converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceUnit {
    #[serde(rename = "km")]
    Km,
    #[serde(rename = "miles")]
    Miles,
}

impl DistanceUnit {
    /// The unit's display label
    pub fn label(&self) -> &'static str {
        match self {
            DistanceUnit::Km => "km",
            DistanceUnit::Miles => "miles",
        }
    }
}

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    /// UI theme name
    pub theme: String,

    /// Vehicle preselected when starting a trip
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_vehicle_id: Option<String>,

    /// Label used for distances
    pub distance_unit: DistanceUnit,

    /// Currency prefix for costs
    pub currency: String,

    /// chrono pattern for date display
    pub date_format: String,

    /// When the data was last exported, Unix milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_backup_date: Option<i64>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            default_vehicle_id: None,
            distance_unit: DistanceUnit::Km,
            currency: "Rs ".to_string(),
            date_format: "%d/%m/%Y".to_string(),
            last_backup_date: None,
        }
    }
}

impl AppSettings {
    /// Load settings from the data directory, falling back to defaults on
    /// a missing, unreadable or corrupt file
    pub fn load(dir: &Path) -> AppSettings {
        let path = dir.join(SETTINGS_FILE);
        if let Ok(content) = fs::read_to_string(&path) {
            match serde_json::from_str(&content) {
                Ok(settings) => return settings,
                Err(e) => tracing::warn!("failed to parse {}: {}", path.display(), e),
            }
        }
        AppSettings::default()
    }

    /// Save settings into the data directory; failures are logged
    pub fn save(&self, dir: &Path) {
        let path = dir.join(SETTINGS_FILE);
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(&path, json) {
                    tracing::warn!("failed to write {}: {}", path.display(), e);
                }
            }
            Err(e) => tracing::warn!("failed to serialize settings: {}", e),
        }
    }
}
