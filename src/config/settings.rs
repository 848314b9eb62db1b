//! User settings for VyapaarTrack
//!
//! Manages display preferences and the optional external receipt classifier.

use serde::{Deserialize, Serialize};

use super::paths::VyapaarPaths;
use crate::error::VyapaarError;

/// External program used to read receipt images
///
/// The program receives the base64-encoded image on stdin and must print a
/// JSON object with any of `amount`, `date`, `merchant`, `description`,
/// `referenceNumber`, `category` and `businessUnit` on stdout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassifierCommand {
    /// Executable to run
    pub program: String,

    /// Extra arguments placed before the taxonomy arguments
    #[serde(default)]
    pub args: Vec<String>,
}

/// User settings for VyapaarTrack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Category assigned when a classifier guess falls outside the list
    #[serde(default = "default_fallback_category")]
    pub fallback_category: String,

    /// Number of expenses shown under "Recent Activity"
    #[serde(default = "default_recent_count")]
    pub recent_activity_count: usize,

    /// Receipt classifier; the built-in demo classifier is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<ClassifierCommand>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_fallback_category() -> String {
    "Other".to_string()
}

fn default_recent_count() -> usize {
    4
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            fallback_category: default_fallback_category(),
            recent_activity_count: default_recent_count(),
            classifier: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &VyapaarPaths) -> Result<Self, VyapaarError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                VyapaarError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                VyapaarError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &VyapaarPaths) -> Result<(), VyapaarError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            VyapaarError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            VyapaarError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
