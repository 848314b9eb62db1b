//! Path management for VyapaarTrack
//!
//! Provides platform-aware path resolution for configuration, stored data,
//! and CSV exports.
//!
//! ## Path Resolution Order
//!
//! 1. `VYAPAAR_TRACK_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory for `vyapaar-track`
//!    (`~/.config/vyapaar-track` on Linux, `%APPDATA%\vyapaar-track\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::VyapaarError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "VYAPAAR_TRACK_DATA_DIR";

/// Manages all paths used by VyapaarTrack
#[derive(Debug, Clone)]
pub struct VyapaarPaths {
    /// Base directory for all VyapaarTrack data
    base_dir: PathBuf,
}

impl VyapaarPaths {
    /// Create a new VyapaarPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and no
    /// override is set.
    pub fn new() -> Result<Self, VyapaarError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create VyapaarPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding one JSON file per stored key
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Default directory for CSV exports
    pub fn export_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), VyapaarError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| VyapaarError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| VyapaarError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.export_dir())
            .map_err(|e| VyapaarError::Io(format!("Failed to create export directory: {}", e)))?;

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, VyapaarError> {
    ProjectDirs::from("", "", "vyapaar-track")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            VyapaarError::Config(format!(
                "Could not determine a home directory; set {} instead",
                DATA_DIR_ENV
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = VyapaarPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.export_dir(), temp_dir.path().join("exports"));
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = VyapaarPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(paths.export_dir().exists());
    }
}
