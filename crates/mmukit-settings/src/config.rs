//! Configuration and settings management for MMUKit
//!
//! Provides the typed configuration consumed by the per-file processing
//! pipeline. Settings live in a TOML or JSON file in the platform config
//! directory; command-line flags override individual values per run.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{SettingsError, SettingsResult};

/// Gcode processing settings.
///
/// The two feature flags are independent: placeholder substitution and
/// next-position insertion can each be turned off without affecting the
/// other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingSettings {
    /// Substitute MMU metadata placeholders found in the file.
    #[serde(default = "default_true")]
    pub insert_placeholders: bool,
    /// Inject the next toolhead position into rewritten tool changes.
    #[serde(default = "default_true")]
    pub insert_next_pos: bool,
    /// File extension (without dot) eligible for processing.
    #[serde(default = "default_extension")]
    pub file_extension: String,
}

fn default_true() -> bool {
    true
}

fn default_extension() -> String {
    "gcode".to_string()
}

impl Default for ProcessingSettings {
    fn default() -> Self {
        Self {
            insert_placeholders: true,
            insert_next_pos: true,
            file_extension: default_extension(),
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Gcode processing settings
    #[serde(default)]
    pub processing: ProcessingSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location in the platform config directory.
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("mmukit").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no platform config directory".to_string())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)?
        } else {
            return Err(SettingsError::UnsupportedFormat(
                path.extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("none")
                    .to_string(),
            ));
        };

        config.validate()?;
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::to_string_pretty(self)
                .map_err(|e| SettingsError::SaveError(format!("TOML serialization: {}", e)))?
        } else {
            return Err(SettingsError::UnsupportedFormat(
                path.extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("none")
                    .to_string(),
            ));
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Load the default config file, falling back to defaults when it
    /// does not exist yet.
    pub fn load_or_default() -> SettingsResult<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if self.processing.file_extension.is_empty() {
            return Err(SettingsError::InvalidSetting {
                key: "processing.file_extension".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        if self.processing.file_extension.starts_with('.') {
            return Err(SettingsError::InvalidSetting {
                key: "processing.file_extension".to_string(),
                reason: "must not include the leading dot".to_string(),
            });
        }

        Ok(())
    }
}
