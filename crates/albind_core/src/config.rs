//! Binding Configuration
//!
//! Which driver library to load and which device to open, persisted as JSON.
//!
//! # Storage Locations
//! - Linux: `~/.config/albind/binding.json`
//! - Windows: `%APPDATA%\albind\albind\config\binding.json`
//! - macOS: `~/Library/Application Support/org.albind.albind/binding.json`

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::ConfigError;

/// Driver and device selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingConfig {
    /// Library path or name handed to the dynamic linker
    pub driver: String,
    /// Output device name; empty selects the default device
    pub device: String,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            driver: albind_platform::default_driver().to_string(),
            device: String::new(),
        }
    }
}

impl BindingConfig {
    /// Load from the platform config directory, or return defaults if
    /// missing or corrupt
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                info!("Using default binding config");
                Self::default()
            }
        }
    }

    /// Load from `path`, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        match Self::read(path) {
            Ok(config) => {
                info!("Binding config loaded from {:?}", path);
                config
            }
            Err(e) => {
                error!("Failed to load binding config {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let file = fs::File::open(path)?;
        let config: Self = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to the platform config directory
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path().ok_or(ConfigError::NoConfigPath)?;
        self.save_to(&path)
    }

    /// Save to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;

        info!("Binding config saved to {:?}", path);
        Ok(())
    }

    /// Reject values the dynamic linker or `alcOpenDevice` cannot take
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.driver.is_empty() {
            return Err(ConfigError::Invalid("driver must not be empty".into()));
        }
        if self.driver.contains('\0') {
            return Err(ConfigError::Invalid("driver contains a NUL byte".into()));
        }
        if self.device.contains('\0') {
            return Err(ConfigError::Invalid("device contains a NUL byte".into()));
        }
        Ok(())
    }

    /// Platform-specific config file path
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "albind", "albind")
            .map(|proj| proj.config_dir().join("binding.json"))
    }
}
