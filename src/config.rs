/// Application configuration
///
/// Read from `<config dir>/image-gallery/config.json` when the file exists.
/// Every field has a default, so an empty object is a valid config.
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Directory name used under the platform data/config dirs
const APP_DIR: &str = "image-gallery";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GalleryConfig {
    /// Storage key holding the JSON array of records
    pub storage_key: String,
    /// SQLite file backing the key-value store
    pub database_path: Option<PathBuf>,
    /// Where downloads from the detail view are written
    pub download_dir: Option<PathBuf>,
    /// The only declared file type accepted for uploads
    pub accepted_type: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            storage_key: "images".to_string(),
            database_path: None,
            download_dir: None,
            accepted_type: "image/jpeg".to_string(),
        }
    }
}

impl GalleryConfig {
    /// Load the config from the default location, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(Some(config)) => {
                tracing::info!("⚙️  Loaded config from {}", path.display());
                config
            }
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::warn!("⚠️  {}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Load the config from `path`. A missing file is `Ok(None)`.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Ok(Some(Self::from_json(&json)?))
    }

    /// Parse from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Path of the config file, if a config dir can be determined
    pub fn config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push(APP_DIR);
        path.push("config.json");
        Some(path)
    }

    /// Resolve the storage database path
    ///
    /// - Linux: ~/.local/share/image-gallery/gallery.db
    /// - macOS: ~/Library/Application Support/image-gallery/gallery.db
    /// - Windows: %APPDATA%\image-gallery\gallery.db
    pub fn database_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.database_path {
            return Some(path.clone());
        }
        let mut path = dirs::data_dir().or_else(dirs::home_dir)?;
        path.push(APP_DIR);
        path.push("gallery.db");
        Some(path)
    }

    /// Resolve the download directory
    pub fn download_dir(&self) -> Option<PathBuf> {
        self.download_dir
            .clone()
            .or_else(dirs::download_dir)
            .or_else(dirs::home_dir)
    }
}
