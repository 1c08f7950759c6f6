//! Persistent application settings
//!
//! Stored as `config.json` in the platform config directory. A missing or
//! unreadable file is never fatal: the app starts on defaults and says so in
//! the log.

use crate::store::write_json_atomic;
use plotmap_core::EditorSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const MAX_RECENT_FILES: usize = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no config directory on this platform")]
    NoConfigDir,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Hit radius, zoom limits and history depth handed to the core
    pub editor: EditorSettings,

    /// Plot files, most recent first
    recent_files: Vec<PathBuf>,

    /// Site plan used when `--image` is not given
    pub last_image: Option<PathBuf>,

    #[serde(skip)]
    path: Option<PathBuf>,
}

impl AppConfig {
    /// Read the config from the platform location, falling back to defaults
    pub fn load() -> Self {
        let path = match Self::default_path() {
            Ok(path) => path,
            Err(e) => {
                log::warn!("Config disabled: {}", e);
                return Self::default();
            }
        };

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.display(), e);
                Self {
                    path: Some(path),
                    ..Self::default()
                }
            }
        }
    }

    /// Read the config at `path`; a missing file gives the defaults
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = if path.exists() {
            serde_json::from_str(&std::fs::read_to_string(path)?)?
        } else {
            Self::default()
        };
        config.path = Some(path.to_path_buf());
        Ok(config)
    }

    fn default_path() -> Result<PathBuf, ConfigError> {
        directories::ProjectDirs::from("", "", "plotmap")
            .map(|dirs| dirs.config_dir().join("config.json"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Write back to where the config was loaded from
    fn persist(&self) {
        let Some(path) = &self.path else {
            return;
        };
        if let Err(e) = write_json_atomic::<_, ConfigError>(path, self) {
            log::warn!("Could not save {}: {}", path.display(), e);
        }
    }

    /// Move `path` to the front of the recent plot files
    ///
    /// Files that do not exist yet (a plot file before its first save) are
    /// skipped; they are added again once saved.
    pub fn add_recent_file(&mut self, path: PathBuf) {
        let Ok(path) = path.canonicalize() else {
            log::debug!("Not remembering {}: no such file", path.display());
            return;
        };

        self.recent_files.retain(|known| known != &path);
        self.recent_files.insert(0, path);
        self.recent_files.truncate(MAX_RECENT_FILES);
        self.persist();
    }

    /// Recent plot files that still exist
    pub fn recent_files(&self) -> Vec<PathBuf> {
        self.recent_files.iter().filter(|path| path.exists()).cloned().collect()
    }

    pub fn clear_recent_files(&mut self) {
        self.recent_files.clear();
        self.persist();
    }

    pub fn set_last_image(&mut self, path: PathBuf) {
        if self.last_image.as_ref() != Some(&path) {
            self.last_image = Some(path);
            self.persist();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("plotmap-config-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_config_is_default() {
        let dir = temp_dir();
        let config = AppConfig::load_from(&dir.join("config.json")).unwrap();
        assert!(config.recent_files().is_empty());
        assert_eq!(config.editor.vertex_hit_radius, EditorSettings::default().vertex_hit_radius);

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_recent_files_survive_reload() {
        let dir = temp_dir();
        let config_path = dir.join("config.json");
        let plots = dir.join("plots.json");
        let other = dir.join("other.json");
        std::fs::write(&plots, "[]").unwrap();
        std::fs::write(&other, "[]").unwrap();

        let mut config = AppConfig::load_from(&config_path).unwrap();
        config.add_recent_file(plots.clone());
        config.add_recent_file(other.clone());
        config.add_recent_file(plots.clone());
        config.add_recent_file(dir.join("never-saved.json"));

        let reloaded = AppConfig::load_from(&config_path).unwrap();
        assert_eq!(
            reloaded.recent_files(),
            vec![plots.canonicalize().unwrap(), other.canonicalize().unwrap()]
        );

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_recent_files_are_capped() {
        let dir = temp_dir();
        let mut config = AppConfig::load_from(&dir.join("config.json")).unwrap();
        for i in 0..12 {
            let path = dir.join(format!("plots-{i}.json"));
            std::fs::write(&path, "[]").unwrap();
            config.add_recent_file(path);
        }

        let recent = config.recent_files();
        assert_eq!(recent.len(), MAX_RECENT_FILES);
        assert_eq!(recent[0], dir.join("plots-11.json").canonicalize().unwrap());

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = temp_dir();
        let path = dir.join("config.json");
        std::fs::write(&path, "{ nope").unwrap();
        assert!(matches!(AppConfig::load_from(&path), Err(ConfigError::Json(_))));

        let _ = std::fs::remove_dir_all(dir);
    }
}
