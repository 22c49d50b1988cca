use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::constants::DEFAULT_ENGINE_PROGRAM;
use super::transform_parameters::TransformParameters;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write settings to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Persisted pipeline configuration: which engine to run and with what parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub engine_program: String,
    pub parameters: TransformParameters,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            engine_program: DEFAULT_ENGINE_PROGRAM.to_string(),
            parameters: TransformParameters::default(),
        }
    }
}

impl Settings {
    /// Platform config location, e.g. `~/.config/Lofi Pipeline/settings.json` on Linux.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("Lofi Pipeline").join("settings.json"))
    }

    /// Loads from the platform config location, falling back to defaults when
    /// the file is absent or unreadable.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let write_err = |source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| SettingsError::Write {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;
        fs::write(path, json).map_err(write_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_then_load_preserves_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("settings.json");
        let settings = Settings {
            engine_program: "/opt/ffmpeg/bin/ffmpeg".to_string(),
            parameters: TransformParameters {
                loop_count: Some(20),
                skip_eq: true,
                rain_asset: None,
                ..TransformParameters::default()
            },
        };

        settings.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_empty_object_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        fs::write(&path, "{}").unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded, Settings::default());
        assert_eq!(loaded.engine_program, "ffmpeg");
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let tmp = TempDir::new().unwrap();
        let result = Settings::load_from(&tmp.path().join("absent.json"));
        assert!(matches!(result, Err(SettingsError::Read { .. })));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        fs::write(&path, "{ tempo_factor: ").unwrap();

        let result = Settings::load_from(&path);
        assert!(matches!(result, Err(SettingsError::Parse { .. })));
    }

    #[test]
    fn test_config_path_is_under_app_folder() {
        if let Some(path) = Settings::config_path() {
            assert!(path.to_string_lossy().contains("Lofi Pipeline"));
            assert!(path.ends_with("settings.json"));
        }
    }
}
