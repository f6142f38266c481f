//! Config module.
//! Loads the registry inputs: data root, date literals and tiling constants.
//! Sources, lowest to highest precedence: built-in defaults, an optional JSON
//! file, then the `DATA_PATH` environment variable.
//! Values are validated when a `Registry` is built from them, not here.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{RegistryError, Result};
use crate::spatial::{BASE_UNIT, BOX_SCALE, INPUT_BOX_SIZE};

/// Environment variable holding the data root
pub const DATA_PATH_ENV: &str = "DATA_PATH";
pub const DEFAULT_DATA_PATH: &str = "data";
pub const DEFAULT_START_DATE: &str = "2016-07-01";
pub const DEFAULT_END_DATE: &str = "2023-06-30";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub data_path: PathBuf,
    pub start_date: String,
    pub end_date: String,
    pub base_unit: f64,
    pub box_scale: f64,
    pub input_box_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            start_date: DEFAULT_START_DATE.to_string(),
            end_date: DEFAULT_END_DATE.to_string(),
            base_unit: BASE_UNIT,
            box_scale: BOX_SCALE,
            input_box_size: INPUT_BOX_SIZE,
        }
    }
}

impl Config {
    /// Defaults, overlaid with `file` if given, overlaid with `DATA_PATH` if set.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let base = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(base.with_env_root(std::env::var_os(DATA_PATH_ENV)))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| RegistryError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&contents).map_err(|source| RegistryError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    pub fn from_json(contents: &str) -> serde_json::Result<Self> {
        serde_json::from_str(contents)
    }

    /// Applies an environment-provided root. Unset or empty values leave the root unchanged.
    pub fn with_env_root(mut self, value: Option<OsString>) -> Self {
        match value {
            Some(root) if !root.is_empty() => {
                debug!(root = ?root, "data root taken from {}", DATA_PATH_ENV);
                self.data_path = PathBuf::from(root);
            }
            Some(_) => {
                warn!(
                    "{} is set but empty, keeping {}",
                    DATA_PATH_ENV,
                    self.data_path.display()
                );
            }
            None => {}
        }
        self
    }

    pub fn with_data_path(mut self, root: impl Into<PathBuf>) -> Self {
        self.data_path = root.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.data_path, PathBuf::from("data"));
        assert_eq!(config.start_date, "2016-07-01");
        assert_eq!(config.end_date, "2023-06-30");
        assert_eq!(config.input_box_size, 64);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{ "data_path": "/mnt/lake" }"#).unwrap();
        assert_eq!(config.data_path, PathBuf::from("/mnt/lake"));
        assert_eq!(config.end_date, DEFAULT_END_DATE);
        assert_eq!(config.box_scale, BOX_SCALE);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::from_json(r#"{ "data_pth": "/mnt/lake" }"#).is_err());
    }

    #[test]
    fn test_env_root_precedence() {
        let config = Config::default().with_data_path("/from/file");
        let overridden = config.clone().with_env_root(Some(OsString::from("/from/env")));
        assert_eq!(overridden.data_path, PathBuf::from("/from/env"));

        let unchanged = config.clone().with_env_root(Some(OsString::new()));
        assert_eq!(unchanged.data_path, PathBuf::from("/from/file"));
        assert_eq!(config.clone().with_env_root(None), config);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "start_date": "2018-01-01", "input_box_size": 128 }}"#).unwrap();
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.start_date, "2018-01-01");
        assert_eq!(config.input_box_size, 128);
    }

    #[test]
    fn test_from_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        assert!(matches!(
            Config::from_file(&missing),
            Err(RegistryError::ConfigRead { .. })
        ));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(
            Config::from_file(&broken),
            Err(RegistryError::ConfigParse { .. })
        ));
    }
}
