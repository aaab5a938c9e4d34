//! Runtime configuration, read from TOML.
//!
//! Every field has a default, so an empty file (or no file) is a valid config.

use crate::error::Result;
use crate::models::learning_path::{
    DEFAULT_CHALLENGE_LIMIT, DEFAULT_PATH_LIMIT, DEFAULT_QUICK_WINS_LIMIT, DEFAULT_REVIEW_LIMIT,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming a config file to load.
pub const CONFIG_ENV: &str = "KEYDRILL_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeydrillConfig {
    pub storage: StorageConfig,
    pub paths: PathConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite file holding progress.
    pub db_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("keydrill.sqlite3"),
        }
    }
}

/// Maximum number of shortcuts per learning path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    pub default_limit: usize,
    pub quick_wins_limit: usize,
    pub challenge_limit: usize,
    pub review_limit: usize,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_PATH_LIMIT,
            quick_wins_limit: DEFAULT_QUICK_WINS_LIMIT,
            challenge_limit: DEFAULT_CHALLENGE_LIMIT,
            review_limit: DEFAULT_REVIEW_LIMIT,
        }
    }
}

impl KeydrillConfig {
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_toml(&fs::read_to_string(path)?)
    }

    /// Loads the file named by `KEYDRILL_CONFIG`, or defaults when unset.
    pub fn from_env() -> Result<Self> {
        match env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = KeydrillConfig::from_toml("").unwrap();
        assert_eq!(config.storage.db_path, PathBuf::from("keydrill.sqlite3"));
        assert_eq!(config.paths.default_limit, 20);
        assert_eq!(config.paths.quick_wins_limit, 10);
        assert_eq!(config.paths.challenge_limit, 10);
        assert_eq!(config.paths.review_limit, 15);
    }

    #[test]
    fn test_partial_override() {
        let config = KeydrillConfig::from_toml(
            r#"
            [storage]
            db_path = "/tmp/progress.db"

            [paths]
            review_limit = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.storage.db_path, PathBuf::from("/tmp/progress.db"));
        assert_eq!(config.paths.review_limit, 5);
        assert_eq!(config.paths.default_limit, 20);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(KeydrillConfig::from_toml("[paths]\nreview_limit = \"many\"").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keydrill.toml");
        fs::write(&path, "[paths]\ndefault_limit = 3\n").unwrap();
        assert_eq!(KeydrillConfig::load(&path).unwrap().paths.default_limit, 3);
    }
}
