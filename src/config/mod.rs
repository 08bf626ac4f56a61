//! Configuration management module.
//!
//! This module handles loading and saving the registration endpoint
//! configuration, primarily the backend base URL.

mod error;

pub use error::ConfigError;

use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/signup-form";
const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Oversees management of the configuration file.
///
#[derive(Clone)]
pub struct Config {
    pub base_url: String,
    file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for Config {
    fn default() -> Config {
        Config::new()
    }
}

impl Config {
    /// Return a new instance with the default backend URL.
    ///
    pub fn new() -> Config {
        Config {
            base_url: default_base_url(),
            file_path: None,
        }
    }

    /// Try to load an existing configuration from disk using the custom path
    /// if provided, falling back to defaults when no file exists yet.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), ConfigError> {
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };

        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| ConfigError::CreateDirectoryFailed {
                path: dir_path.clone(),
                source: e,
            })?;
        }

        self.file_path = Some(dir_path.join(Path::new(FILE_NAME)));
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;

        if file_path.exists() {
            let contents = fs::read_to_string(file_path).map_err(|e| ConfigError::LoadFailed {
                path: file_path.clone(),
                message: format!("IO error: {}", e),
            })?;
            let data: FileSpec = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
            self.base_url = data.base_url;
        }

        Ok(())
    }

    /// Attempt to serialize the configuration data and write it to disk.
    ///
    pub fn save(&self) -> Result<(), ConfigError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;

        let data = FileSpec {
            base_url: self.base_url.clone(),
        };
        let contents = serde_yaml::to_string(&data)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        let mut file = fs::File::create(file_path).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        file.write_all(contents.as_bytes())
            .map_err(|e| ConfigError::SaveFailed {
                path: file_path.clone(),
                source: e,
            })?;

        Ok(())
    }

    /// Return the default configuration directory path.
    ///
    fn default_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeDirectoryNotFound)?;
        Ok(home.join(DEFAULT_DIRECTORY_PATH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_config_uses_default_url() {
        let config = Config::new();
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn missing_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::new();
        config.load(dir.path().to_str()).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::new();
        config.load(dir.path().to_str()).unwrap();
        config.base_url = "https://accounts.example.com".to_string();
        config.save().unwrap();

        let mut reloaded = Config::new();
        reloaded.load(dir.path().to_str()).unwrap();
        assert_eq!(reloaded.base_url, "https://accounts.example.com");
    }

    #[test]
    fn save_without_load_fails() {
        let config = Config::new();
        assert!(matches!(config.save(), Err(ConfigError::FilePathNotSet)));
    }
}
