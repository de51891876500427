//! Configuration management module.
//!
//! This module handles loading, saving, and managing application configuration,
//! including the database location, credentials, theme and timing preferences.

mod error;

pub use error::ConfigError;

use crate::error::AppError;
use crate::ui::Theme;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    str::FromStr,
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/menu-tui";

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: Option<String>,
    pub auth_token: Option<String>,
    pub theme_name: String,
    pub log_level: String,
    pub save_delay_ms: u64,
    pub reconnect_delay_ms: u64,
    file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    #[serde(default = "default_theme_name")]
    pub theme_name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_save_delay_ms")]
    pub save_delay_ms: u64,
    #[serde(default = "default_reconnect_delay_ms")]
    pub reconnect_delay_ms: u64,
}

fn default_theme_name() -> String {
    "rose-pine-dawn".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_save_delay_ms() -> u64 {
    500
}

fn default_reconnect_delay_ms() -> u64 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Return a new instance with default values and no file.
    ///
    pub fn new() -> Config {
        Config {
            database_url: None,
            auth_token: None,
            theme_name: default_theme_name(),
            log_level: default_log_level(),
            save_delay_ms: default_save_delay_ms(),
            reconnect_delay_ms: default_reconnect_delay_ms(),
            file_path: None,
        }
    }

    /// Load the configuration from the default directory or `custom_path`.
    /// A missing file leaves the defaults in place; the directory is created
    /// so the file can be saved later.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
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
            self.database_url = data.database_url;
            self.auth_token = data.auth_token;
            self.theme_name = data.theme_name;
            self.log_level = data.log_level;
            self.save_delay_ms = data.save_delay_ms;
            self.reconnect_delay_ms = data.reconnect_delay_ms;
        }

        // Fail early on a bad level rather than when the logger starts
        self.log_level_filter()?;
        Ok(())
    }

    /// Serialize the configuration and write it to the loaded file path.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let data = FileSpec {
            database_url: self.database_url.clone(),
            auth_token: self.auth_token.clone(),
            theme_name: self.theme_name.clone(),
            log_level: self.log_level.clone(),
            save_delay_ms: self.save_delay_ms,
            reconnect_delay_ms: self.reconnect_delay_ms,
        };
        let content = serde_yaml::to_string(&data)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::CreateDirectoryFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let mut file = fs::File::create(file_path).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    /// Override the database URL and persist it.
    ///
    pub fn save_database_url(&mut self, url: &str) -> Result<(), AppError> {
        self.database_url = Some(url.trim_end_matches('/').to_string());
        self.save()
    }

    /// Return the database URL or an error when none is configured.
    ///
    pub fn database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::DatabaseUrlNotSet)
    }

    /// Return the configured maximum log level.
    ///
    pub fn log_level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.to_owned()))
    }

    /// Return the configured theme, falling back to the default for unknown
    /// names.
    ///
    pub fn theme(&self) -> Theme {
        Theme::from_name(&self.theme_name).unwrap_or_else(|| {
            log::warn!("Unknown theme '{}', using default", self.theme_name);
            Theme::default()
        })
    }

    /// Returns the path buffer for the default path to the configuration file
    /// or an error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => {
                let home_path = Path::new(&home);
                let default_config_path = Path::new(DEFAULT_DIRECTORY_PATH);
                Ok(home_path.join(default_config_path))
            }
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("menu-tui-{}-{}", std::process::id(), name));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn defaults_without_file() {
        let dir = temp_dir("defaults");
        let mut config = Config::new();
        config.load(dir.to_str()).unwrap();
        assert!(dir.exists());
        assert_eq!(config.save_delay_ms, 500);
        assert_eq!(config.reconnect_delay_ms, 3000);
        assert_eq!(config.log_level_filter().unwrap(), LevelFilter::Info);
        assert!(matches!(
            config.database_url(),
            Err(ConfigError::DatabaseUrlNotSet)
        ));
    }

    #[test]
    fn load_partial_file() {
        let dir = temp_dir("partial");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(FILE_NAME),
            "database_url: https://shop-default-rtdb.firebaseio.com\nlog_level: debug\n",
        )
        .unwrap();
        let mut config = Config::new();
        config.load(dir.to_str()).unwrap();
        assert_eq!(
            config.database_url().unwrap(),
            "https://shop-default-rtdb.firebaseio.com"
        );
        assert!(config.auth_token.is_none());
        assert_eq!(config.log_level_filter().unwrap(), LevelFilter::Debug);
        assert_eq!(config.theme_name, "rose-pine-dawn");
    }

    #[test]
    fn save_round_trip() {
        let dir = temp_dir("round-trip");
        let mut config = Config::new();
        config.load(dir.to_str()).unwrap();
        config.auth_token = Some("secret".to_string());
        config.save_delay_ms = 0;
        config
            .save_database_url("https://shop-default-rtdb.firebaseio.com/")
            .unwrap();

        let mut reloaded = Config::new();
        reloaded.load(dir.to_str()).unwrap();
        assert_eq!(
            reloaded.database_url.as_deref(),
            Some("https://shop-default-rtdb.firebaseio.com")
        );
        assert_eq!(reloaded.auth_token.as_deref(), Some("secret"));
        assert_eq!(reloaded.save_delay_ms, 0);
    }

    #[test]
    fn invalid_log_level() {
        let dir = temp_dir("bad-level");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(FILE_NAME), "log_level: loud\n").unwrap();
        let mut config = Config::new();
        let result = config.load(dir.to_str());
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::InvalidLogLevel(_)))
        ));
    }

    #[test]
    fn save_without_path() {
        assert!(Config::new().save().is_err());
    }

    #[test]
    fn unknown_theme_falls_back() {
        let config = Config {
            theme_name: "neon".to_string(),
            ..Config::new()
        };
        assert_eq!(config.theme().name, Theme::default().name);
    }
}
