use std::path::Path;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{NycError, Result};

/// Env var naming the config file.
pub const CONFIG_PATH_VAR: &str = "NYC_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "name_your_calories.toml";

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Result-count hint sent with item fetches.
    #[serde(default = "default_item_count")]
    pub item_count: usize,

    /// Result-count hint sent with combo fetches.
    #[serde(default = "default_combo_count")]
    pub combo_count: usize,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_server_url() -> String {
    "http://127.0.0.1:5050".to_string()
}

fn default_item_count() -> usize {
    20
}

fn default_combo_count() -> usize {
    3
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            item_count: default_item_count(),
            combo_count: default_combo_count(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Settings {
    /// Load from the optional config file, then `NYC__*` environment overrides.
    pub fn new() -> Result<Self> {
        let config_path =
            std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::from_path(Path::new(&config_path))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("NYC").separator("__"))
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.server_url.is_empty() {
            return Err(NycError::Config("server_url is required".to_string()));
        }
        if !(self.server_url.starts_with("http://") || self.server_url.starts_with("https://")) {
            return Err(NycError::Config(
                "server_url must be a valid HTTP(S) URL".to_string(),
            ));
        }
        if self.item_count == 0 || self.combo_count == 0 {
            return Err(NycError::Config(
                "item_count and combo_count must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::from_path(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings.server_url, "http://127.0.0.1:5050");
        assert_eq!(settings.item_count, 20);
        assert_eq!(settings.combo_count, 3);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "server_url = \"http://menu.local:8080\"").unwrap();
        writeln!(file, "combo_count = 5").unwrap();

        let settings = Settings::from_path(file.path()).unwrap();
        assert_eq!(settings.server_url, "http://menu.local:8080");
        assert_eq!(settings.combo_count, 5);
        assert_eq!(settings.item_count, 20);
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let settings = Settings {
            server_url: "ftp://menu".to_string(),
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let empty = Settings {
            server_url: String::new(),
            ..Default::default()
        };
        assert!(empty.validate().is_err());

        let no_scheme = Settings {
            server_url: "httpfoo".to_string(),
            ..Default::default()
        };
        assert!(no_scheme.validate().is_err());

        let https = Settings {
            server_url: "https://menu.example".to_string(),
            ..Default::default()
        };
        assert!(https.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_counts() {
        let settings = Settings {
            combo_count: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
