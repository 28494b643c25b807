use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

use crate::util::version::APP_NAME;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "PriceCalculator";
const APP_DIR: &str = "PriceCalculator";

const ENV_TITLE: &str = "PRICE_CALC_TITLE";
const ENV_LOG: &str = "PRICE_CALC_LOG";
const ENV_VAT: &str = "PRICE_CALC_VAT";

/// Startup settings. Read once; nothing here is written back.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window_title: String,
    pub log_filter: String,
    pub log_json: bool,
    pub vat_enabled_by_default: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_title: APP_NAME.to_string(),
            log_filter: "info".to_string(),
            log_json: false,
            vat_enabled_by_default: false,
        }
    }
}

impl AppConfig {
    /// Loads `config.toml` from the platform config directory and applies
    /// environment overrides. Falls back to defaults when the file is absent.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match config_file() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(data) => Self::from_toml(&data),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn from_toml(data: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(data)?)
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(title) = lookup(ENV_TITLE).filter(|value| !value.trim().is_empty()) {
            self.window_title = title;
        }
        if let Some(filter) = lookup(ENV_LOG).filter(|value| !value.trim().is_empty()) {
            self.log_filter = filter;
        }
        if let Some(flag) = lookup(ENV_VAT).and_then(|value| parse_flag(&value)) {
            self.vat_enabled_by_default = flag;
        }
    }
}

pub fn config_file() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_DIR)
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        assert_eq!(AppConfig::from_toml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = AppConfig::from_toml("vat_enabled_by_default = true\nlog_json = true\n").unwrap();
        assert!(config.vat_enabled_by_default);
        assert!(config.log_json);
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.window_title, APP_NAME);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(matches!(
            AppConfig::from_toml("log_json = \"maybe\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("price-calculator-no-such-config.toml");
        assert_eq!(AppConfig::from_file(&path).unwrap(), AppConfig::default());
    }

    #[test]
    fn env_overrides_file_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_TITLE, "Kalkulator"),
            (ENV_LOG, "debug"),
            (ENV_VAT, "yes"),
        ]);
        let mut config = AppConfig::default();
        config.apply_env(|key| env.get(key).map(|value| value.to_string()));
        assert_eq!(config.window_title, "Kalkulator");
        assert_eq!(config.log_filter, "debug");
        assert!(config.vat_enabled_by_default);
    }

    #[test]
    fn unrecognised_vat_flag_is_ignored() {
        let mut config = AppConfig {
            vat_enabled_by_default: true,
            ..AppConfig::default()
        };
        config.apply_env(|key| (key == ENV_VAT).then(|| "sometimes".to_string()));
        assert!(config.vat_enabled_by_default);
    }
}
