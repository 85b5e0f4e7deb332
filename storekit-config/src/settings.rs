//! Where product documents are read from, with environment variable support

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{ENV_PREFIX, STORE_CONFIGURATION};
use crate::document::PropertyFile;
use crate::error::{ConfigError, ConfigResult};
use crate::validation::{validate_bare_name, validate_required_string, Validatable};

/// Location of the product configuration document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Directory searched for configuration documents
    #[serde(default = "default_config_dir")]
    pub config_dir: PathBuf,

    /// Document name, with or without a file extension
    #[serde(default = "default_config_name")]
    pub config_name: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            config_dir: default_config_dir(),
            config_name: default_config_name(),
        }
    }
}

impl StoreSettings {
    /// Document reader rooted at the configured directory
    pub fn property_file(&self) -> PropertyFile {
        PropertyFile::new(&self.config_dir)
    }
}

impl Validatable for StoreSettings {
    fn validate(&self) -> ConfigResult<()> {
        validate_bare_name(&self.config_name, "config_name", self.domain_name())?;
        validate_required_string(
            &self.config_dir.to_string_lossy(),
            "config_dir",
            self.domain_name(),
        )?;
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "settings"
    }
}

fn default_config_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_config_name() -> String {
    STORE_CONFIGURATION.to_string()
}

/// Settings loader with environment variable support
pub struct SettingsLoader {
    /// Environment variable prefix
    prefix: String,
}

impl SettingsLoader {
    /// Create a new settings loader with the default prefix
    pub fn new() -> Self {
        Self {
            prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Create a new settings loader with a custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Load settings from a YAML file with environment overrides
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<StoreSettings> {
        let content = std::fs::read_to_string(path)?;
        let mut settings: StoreSettings = serde_yaml::from_str(&content)?;

        self.apply_env_overrides(&mut settings)?;
        settings.validate()?;

        Ok(settings)
    }

    /// Load settings from environment variables only
    pub fn from_env(&self) -> ConfigResult<StoreSettings> {
        let mut settings = StoreSettings::default();
        self.apply_env_overrides(&mut settings)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings with fallback chain
    pub fn load(&self, settings_path: Option<impl AsRef<Path>>) -> ConfigResult<StoreSettings> {
        match settings_path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    fn apply_env_overrides(&self, settings: &mut StoreSettings) -> ConfigResult<()> {
        if let Some(dir) = self.get_env_var("CONFIG_DIR")? {
            settings.config_dir = PathBuf::from(dir);
        }

        if let Some(name) = self.get_env_var("CONFIG_NAME")? {
            settings.config_name = name;
        }

        Ok(())
    }

    /// Get environment variable with prefix; unset is `None`, non-unicode is an error
    fn get_env_var(&self, name: &str) -> ConfigResult<Option<String>> {
        let key = format!("{}_{}", self.prefix, name);
        match std::env::var(&key) {
            Ok(value) => Ok(Some(value)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(e) => Err(ConfigError::EnvError(format!("Invalid {}: {}", key, e))),
        }
    }
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = StoreSettings::default();
        assert_eq!(settings.config_name, "Products");
        assert_eq!(settings.config_dir, PathBuf::from("."));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_paths_as_names() {
        let settings = StoreSettings {
            config_name: "nested/Products".to_string(),
            ..StoreSettings::default()
        };
        assert!(settings.validate().is_err());

        let settings = StoreSettings {
            config_dir: PathBuf::new(),
            ..StoreSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let settings: StoreSettings = serde_yaml::from_str("config_name: Store\n").unwrap();
        assert_eq!(settings.config_name, "Store");
        assert_eq!(settings.config_dir, PathBuf::from("."));
    }
}
