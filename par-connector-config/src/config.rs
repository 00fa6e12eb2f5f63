//! The connector configuration document and its persistence.
//!
//! Covers:
//! - `load` / `load_from` / `save_to` (YAML file I/O with atomic write)
//! - XDG-style path helpers (`config_path`, `config_dir`)
//! - `validate`, run after every load

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::defaults;
use crate::error::ConfigError;
use crate::types::LogLevel;

/// Retry policy for generative-answer requests made before the panel is ready.
///
/// The delay doubles on every attempt, starting at `retry_delay_ms` and
/// capped at `max_retry_delay_ms`. After `max_attempts` deferrals the request
/// is abandoned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessConfig {
    #[serde(default = "defaults::retry_delay_ms")]
    pub retry_delay_ms: u64,
    #[serde(default = "defaults::max_retry_delay_ms")]
    pub max_retry_delay_ms: u64,
    #[serde(default = "defaults::max_attempts")]
    pub max_attempts: u32,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            retry_delay_ms: defaults::retry_delay_ms(),
            max_retry_delay_ms: defaults::max_retry_delay_ms(),
            max_attempts: defaults::max_attempts(),
        }
    }
}

/// `sender` values that route host payloads to each handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SenderTags {
    #[serde(default = "defaults::chat_sender")]
    pub chat: String,
    #[serde(default = "defaults::feature_dev_sender")]
    pub feature_dev: String,
    #[serde(default = "defaults::code_transform_sender")]
    pub code_transform: String,
    #[serde(default = "defaults::commons_sender")]
    pub commons: String,
}

impl Default for SenderTags {
    fn default() -> Self {
        Self {
            chat: defaults::chat_sender(),
            feature_dev: defaults::feature_dev_sender(),
            code_transform: defaults::code_transform_sender(),
            commons: defaults::commons_sender(),
        }
    }
}

impl SenderTags {
    fn all(&self) -> [(&'static str, &str); 4] {
        [
            ("chat", self.chat.as_str()),
            ("feature_dev", self.feature_dev.as_str()),
            ("code_transform", self.code_transform.as_str()),
            ("commons", self.commons.as_str()),
        ]
    }
}

/// Top-level connector configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorConfig {
    #[serde(default = "defaults::log_level")]
    pub log_level: LogLevel,
    #[serde(default)]
    pub readiness: ReadinessConfig,
    #[serde(default)]
    pub senders: SenderTags,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level(),
            readiness: ReadinessConfig::default(),
            senders: SenderTags::default(),
        }
    }
}

impl ConnectorConfig {
    /// Load configuration from the default path, or defaults if the file is missing.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, or defaults if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!("Config file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }

        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path)?;
        let config = Self::from_yaml(&contents)?;
        Ok(config)
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        // An empty file deserializes to unit, not a mapping.
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml_ng::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let yaml = self.to_yaml()?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Check semantic constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let readiness = &self.readiness;
        if readiness.retry_delay_ms == 0 {
            return Err(ConfigError::Validation(
                "readiness.retry_delay_ms must be greater than 0".to_string(),
            ));
        }
        if readiness.max_attempts == 0 {
            return Err(ConfigError::Validation(
                "readiness.max_attempts must be greater than 0".to_string(),
            ));
        }
        if readiness.max_retry_delay_ms < readiness.retry_delay_ms {
            return Err(ConfigError::Validation(format!(
                "readiness.max_retry_delay_ms ({}) is below retry_delay_ms ({})",
                readiness.max_retry_delay_ms, readiness.retry_delay_ms
            )));
        }

        let tags = self.senders.all();
        for (i, (name, tag)) in tags.iter().enumerate() {
            if tag.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "senders.{name} must not be empty"
                )));
            }
            if let Some((other, _)) = tags[..i].iter().find(|(_, t)| t == tag) {
                return Err(ConfigError::Validation(format!(
                    "senders.{name} duplicates senders.{other} ({tag})"
                )));
            }
        }

        Ok(())
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("par-connector")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("par-connector")
            } else {
                PathBuf::from(".")
            }
        }
    }
}
