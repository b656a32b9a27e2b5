// TOML config adapter - Configuration management using TOML files

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::burn::BurnSettings;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::naming::NamingOptions;
use crate::utils::logging::LoggingConfig;

/// Config file looked up in the working directory when none is named
pub const DEFAULT_CONFIG_FILE: &str = "subpick.toml";

/// Media extensions scanned by batch runs
pub const DEFAULT_EXTENSIONS: [&str; 7] = ["mkv", "mp4", "m4v", "mov", "avi", "webm", "ts"];

/// Whole application configuration, one section per concern
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub selection: SelectionConfig,
    pub burn: BurnSettings,
    pub naming: NamingOptions,
    pub logging: LoggingConfig,
    pub batch: BatchConfig,
}

/// `[selection]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    pub codec: String,
    pub language: String,
    pub keywords: KeywordsSetting,
    pub fallback_index: FallbackSetting,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            codec: DEFAULT_CODEC.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            keywords: KeywordsSetting::List(DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()),
            fallback_index: FallbackSetting::Number(-1),
        }
    }
}

impl SelectionConfig {
    /// Build the selection policy described by this section
    pub fn to_policy(&self) -> Result<SelectionPolicy, DomainError> {
        Ok(SelectionPolicy::new(&self.codec, &self.language)
            .with_keywords(self.keywords.to_list())
            .with_fallback(self.fallback_index.resolve()?))
    }
}

/// Keywords as a TOML array or a comma-separated string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeywordsSetting {
    List(Vec<String>),
    Csv(String),
}

impl KeywordsSetting {
    pub fn to_list(&self) -> Vec<String> {
        match self {
            KeywordsSetting::List(list) => list.clone(),
            KeywordsSetting::Csv(raw) => parse_keyword_list(raw),
        }
    }
}

/// Fallback as an integer (negative disables) or a string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FallbackSetting {
    Number(i64),
    Text(String),
}

impl FallbackSetting {
    pub fn resolve(&self) -> Result<FallbackIndex, DomainError> {
        match self {
            FallbackSetting::Number(n) => Ok(FallbackIndex::from_signed(*n)),
            FallbackSetting::Text(raw) => raw
                .parse()
                .map_err(|e: DomainError| DomainError::ConfigFail(e.to_string())),
        }
    }
}

/// `[batch]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub extensions: Vec<String>,
    /// Concurrent files; defaults to the number of CPUs
    pub jobs: Option<usize>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            jobs: None,
        }
    }
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Load configuration.
    ///
    /// An explicitly named file must exist. Without one, `subpick.toml` in
    /// the working directory is used when present, defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<AppConfig, DomainError> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(DomainError::ConfigFail(format!(
                        "Config file does not exist: {}",
                        path.display()
                    )));
                }
                Self::load_file(path)
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load_file(&default_path)
                } else {
                    debug!("No config file found, using defaults");
                    Ok(AppConfig::default())
                }
            }
        }
    }

    /// Load and validate a config file
    pub fn load_file(path: &Path) -> Result<AppConfig, DomainError> {
        info!("Loading configuration from: {}", path.display());
        let content = std::fs::read_to_string(path)
            .map_err(|e| DomainError::ConfigFail(format!("Failed to read config file: {}", e)))?;
        let config = Self::deserialize_config(&content)?;
        Self::validate_config(&config)?;
        Ok(config)
    }

    /// Deserialize config from TOML string
    pub fn deserialize_config(toml_content: &str) -> Result<AppConfig, DomainError> {
        toml::from_str(toml_content)
            .map_err(|e| DomainError::ConfigFail(format!("Failed to parse TOML config: {}", e)))
    }

    /// Serialize config to TOML string
    pub fn serialize_config(config: &AppConfig) -> Result<String, DomainError> {
        toml::to_string_pretty(config)
            .map_err(|e| DomainError::ConfigFail(format!("Failed to serialize config: {}", e)))
    }

    /// Validate values serde cannot check on its own
    pub fn validate_config(config: &AppConfig) -> Result<(), DomainError> {
        crate::ports::LogLevel::parse(&config.logging.level)
            .map_err(|e| DomainError::ConfigFail(e.to_string()))?;

        config.selection.fallback_index.resolve()?;

        if config.batch.jobs == Some(0) {
            return Err(DomainError::ConfigFail(
                "batch.jobs must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
