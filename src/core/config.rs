//! Blog generation configuration from YAML

use crate::agent::client::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration; every field has a default so the file is optional
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BlogConfig {
    /// Hosted model settings
    pub model: ModelConfig,

    /// Number of writer/reviewer/SEO rounds
    pub iterations: u32,

    /// Directory output files are written to
    pub output_dir: PathBuf,

    /// Content targets quoted in the prompts
    pub targets: ContentTargets,

    /// Web research before the first draft
    pub research: ResearchConfig,
}

/// Hosted model settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
    pub name: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub base_url: String,
    pub timeout_secs: u64,
}

/// Targets the writer is asked to meet and the reviewer checks against
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ContentTargets {
    pub min_words: usize,
    pub code_examples: usize,
    pub tables: usize,
    pub sections: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ResearchConfig {
    pub enabled: bool,
    pub max_results: usize,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            iterations: 3,
            output_dir: PathBuf::from("output"),
            targets: ContentTargets::default(),
            research: ResearchConfig::default(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: "gpt-4o".to_string(),
            temperature: 0.2,
            max_tokens: 16000,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 600,
        }
    }
}

impl Default for ContentTargets {
    fn default() -> Self {
        Self {
            min_words: 6000,
            code_examples: 5,
            tables: 3,
            sections: 8,
        }
    }
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_results: 10,
        }
    }
}

impl BlogConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to a defaulted struct.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: BlogConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 {
            return Err(ConfigError::Invalid(
                "iterations must be at least 1".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.model.temperature) {
            return Err(ConfigError::Invalid(format!(
                "model.temperature must be between 0 and 2, got {}",
                self.model.temperature
            )));
        }
        if self.model.max_tokens == 0 {
            return Err(ConfigError::Invalid(
                "model.max_tokens must be at least 1".to_string(),
            ));
        }
        if self.model.name.trim().is_empty() {
            return Err(ConfigError::Invalid("model.name must not be empty".to_string()));
        }
        Ok(())
    }
}
