//! Configuration system for the board engine
//!
//! Loads engine settings from a TOML file: where the SQLite database lives
//! and how the automation rules behave.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Main engine configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    pub storage: StorageSection,
    #[serde(default)]
    pub automation: AutomationSection,
}

/// Storage section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageSection {
    /// Path to the SQLite database file, or ":memory:" for an ephemeral store
    pub path: String,
}

/// Automation section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AutomationSection {
    /// Run the assignment policy on backlog-to-active transitions
    #[serde(default = "default_auto_assign")]
    pub auto_assign: bool,
    /// Maximum parent-chain length tolerated by the ancestry check
    #[serde(default = "default_max_parent_depth")]
    pub max_parent_depth: usize,
}

fn default_auto_assign() -> bool {
    true
}

fn default_max_parent_depth() -> usize {
    32
}

impl Default for AutomationSection {
    fn default() -> Self {
        Self {
            auto_assign: default_auto_assign(),
            max_parent_depth: default_max_parent_depth(),
        }
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl EngineConfig {
    /// Load configuration from a TOML file and validate it
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: EngineConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.path.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "storage.path must not be empty".to_string(),
            ));
        }
        if self.automation.max_parent_depth == 0 {
            return Err(ConfigError::InvalidConfig(
                "automation.max_parent_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// In-memory configuration for unit testing
    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            storage: StorageSection {
                path: ":memory:".to_string(),
            },
            automation: AutomationSection::default(),
        }
    }
}
