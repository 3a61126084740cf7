//! Bridge configuration files (alpm-bridge.toml, ~/.alpm-bridge/config.toml)
//!
//! Both files share one schema; the loader merges them.

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default answer to "install this ignored package?"
pub const DEFAULT_INSTALL_IGNORED: bool = false;
/// Default answer to "replace this package?"
pub const DEFAULT_REPLACE: bool = false;
/// Default provider picked when several packages satisfy a dependency
pub const DEFAULT_PROVIDER_INDEX: i32 = 0;
/// Default answer for every other question
pub const DEFAULT_ANSWER: bool = false;

/// Contents of a bridge configuration file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct BridgeConfig {
    /// Question answers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answers: Option<AnswersConfig>,
}

/// Answers given to libalpm questions
///
/// Every field is optional so that a project file can override a single
/// answer from the global file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct AnswersConfig {
    /// Install packages listed in IgnorePkg when a transaction pulls them in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_ignored: Option<bool>,

    /// Accept package replacements offered during a sysupgrade
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace: Option<bool>,

    /// Index into the provider list when a dependency has several providers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_index: Option<i32>,

    /// Answer for question types without a dedicated setting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_answer: Option<bool>,
}

impl AnswersConfig {
    /// Effective install-ignored answer
    pub fn install_ignored(&self) -> bool {
        self.install_ignored.unwrap_or(DEFAULT_INSTALL_IGNORED)
    }

    /// Effective replace answer
    pub fn replace(&self) -> bool {
        self.replace.unwrap_or(DEFAULT_REPLACE)
    }

    /// Effective provider index
    pub fn provider_index(&self) -> i32 {
        self.provider_index.unwrap_or(DEFAULT_PROVIDER_INDEX)
    }

    /// Effective fallback answer
    pub fn default_answer(&self) -> bool {
        self.default_answer.unwrap_or(DEFAULT_ANSWER)
    }

    /// Overlay `other` onto `self`, field by field
    pub fn merge(&mut self, other: &AnswersConfig) {
        if other.install_ignored.is_some() {
            self.install_ignored = other.install_ignored;
        }
        if other.replace.is_some() {
            self.replace = other.replace;
        }
        if other.provider_index.is_some() {
            self.provider_index = other.provider_index;
        }
        if other.default_answer.is_some() {
            self.default_answer = other.default_answer;
        }
    }

    /// Validate answer values
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(index) = self.provider_index {
            validate_provider_index("answers.provider_index", index)?;
        }
        Ok(())
    }
}

impl BridgeConfig {
    /// Load a configuration file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        Self::parse(&content, path)
    }

    /// Parse configuration text; `origin` is only used in error messages
    pub fn parse(content: &str, origin: &Path) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::TomlParseError {
            file: origin.to_path_buf(),
            error: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(answers) = &self.answers {
            answers.validate()?;
        }
        Ok(())
    }

    /// Get the global config file path (~/.alpm-bridge/config.toml)
    pub fn global_config_path() -> ConfigResult<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        Ok(home.join(".alpm-bridge").join("config.toml"))
    }

    /// Merge another config into this one
    /// Other config takes precedence for non-None values
    pub fn merge(&mut self, other: &BridgeConfig) {
        if let Some(theirs) = &other.answers {
            self.answers
                .get_or_insert_with(AnswersConfig::default)
                .merge(theirs);
        }
    }
}

pub(crate) fn validate_provider_index(field: &str, index: i32) -> ConfigResult<()> {
    if index < 0 {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("must be zero or positive, got {}", index),
        });
    }
    Ok(())
}
