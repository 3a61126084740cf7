//! Configuration Loader
//!
//! Handles loading and merging configuration from multiple sources with proper precedence.

use crate::answers::{validate_provider_index, AnswersConfig, BridgeConfig};
use crate::{ConfigError, ConfigResult};
use std::env;
use std::path::{Path, PathBuf};

/// Name of the project-level configuration file
pub const PROJECT_CONFIG_FILE: &str = "alpm-bridge.toml";

/// Configuration loader
///
/// Loads configuration from multiple sources and merges them with proper precedence:
/// 1. Global config (~/.alpm-bridge/config.toml) - lowest priority
/// 2. Project config (./alpm-bridge.toml) - overrides global
/// 3. Environment variables (ALPM_BRIDGE_*) - overrides project
pub struct ConfigLoader {
    /// Cached global config path
    global_config_path: Option<PathBuf>,
}

/// Merged configuration result
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Merged bridge configuration
    pub bridge: BridgeConfig,

    /// Directory where alpm-bridge.toml was found
    pub project_root: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            global_config_path: None,
        }
    }

    /// Use `path` instead of ~/.alpm-bridge/config.toml
    pub fn with_global_config_path(path: impl Into<PathBuf>) -> Self {
        Self {
            global_config_path: Some(path.into()),
        }
    }

    /// Load configuration starting from the given directory
    ///
    /// Walks up the directory tree to find alpm-bridge.toml, merges it over the
    /// global config if one exists, then applies environment overrides.
    pub fn load_from_directory(&mut self, start_dir: &Path) -> ConfigResult<Config> {
        let (project_root, project_config) = self.find_project_config(start_dir)?;
        self.assemble(project_root, project_config)
    }

    /// Load configuration from a specific project config file
    pub fn load_from_file(&mut self, config_path: &Path) -> ConfigResult<Config> {
        let project_config = BridgeConfig::load_from_file(config_path)?;
        let project_root = config_path.parent().map(|p| p.to_path_buf());
        self.assemble(project_root, project_config)
    }

    fn assemble(
        &mut self,
        project_root: Option<PathBuf>,
        project_config: BridgeConfig,
    ) -> ConfigResult<Config> {
        let mut bridge = self.load_global_config()?;
        bridge.merge(&project_config);
        let bridge = apply_env_overrides(bridge)?;

        Ok(Config {
            bridge,
            project_root,
        })
    }

    /// Find project configuration by walking up directory tree
    fn find_project_config(
        &self,
        start_dir: &Path,
    ) -> ConfigResult<(Option<PathBuf>, BridgeConfig)> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(PROJECT_CONFIG_FILE);

            if config_path.exists() {
                let project_config = BridgeConfig::load_from_file(&config_path)?;
                return Ok((Some(current), project_config));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Ok((None, BridgeConfig::default())),
            }
        }
    }

    /// Load global configuration, or the default if there is none
    fn load_global_config(&mut self) -> ConfigResult<BridgeConfig> {
        let path = match &self.global_config_path {
            Some(path) => path.clone(),
            None => match BridgeConfig::global_config_path() {
                Ok(path) => {
                    self.global_config_path = Some(path.clone());
                    path
                }
                // No home directory means no global config, not a failure
                Err(ConfigError::HomeNotFound) => return Ok(BridgeConfig::default()),
                Err(e) => return Err(e),
            },
        };

        if !path.exists() {
            return Ok(BridgeConfig::default());
        }

        BridgeConfig::load_from_file(&path)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply ALPM_BRIDGE_* environment overrides
///
/// - ALPM_BRIDGE_INSTALL_IGNORED=true|false
/// - ALPM_BRIDGE_REPLACE=true|false
/// - ALPM_BRIDGE_PROVIDER_INDEX=<n>
/// - ALPM_BRIDGE_DEFAULT_ANSWER=true|false
fn apply_env_overrides(mut config: BridgeConfig) -> ConfigResult<BridgeConfig> {
    let mut overrides = AnswersConfig::default();

    if let Ok(value) = env::var("ALPM_BRIDGE_INSTALL_IGNORED") {
        overrides.install_ignored = Some(parse_env_bool(&value));
    }

    if let Ok(value) = env::var("ALPM_BRIDGE_REPLACE") {
        overrides.replace = Some(parse_env_bool(&value));
    }

    if let Ok(value) = env::var("ALPM_BRIDGE_PROVIDER_INDEX") {
        let index = value
            .trim()
            .parse::<i32>()
            .map_err(|e| ConfigError::InvalidValue {
                field: "ALPM_BRIDGE_PROVIDER_INDEX".to_string(),
                reason: e.to_string(),
            })?;
        validate_provider_index("ALPM_BRIDGE_PROVIDER_INDEX", index)?;
        overrides.provider_index = Some(index);
    }

    if let Ok(value) = env::var("ALPM_BRIDGE_DEFAULT_ANSWER") {
        overrides.default_answer = Some(parse_env_bool(&value));
    }

    if overrides != AnswersConfig::default() {
        config.merge(&BridgeConfig {
            answers: Some(overrides),
        });
    }

    Ok(config)
}

fn parse_env_bool(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes")
}

impl Config {
    /// Effective answers (missing sections fall back to defaults)
    pub fn answers(&self) -> AnswersConfig {
        self.bridge.answers.clone().unwrap_or_default()
    }

    /// Get the project root directory
    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    /// Check if an alpm-bridge.toml was found
    pub fn is_project(&self) -> bool {
        self.project_root.is_some()
    }
}
