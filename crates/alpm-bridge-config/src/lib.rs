//! alpm-bridge Configuration
//!
//! Configures how the bridge answers questions raised by libalpm during a
//! transaction (install an ignored package, replace a package, pick a
//! provider).
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded and merged in the following order (later overrides earlier):
//! 1. Global config (~/.alpm-bridge/config.toml)
//! 2. Project config (./alpm-bridge.toml)
//! 3. Environment variables (ALPM_BRIDGE_*)
//!
//! # Example
//!
//! ```no_run
//! use alpm_bridge_config::ConfigLoader;
//! use std::path::Path;
//!
//! let mut loader = ConfigLoader::new();
//! let config = loader.load_from_directory(Path::new(".")).unwrap();
//! println!("replace packages: {}", config.answers().replace());
//! ```

pub mod answers;
pub mod loader;

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax in {file}: {error}")]
    TomlParseError {
        file: PathBuf,
        error: toml::de::Error,
    },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Home directory not found")]
    HomeNotFound,
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

pub use answers::{AnswersConfig, BridgeConfig};
pub use loader::{Config, ConfigLoader};
