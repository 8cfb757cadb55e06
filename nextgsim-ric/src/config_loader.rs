//! Configuration loading for the RIC application
//!
//! Wraps [`RicConfig`] from `nextgsim-common` with validation and error
//! handling specific to the RIC.
//!
//! # Example
//!
//! ```rust,ignore
//! use nextgsim_ric::config_loader::{load_ric_config, validate_ric_config};
//!
//! let config = load_ric_config("config/ric.yaml")?;
//! validate_ric_config(&config)?;
//! ```

use std::path::Path;

use nextgsim_common::{Error as CommonError, RicConfig};
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ConfigValidationError),
}

impl From<CommonError> for ConfigError {
    fn from(e: CommonError) -> Self {
        match e {
            CommonError::Io(io) => ConfigError::IoError(io),
            other => ConfigError::ParseError(other.to_string()),
        }
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// Invalid topology timeout
    #[error("Invalid topology timeout: {0}")]
    InvalidTopologyTimeout(String),

    /// Invalid indication quota
    #[error("Invalid indication count: {0}")]
    InvalidIndicationCount(String),

    /// Neither service model is enabled
    #[error("No service model enabled: enable at least one of kpm, rc")]
    NoServiceModelEnabled,
}

/// Loads a RIC configuration from a YAML file.
///
/// # Arguments
///
/// * `path` - Path to the YAML configuration file
///
/// # Returns
///
/// * `Ok(RicConfig)` - Successfully loaded and parsed configuration
/// * `Err(ConfigError)` - Loading or parsing failed
pub fn load_ric_config<P: AsRef<Path>>(path: P) -> Result<RicConfig, ConfigError> {
    Ok(RicConfig::from_file(path)?)
}

/// Loads a RIC configuration from a YAML string. An empty string yields the
/// defaults.
pub fn load_ric_config_from_str(yaml: &str) -> Result<RicConfig, ConfigError> {
    Ok(RicConfig::from_yaml_str(yaml)?)
}

/// Validates a RIC configuration.
///
/// # Validation Rules
///
/// - The topology timeout must be non-zero
/// - Each enabled service model must consume at least one indication
/// - At least one service model must be enabled
pub fn validate_ric_config(config: &RicConfig) -> Result<(), ConfigValidationError> {
    if config.topology_timeout_ms == 0 {
        return Err(ConfigValidationError::InvalidTopologyTimeout(
            "topology_timeout_ms must be greater than 0".to_string(),
        ));
    }

    if !config.kpm.enabled && !config.rc.enabled {
        return Err(ConfigValidationError::NoServiceModelEnabled);
    }

    if config.kpm.enabled && config.kpm.indications == 0 {
        return Err(ConfigValidationError::InvalidIndicationCount(
            "kpm.indications must be at least 1".to_string(),
        ));
    }

    if config.rc.enabled && config.rc.indications == 0 {
        return Err(ConfigValidationError::InvalidIndicationCount(
            "rc.indications must be at least 1".to_string(),
        ));
    }

    Ok(())
}

/// Loads and validates a RIC configuration in one step.
pub fn load_and_validate_ric_config<P: AsRef<Path>>(path: P) -> Result<RicConfig, ConfigError> {
    let config = load_ric_config(path)?;
    validate_ric_config(&config)?;
    Ok(config)
}
