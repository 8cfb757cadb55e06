//! Configuration structures for the RIC application
//!
//! Service-model protocol constants (reporting periods, trigger codes,
//! parameter identifiers) are part of the wire contract and live in
//! `nextgsim-e2sm`. Only operational knobs of the sweep are configurable.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::logging::LogLevel;

/// Default timeout for topology queries in milliseconds.
pub const DEFAULT_TOPOLOGY_TIMEOUT_MS: u64 = 3000;

/// Default number of KPM indications consumed per subscription.
pub const DEFAULT_KPM_INDICATIONS: usize = 3;

/// Default number of RC indications consumed per subscription.
pub const DEFAULT_RC_INDICATIONS: usize = 1;

/// RIC application configuration.
///
/// Every field has a default, so an empty YAML document is a valid
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RicConfig {
    /// Log filter (a level name or a full `EnvFilter` directive)
    pub log_level: String,
    /// Timeout for each topology query, in milliseconds
    pub topology_timeout_ms: u64,
    /// KPM subscription sweep settings
    pub kpm: KpmSweepConfig,
    /// RC subscription sweep settings
    pub rc: RcSweepConfig,
}

impl Default for RicConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info.to_string(),
            topology_timeout_ms: DEFAULT_TOPOLOGY_TIMEOUT_MS,
            kpm: KpmSweepConfig::default(),
            rc: RcSweepConfig::default(),
        }
    }
}

impl RicConfig {
    /// Parses a configuration from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads and parses a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Returns the topology query timeout.
    pub fn topology_timeout(&self) -> Duration {
        Duration::from_millis(self.topology_timeout_ms)
    }

    /// Returns the configured log level, if `log_level` is a plain level name.
    pub fn log_level(&self) -> Result<LogLevel, Error> {
        self.log_level.parse().map_err(Error::Config)
    }
}

/// KPM sweep settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KpmSweepConfig {
    /// Whether KPM subscriptions are exercised
    pub enabled: bool,
    /// Indications consumed before unsubscribing
    pub indications: usize,
}

impl Default for KpmSweepConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            indications: DEFAULT_KPM_INDICATIONS,
        }
    }
}

/// RC sweep settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RcSweepConfig {
    /// Whether RC subscriptions are exercised
    pub enabled: bool,
    /// Indications consumed before unsubscribing
    pub indications: usize,
}

impl Default for RcSweepConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            indications: DEFAULT_RC_INDICATIONS,
        }
    }
}
