//! Logging infrastructure for nextgsim
//!
//! This module provides configurable logging using the `tracing` crate and
//! helpers for logging encoded E2 service-model payloads.

use std::fmt;
use tracing::Level;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

/// Log level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Trace level - most verbose
    Trace,
    /// Debug level
    Debug,
    /// Info level (default)
    #[default]
    Info,
    /// Warn level
    Warn,
    /// Error level - least verbose
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("unknown log level: {s}")),
        }
    }
}

/// Initialize the tracing subscriber with the specified log level.
///
/// This should be called once at application startup. The log level can be
/// overridden by the `RUST_LOG` environment variable.
///
/// # Example
///
/// ```no_run
/// use nextgsim_common::logging::{init_logging, LogLevel};
///
/// init_logging(LogLevel::Debug);
/// ```
pub fn init_logging(level: LogLevel) {
    init_logging_with_filter(&level.to_string());
}

/// Initialize logging with a custom filter string.
///
/// Allows fine-grained control over which modules log at which levels.
///
/// # Example
///
/// ```no_run
/// use nextgsim_common::logging::init_logging_with_filter;
///
/// // Default to info, but trace the subscription layer
/// init_logging_with_filter("info,nextgsim_ric=trace");
/// ```
pub fn init_logging_with_filter(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_span_events(FmtSpan::NONE)
        .try_init();
}

/// Payload direction for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Received from an E2 node
    Rx,
    /// Sent towards an E2 node
    Tx,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Rx => write!(f, "RX"),
            Direction::Tx => write!(f, "TX"),
        }
    }
}

/// Log an encoded service-model payload at debug level, with a hex dump at
/// trace level.
///
/// # Arguments
///
/// * `model` - Service model short name (e.g., "KPM", "RC")
/// * `direction` - Payload direction
/// * `kind` - Payload kind (e.g., "event trigger", "action definition")
/// * `data` - Encoded bytes
///
/// # Example
///
/// ```
/// use nextgsim_common::logging::{log_e2sm_payload, Direction};
///
/// log_e2sm_payload("KPM", Direction::Tx, "event trigger", &[0x0a, 0x03, 0x08, 0xe8, 0x07]);
/// ```
pub fn log_e2sm_payload(model: &str, direction: Direction, kind: &str, data: &[u8]) {
    tracing::debug!(
        model = model,
        direction = %direction,
        kind = kind,
        len = data.len(),
        "{} E2SM-{} {}",
        direction,
        model,
        kind
    );
    tracing::trace!(model = model, hex = %HexDump(data), "E2SM-{} {} payload", model, kind);
}

/// Wrapper for hex dump formatting
pub struct HexDump<'a>(pub &'a [u8]);

impl fmt::Display for HexDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}
