//! Common types and utilities for the nextgsim RIC
//!
//! This crate provides the configuration structures, error type and logging
//! helpers shared by the E2 service-model codec and the RIC application.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{KpmSweepConfig, RcSweepConfig, RicConfig};
pub use error::Error;
pub use logging::{
    init_logging, init_logging_with_filter, log_e2sm_payload, Direction, HexDump, LogLevel,
};
