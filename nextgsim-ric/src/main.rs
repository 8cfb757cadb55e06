//! nextgsim RIC application
//!
//! Bootstrap binary for the E2SM-KPM / E2SM-RC subscription application.
//! Subscription sweeps are driven by the hosting test harness through the
//! library; the process itself loads its configuration, announces the
//! service models it speaks and stays up until it is told to exit.
//!
//! # Usage
//!
//! ```bash
//! nr-ric -c config/ric.yaml
//! kill -USR1 <pid>
//! ```

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info};

use nextgsim_common::{init_logging, init_logging_with_filter, RicConfig};
use nextgsim_e2sm::{kpm, rc};
use nextgsim_ric::{load_and_validate_ric_config, validate_ric_config};

/// nextgsim RIC - E2SM-KPM / E2SM-RC subscription application
#[derive(Parser, Debug)]
#[command(name = "nr-ric")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the RIC configuration file (YAML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config_file: Option<String>,
}

fn load_config(args: &Args) -> Result<RicConfig> {
    match &args.config_file {
        Some(path) => load_and_validate_ric_config(path)
            .with_context(|| format!("Failed to load configuration from {path}")),
        None => {
            let config = RicConfig::default();
            validate_ric_config(&config).context("Invalid default configuration")?;
            Ok(config)
        }
    }
}

/// Waits for SIGUSR1 or Ctrl+C.
async fn wait_for_exit_signal() -> Result<()> {
    #[cfg(unix)]
    {
        let mut usr1 = signal::unix::signal(signal::unix::SignalKind::user_defined1())
            .context("Failed to install SIGUSR1 handler")?;
        tokio::select! {
            _ = usr1.recv() => info!("Received SIGUSR1, exiting"),
            result = signal::ctrl_c() => {
                result.context("Failed to listen for Ctrl+C")?;
                info!("Received Ctrl+C, exiting");
            }
        }
    }

    #[cfg(not(unix))]
    {
        signal::ctrl_c().await.context("Failed to listen for Ctrl+C")?;
        info!("Received Ctrl+C, exiting");
    }

    Ok(())
}

async fn run_ric(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    // A plain level name, or a full filter directive such as "info,nextgsim_ric=trace"
    match config.log_level() {
        Ok(level) => init_logging(level),
        Err(_) => init_logging_with_filter(&config.log_level),
    }

    info!("Starting RIC application, pid {}", std::process::id());
    info!(
        "KPM: {} enabled={} indications={}",
        kpm::DESCRIPTOR,
        config.kpm.enabled,
        config.kpm.indications
    );
    info!(
        "RC: {} enabled={} indications={}",
        rc::DESCRIPTOR,
        config.rc.enabled,
        config.rc.indications
    );
    info!("Topology timeout: {:?}", config.topology_timeout());

    wait_for_exit_signal().await
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run_ric(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Logging may not be initialized if the configuration failed to load
            init_logging_with_filter("info");
            error!("RIC failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
