use anyhow::Context;
use clap::Parser;
use pilvi::cli::Cli;
use pilvi::config::{Config, Overrides};
use pilvi::reporter::Reporter;
use pilvi::{CommandError, Runtime};
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Log filter: `PILVI_LOG`, then `RUST_LOG`, then `debug` with `--debug`
/// and `warn` otherwise
pub fn env_filter(debug: bool) -> EnvFilter {
    let fallback = if debug { "debug" } else { "warn" };
    EnvFilter::try_from_env("PILVI_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Report a failed command on the matching channel
pub fn report_failure(reporter: &Reporter, err: &CommandError) {
    if err.is_warning() {
        reporter.warn(err.to_string());
    } else {
        reporter.error(err.to_string());
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Diagnostics go to stderr so table and manual-mode output stay clean
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(cli.debug))
        .with_writer(std::io::stderr)
        .init();

    let overrides = Overrides {
        region: cli.region.clone(),
    };
    let config = match Config::load(&overrides).context("Failed to load configuration") {
        Ok(config) => config,
        Err(e) => {
            Reporter::new().error(format!("{:#}", e));
            return ExitCode::FAILURE;
        }
    };
    let rt = Runtime::from_config(&config);

    match pilvi::run(cli.command, &rt).await {
        Ok(()) => {
            debug!("Command finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = ?e, "Command failed");
            report_failure(&rt.reporter, &e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
