//! Projtrack - Projects Tracker
//!
//! Command-line front end over the local project store, the HTML report
//! exporter and the remote collection sync.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cloud;
mod commands;
mod config;
mod error;
mod prompt;
mod state;
mod views;

fn main() -> ExitCode {
    // Logs go to stderr so report HTML on stdout stays clean
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = commands::Cli::parse();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to create tokio runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match commands::run(cli, &runtime) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !e.is_reported() {
                eprintln!("Error: {}", e);
            }
            tracing::debug!(error = ?e, "Command failed");
            ExitCode::FAILURE
        }
    }
}
