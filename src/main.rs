//! jenkins-score - Jenkins health & security scorecard
//!
//! Queries a Prometheus endpoint for Jenkins build, executor and JVM gauges,
//! combines them with security findings, and writes a scored report.

use anyhow::Result;
use clap::Parser;
use jenkins_score::cli;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging (stderr, so the stdout report stays clean)
    let filter = match cli.log_level.as_deref() {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::from_default_env(),
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    cli::run(cli)
}
