//! CLI command definitions and handlers

mod init;
mod report;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parse and validate a query timeout (1-300 seconds)
fn parse_timeout(s: &str) -> Result<u64, String> {
    let n: u64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("timeout must be at least 1 second".to_string())
    } else if n > 300 {
        Err("timeout cannot exceed 300 seconds".to_string())
    } else {
        Ok(n)
    }
}

/// jenkins-score - Jenkins health & security scorecard
#[derive(Parser, Debug)]
#[command(name = "jenkins-score")]
#[command(
    version,
    about = "Score a Jenkins server's health and security from Prometheus metrics",
    long_about = "Queries Prometheus for Jenkins build results, executor load, queue length and \
JVM memory, combines them with security findings, and writes a scored report.\n\n\
Run without a subcommand to produce the report in the current directory:\n  \
jenkins-score",
    after_help = "\
Examples:
  jenkins-score                                        Report using defaults (localhost:9090)
  jenkins-score --prometheus-url http://prom:9090/api/v1/query
  jenkins-score --output-dir reports/                  Write artifacts under reports/
  jenkins-score init                                   Write a jenkins-score.toml template"
)]
pub struct Cli {
    /// Config file (default: ./jenkins-score.toml when present)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Prometheus instant-query endpoint
    #[arg(long, global = true, env = "JENKINS_SCORE_PROMETHEUS_URL")]
    pub prometheus_url: Option<String>,

    /// Per-query timeout in seconds (1-300)
    #[arg(long, global = true, value_parser = parse_timeout)]
    pub timeout: Option<u64>,

    /// Directory for the JSON report and the chart (created if missing)
    #[arg(long, short = 'o', global = true)]
    pub output_dir: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); RUST_LOG applies when unset
    #[arg(long, global = true, value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a jenkins-score.toml template with the default settings
    Init,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Init) => init::run(&std::env::current_dir()?),
        None => report::run(&cli),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("10"), Ok(10));
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("301").is_err());
        assert!(parse_timeout("ten").is_err());
    }

    #[test]
    fn test_no_args_is_report() {
        let cli = Cli::try_parse_from(["jenkins-score"]).expect("parse");
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
        assert!(cli.output_dir.is_none());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "jenkins-score",
            "--prometheus-url",
            "http://prom:9090/api/v1/query",
            "--timeout",
            "3",
            "-o",
            "out",
            "--log-level",
            "debug",
        ])
        .expect("parse");
        assert_eq!(cli.prometheus_url.as_deref(), Some("http://prom:9090/api/v1/query"));
        assert_eq!(cli.timeout, Some(3));
        assert_eq!(cli.output_dir, Some(PathBuf::from("out")));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_init_subcommand() {
        let cli = Cli::try_parse_from(["jenkins-score", "init"]).expect("parse");
        assert!(matches!(cli.command, Some(Commands::Init)));
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        assert!(Cli::try_parse_from(["jenkins-score", "--log-level", "loud"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
