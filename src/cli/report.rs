//! Report command - the default action

use super::Cli;
use crate::collectors::StaticSecurityAudit;
use crate::config::{load_config, ReporterConfig};
use crate::metrics::PrometheusClient;
use crate::pipeline;
use anyhow::{Context, Result};
use tracing::debug;

/// Run the report
pub fn run(cli: &Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("Cannot determine working directory")?;
    let config = load_config(cli.config.as_deref(), &cwd)?;
    let config = apply_overrides(config, cli);

    if let Some(dir) = &cli.output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    }

    let client = PrometheusClient::from_config(&config.prometheus);
    let audit = StaticSecurityAudit::new(config.security);
    debug!(
        "Querying {} (timeout {}s)",
        client.url(),
        config.prometheus.timeout_secs
    );

    pipeline::run(&config, &client, &audit)?;
    Ok(())
}

/// Flags override the config file
fn apply_overrides(mut config: ReporterConfig, cli: &Cli) -> ReporterConfig {
    if let Some(url) = &cli.prometheus_url {
        config.prometheus.url = url.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.prometheus.timeout_secs = timeout;
    }
    match &cli.output_dir {
        Some(dir) => config.with_output_dir(dir),
        None => config,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_no_flags_keep_config() {
        let cli = Cli::try_parse_from(["jenkins-score"]).expect("parse");
        let mut config = ReporterConfig::default();
        config.prometheus.url = "http://from-file:9090/api/v1/query".into();
        let config = apply_overrides(config, &Cli { prometheus_url: None, ..cli });
        assert_eq!(config.prometheus.url, "http://from-file:9090/api/v1/query");
        assert_eq!(config.output.report_path, PathBuf::from("jenkins_score_report.json"));
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "jenkins-score",
            "--prometheus-url",
            "http://flag:9090/api/v1/query",
            "--timeout",
            "5",
            "--output-dir",
            "reports",
        ])
        .expect("parse");
        let config = apply_overrides(ReporterConfig::default(), &cli);
        assert_eq!(config.prometheus.url, "http://flag:9090/api/v1/query");
        assert_eq!(config.prometheus.timeout_secs, 5);
        assert_eq!(
            config.output.report_path,
            PathBuf::from("reports/jenkins_score_report.json")
        );
        assert_eq!(
            config.output.chart_path,
            PathBuf::from("reports/jenkins_score_visual.png")
        );
    }
}
