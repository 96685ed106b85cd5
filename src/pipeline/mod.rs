//! Report pipeline
//!
//! Runs the whole report once, strictly in order:
//!
//! ```text
//! banner → health queries → security audit → scores → stdout summary
//!        → JSON report → PNG chart → "Saved" lines
//! ```
//!
//! Metric query failures are absorbed by the health collector. Anything else
//! (security source, file writes, chart rendering) aborts the run.

use crate::collectors::{HealthCollector, SecurityAuditSource, HEALTH_QUERIES};
use crate::config::ReporterConfig;
use crate::metrics::MetricsQuery;
use crate::models::ScoreReport;
use crate::reporters::{chart, json, text};
use crate::scoring;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use tracing::{debug, info};

/// Run the report, printing to stdout
pub fn run(
    config: &ReporterConfig,
    metrics: &dyn MetricsQuery,
    security: &dyn SecurityAuditSource,
) -> Result<ScoreReport> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with_output(config, metrics, security, &mut out)
}

/// Run the report, writing the human-readable summary to `out`
pub fn run_with_output<W: Write>(
    config: &ReporterConfig,
    metrics: &dyn MetricsQuery,
    security: &dyn SecurityAuditSource,
    out: &mut W,
) -> Result<ScoreReport> {
    write!(out, "{}", text::banner())?;
    out.flush()?;

    let progress = create_progress_bar();
    let collection = HealthCollector::new(metrics)
        .with_progress(progress.clone())
        .collect_detailed();
    progress.finish_and_clear();

    if !collection.failures.is_empty() {
        let names: Vec<&str> = collection
            .failures
            .iter()
            .map(|(q, _)| q.field_name())
            .collect();
        debug!("Metrics reported as 0: {}", names.join(", "));
    }
    let health_metrics = collection.metrics;

    let security_metrics = security
        .collect()
        .with_context(|| format!("Security audit '{}' failed", security.name()))?;

    let weights = &config.scoring;
    let health_score = scoring::health_score_weighted(&health_metrics, &weights.health_weights);
    let security_score = scoring::security_score(&security_metrics);
    let final_score =
        scoring::final_score_weighted(health_score, security_score, &weights.final_weights);

    info!(
        "Scores - Health: {:.2}, Security: {:.2}, Final: {:.2}",
        health_score, security_score, final_score
    );

    let report = ScoreReport::new(
        health_metrics,
        security_metrics,
        health_score,
        security_score,
        final_score,
    );

    write!(out, "{}", text::render(&report)?)?;

    json::write(&report, &config.output.report_path)?;
    chart::render(
        report.health_score,
        report.security_score,
        report.final_score,
        &config.output.chart_path,
    )?;

    write!(out, "{}", text::render_saved(&config.output))?;
    out.flush()?;

    Ok(report)
}

fn create_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(HEALTH_QUERIES.len() as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:20.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collectors::StaticSecurityAudit;
    use crate::metrics::{QueryError, QueryResult};
    use crate::models::SecurityMetrics;

    /// Answers every query with the same value
    struct ConstantQuery(f64);

    impl MetricsQuery for ConstantQuery {
        fn query(&self, _expression: &str) -> QueryResult {
            Ok(self.0)
        }
    }

    struct Unreachable;

    impl MetricsQuery for Unreachable {
        fn query(&self, _expression: &str) -> QueryResult {
            Err(QueryError::Transport("connection refused".into()))
        }
    }

    struct BrokenAudit;

    impl SecurityAuditSource for BrokenAudit {
        fn name(&self) -> &str {
            "broken"
        }

        fn collect(&self) -> Result<SecurityMetrics> {
            anyhow::bail!("scanner offline")
        }
    }

    fn temp_config(dir: &std::path::Path) -> ReporterConfig {
        ReporterConfig::default().with_output_dir(dir)
    }

    #[test]
    fn test_unreachable_backend_still_reports() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = temp_config(dir.path());
        let mut out = Vec::new();

        let report = run_with_output(
            &config,
            &Unreachable,
            &StaticSecurityAudit::default(),
            &mut out,
        )
        .expect("run");

        // All-zero health: 100×0.4 + 100×0.2 + 100×0.1 + 50×0.3
        assert_eq!(report.health_score, 85.0);
        assert_eq!(report.security_score, 60.0);
        assert_eq!(report.final_score, 75.0);
        assert!(config.output.report_path.exists());
        assert!(config.output.chart_path.exists());
    }

    #[test]
    fn test_total_builds_is_derived() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = temp_config(dir.path());
        let mut out = Vec::new();

        let report = run_with_output(
            &config,
            &ConstantQuery(3.0),
            &StaticSecurityAudit::default(),
            &mut out,
        )
        .expect("run");
        assert_eq!(report.health_metrics.total_builds, 12.0);
    }

    #[test]
    fn test_security_failure_aborts() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = temp_config(dir.path());
        let mut out = Vec::new();

        let err = run_with_output(&config, &ConstantQuery(1.0), &BrokenAudit, &mut out)
            .unwrap_err();
        assert!(format!("{err:#}").contains("scanner offline"));
        assert!(!config.output.report_path.exists());
    }

    #[test]
    fn test_unwritable_output_aborts() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = temp_config(&dir.path().join("does-not-exist"));
        let mut out = Vec::new();

        let result = run_with_output(
            &config,
            &ConstantQuery(1.0),
            &StaticSecurityAudit::default(),
            &mut out,
        );
        assert!(result.is_err());
    }
}
