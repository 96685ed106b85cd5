//! Core data models
//!
//! Plain value types produced by the collectors and consumed by the scorer
//! and reporters. None of them outlive a single run.

use chrono::Timelike;
use serde::{Deserialize, Serialize};

/// Build, executor, queue and JVM gauges read from Prometheus.
///
/// Field order is the serialization order of the report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct HealthMetrics {
    pub successful_builds: f64,
    pub failed_builds: f64,
    pub unstable_builds: f64,
    pub aborted_builds: f64,
    /// Always the sum of the four outcome counts, never queried
    pub total_builds: f64,
    pub executor_busy: f64,
    pub executor_total: f64,
    pub queue_size: f64,
    /// JVM heap bytes in use
    pub memory_used: f64,
    /// JVM heap bytes available
    pub memory_max: f64,
}

impl HealthMetrics {
    /// Recompute `total_builds` from the four outcome counts
    pub fn with_derived_total(mut self) -> Self {
        self.total_builds = self.successful_builds
            + self.failed_builds
            + self.unstable_builds
            + self.aborted_builds;
        self
    }
}

/// Security posture counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SecurityMetrics {
    #[serde(default)]
    pub outdated_plugins: u32,
    #[serde(default)]
    pub critical_vulnerabilities: u32,
    #[serde(default)]
    pub user_accounts_admin: u32,
    #[serde(default)]
    pub missing_auth_settings: u32,
}

/// The persisted result of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub timestamp: String,
    pub health_metrics: HealthMetrics,
    pub security_metrics: SecurityMetrics,
    pub health_score: f64,
    pub security_score: f64,
    pub final_score: f64,
}

impl ScoreReport {
    /// Build a report stamped with the current local time.
    pub fn new(
        health_metrics: HealthMetrics,
        security_metrics: SecurityMetrics,
        health_score: f64,
        security_score: f64,
        final_score: f64,
    ) -> Self {
        Self {
            timestamp: report_timestamp(chrono::Local::now()),
            health_metrics,
            security_metrics,
            health_score,
            security_score,
            final_score,
        }
    }
}

/// `YYYY-MM-DD HH:MM:SS.ffffff`, with the fraction left off on a whole second
pub fn report_timestamp<Tz>(now: chrono::DateTime<Tz>) -> String
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
{
    if now.nanosecond() / 1_000 == 0 {
        now.format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        now.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
    }
}
