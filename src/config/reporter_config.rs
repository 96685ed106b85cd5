//! Reporter configuration
//!
//! Every constant the report depends on lives here, with defaults matching
//! the stock behaviour. An optional `jenkins-score.toml` in the working
//! directory (or a file passed with `--config`) overrides them.
//!
//! # Configuration Format
//!
//! ```toml
//! [prometheus]
//! url = "http://localhost:9090/api/v1/query"
//! timeout_secs = 10
//!
//! [output]
//! report_path = "jenkins_score_report.json"
//! chart_path = "jenkins_score_visual.png"
//!
//! [scoring]
//! health_weights = { success_rate = 0.4, executor = 0.2, queue = 0.1, memory = 0.3 }
//! final_weights = { health = 0.6, security = 0.4 }
//!
//! [security]
//! outdated_plugins = 2
//! critical_vulnerabilities = 1
//! user_accounts_admin = 3
//! missing_auth_settings = 0
//! ```

use crate::models::SecurityMetrics;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Config file looked up in the working directory when `--config` is absent
pub const CONFIG_FILE_NAME: &str = "jenkins-score.toml";

/// Template written by `jenkins-score init`
pub const DEFAULT_CONFIG_TOML: &str = r#"# jenkins-score configuration
# Every value below is the built-in default; delete what you don't change.

[prometheus]
# Prometheus instant-query endpoint
url = "http://localhost:9090/api/v1/query"
# Per-query timeout in seconds
timeout_secs = 10

[output]
report_path = "jenkins_score_report.json"
chart_path = "jenkins_score_visual.png"

[scoring]
# Each weight set must sum to 1.0
health_weights = { success_rate = 0.4, executor = 0.2, queue = 0.1, memory = 0.3 }
final_weights = { health = 0.6, security = 0.4 }

# Security findings reported by the static audit source
[security]
outdated_plugins = 2
critical_vulnerabilities = 1
user_accounts_admin = 3
missing_auth_settings = 0
"#;

/// Top-level configuration passed into the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReporterConfig {
    #[serde(default)]
    pub prometheus: PrometheusConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Findings returned by the static security audit source
    #[serde(default = "default_security_findings")]
    pub security: SecurityMetrics,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            prometheus: PrometheusConfig::default(),
            output: OutputConfig::default(),
            scoring: ScoringConfig::default(),
            security: default_security_findings(),
        }
    }
}

fn default_security_findings() -> SecurityMetrics {
    SecurityMetrics {
        outdated_plugins: 2,
        critical_vulnerabilities: 1,
        user_accounts_admin: 3,
        missing_auth_settings: 0,
    }
}

impl ReporterConfig {
    /// Place both artifacts under `dir`, keeping their file names
    pub fn with_output_dir(mut self, dir: &Path) -> Self {
        self.output.report_path = rebase(dir, &self.output.report_path);
        self.output.chart_path = rebase(dir, &self.output.chart_path);
        self
    }

    /// Replace invalid weight sets with the defaults
    pub fn validated(mut self) -> Self {
        if !self.scoring.health_weights.is_valid() {
            warn!(
                "Health weights sum to {:.3}, expected 1.0; using defaults",
                self.scoring.health_weights.sum()
            );
            self.scoring.health_weights = HealthWeights::default();
        }
        if !self.scoring.final_weights.is_valid() {
            warn!(
                "Final weights sum to {:.3}, expected 1.0; using defaults",
                self.scoring.final_weights.sum()
            );
            self.scoring.final_weights = FinalWeights::default();
        }
        if self.prometheus.timeout_secs == 0 {
            warn!("Prometheus timeout of 0s is not allowed; using default");
            self.prometheus.timeout_secs = default_timeout_secs();
        }
        self
    }
}

fn rebase(dir: &Path, path: &Path) -> PathBuf {
    match path.file_name() {
        Some(name) => dir.join(name),
        None => dir.join(path),
    }
}

/// Metrics backend settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrometheusConfig {
    /// Instant-query endpoint
    #[serde(default = "default_prometheus_url")]
    pub url: String,

    /// Per-query timeout in seconds (default: 10)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for PrometheusConfig {
    fn default() -> Self {
        Self {
            url: default_prometheus_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl PrometheusConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_prometheus_url() -> String {
    "http://localhost:9090/api/v1/query".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// Where the artifacts are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_report_path")]
    pub report_path: PathBuf,

    #[serde(default = "default_chart_path")]
    pub chart_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_path: default_report_path(),
            chart_path: default_chart_path(),
        }
    }
}

fn default_report_path() -> PathBuf {
    PathBuf::from("jenkins_score_report.json")
}

fn default_chart_path() -> PathBuf {
    PathBuf::from("jenkins_score_visual.png")
}

/// Scoring weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ScoringConfig {
    #[serde(default)]
    pub health_weights: HealthWeights,

    #[serde(default)]
    pub final_weights: FinalWeights,
}

/// Weights of the four health sub-scores (must sum to 1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthWeights {
    /// Build success rate (default: 0.4)
    #[serde(default = "default_success_rate_weight")]
    pub success_rate: f64,

    /// Executor availability (default: 0.2)
    #[serde(default = "default_executor_weight")]
    pub executor: f64,

    /// Build queue length (default: 0.1)
    #[serde(default = "default_queue_weight")]
    pub queue: f64,

    /// JVM memory headroom (default: 0.3)
    #[serde(default = "default_memory_weight")]
    pub memory: f64,
}

impl Default for HealthWeights {
    fn default() -> Self {
        Self {
            success_rate: default_success_rate_weight(),
            executor: default_executor_weight(),
            queue: default_queue_weight(),
            memory: default_memory_weight(),
        }
    }
}

fn default_success_rate_weight() -> f64 {
    0.4
}
fn default_executor_weight() -> f64 {
    0.2
}
fn default_queue_weight() -> f64 {
    0.1
}
fn default_memory_weight() -> f64 {
    0.3
}

impl HealthWeights {
    pub fn sum(&self) -> f64 {
        self.success_rate + self.executor + self.queue + self.memory
    }

    /// Validate that weights sum to 1.0 (with tolerance) and none is negative
    pub fn is_valid(&self) -> bool {
        let parts = [self.success_rate, self.executor, self.queue, self.memory];
        parts.iter().all(|w| *w >= 0.0) && (self.sum() - 1.0).abs() < 0.001
    }
}

/// Weights combining health and security into the final score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinalWeights {
    /// Health score weight (default: 0.6)
    #[serde(default = "default_health_weight")]
    pub health: f64,

    /// Security score weight (default: 0.4)
    #[serde(default = "default_security_weight")]
    pub security: f64,
}

impl Default for FinalWeights {
    fn default() -> Self {
        Self {
            health: default_health_weight(),
            security: default_security_weight(),
        }
    }
}

fn default_health_weight() -> f64 {
    0.6
}
fn default_security_weight() -> f64 {
    0.4
}

impl FinalWeights {
    pub fn sum(&self) -> f64 {
        self.health + self.security
    }

    pub fn is_valid(&self) -> bool {
        self.health >= 0.0 && self.security >= 0.0 && (self.sum() - 1.0).abs() < 0.001
    }
}

/// Load configuration.
///
/// An explicit path must exist and parse. Without one, `jenkins-score.toml`
/// in `dir` is used when present; a broken implicit file is reported and the
/// defaults are used instead.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> anyhow::Result<ReporterConfig> {
    if let Some(path) = explicit {
        let config = load_toml_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        return Ok(config.validated());
    }

    let toml_path = dir.join(CONFIG_FILE_NAME);
    if toml_path.exists() {
        match load_toml_config(&toml_path) {
            Ok(config) => {
                debug!("Loaded config from {}", toml_path.display());
                return Ok(config.validated());
            }
            Err(e) => {
                warn!("Failed to load {}: {}", toml_path.display(), e);
            }
        }
    }

    Ok(ReporterConfig::default())
}

fn load_toml_config(path: &Path) -> anyhow::Result<ReporterConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ReporterConfig = toml::from_str(&content)?;
    Ok(config)
}
