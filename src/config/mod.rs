//! Configuration module
//!
//! This module handles:
//! - The `jenkins-score.toml` config file
//! - Prometheus endpoint and timeout
//! - Output artifact paths
//! - Scoring weights and the static security findings

mod reporter_config;

pub use reporter_config::{
    load_config,
    FinalWeights,
    HealthWeights,
    OutputConfig,
    PrometheusConfig,
    ReporterConfig,
    ScoringConfig,
    CONFIG_FILE_NAME,
    DEFAULT_CONFIG_TOML,
};
