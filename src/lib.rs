//! Jenkins health & security scoring
//!
//! A linear fetch -> score -> report pipeline:
//!
//! ```text
//! PrometheusClient -> HealthCollector ─┐
//!                                      ├─> scoring -> ScoreReport -> stdout / JSON / PNG
//! SecurityAuditSource ─────────────────┘
//! ```

pub mod cli;
pub mod collectors;
pub mod config;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod reporters;
pub mod scoring;
