//! Metric collectors
//!
//! - [`HealthCollector`] - build, executor, queue and JVM gauges from Prometheus
//! - [`SecurityAuditSource`] - security posture counters

mod health;
mod security;

pub use health::{
    HealthCollection, HealthCollector, HealthQuery, BUILD_RESULT_SERIES, HEALTH_QUERIES,
};
pub use security::{SecurityAuditSource, StaticSecurityAudit};
