//! Jenkins health metrics collector
//!
//! Issues nine instant queries, one at a time. A query that fails for any
//! reason contributes 0.0; the failure is logged at `warn` and otherwise
//! ignored so the report is always produced.

use crate::metrics::{MetricsQuery, QueryError};
use crate::models::HealthMetrics;
use indicatif::ProgressBar;
use tracing::{debug, warn};

/// Series carrying the last build result code per job
/// (0 = success, 1 = failure, 2 = unstable, 3 = aborted)
pub const BUILD_RESULT_SERIES: &str = "default_jenkins_builds_last_build_result";

/// One of the fixed health queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HealthQuery {
    SuccessfulBuilds,
    FailedBuilds,
    UnstableBuilds,
    AbortedBuilds,
    ExecutorBusy,
    ExecutorTotal,
    QueueSize,
    MemoryUsed,
    MemoryMax,
}

/// Every health query, in the order they are issued
pub const HEALTH_QUERIES: [HealthQuery; 9] = [
    HealthQuery::SuccessfulBuilds,
    HealthQuery::FailedBuilds,
    HealthQuery::UnstableBuilds,
    HealthQuery::AbortedBuilds,
    HealthQuery::ExecutorBusy,
    HealthQuery::ExecutorTotal,
    HealthQuery::QueueSize,
    HealthQuery::MemoryUsed,
    HealthQuery::MemoryMax,
];

impl HealthQuery {
    /// PromQL expression, verbatim as the Jenkins Prometheus plugin names things
    pub fn expression(&self) -> &'static str {
        match self {
            HealthQuery::SuccessfulBuilds => "count(default_jenkins_builds_last_build_result == 0)",
            HealthQuery::FailedBuilds => "count(default_jenkins_builds_last_build_result == 1)",
            HealthQuery::UnstableBuilds => "count(default_jenkins_builds_last_build_result == 2)",
            HealthQuery::AbortedBuilds => "count(default_jenkins_builds_last_build_result == 3)",
            HealthQuery::ExecutorBusy => "default_jenkins_executors_busy",
            HealthQuery::ExecutorTotal => "default_jenkins_executors_defined",
            HealthQuery::QueueSize => "default_jenkins_executors_queue_length",
            HealthQuery::MemoryUsed => "jvm_memory_bytes_used",
            HealthQuery::MemoryMax => "jvm_memory_bytes_max",
        }
    }

    /// Report field the value lands in
    pub fn field_name(&self) -> &'static str {
        match self {
            HealthQuery::SuccessfulBuilds => "successful_builds",
            HealthQuery::FailedBuilds => "failed_builds",
            HealthQuery::UnstableBuilds => "unstable_builds",
            HealthQuery::AbortedBuilds => "aborted_builds",
            HealthQuery::ExecutorBusy => "executor_busy",
            HealthQuery::ExecutorTotal => "executor_total",
            HealthQuery::QueueSize => "queue_size",
            HealthQuery::MemoryUsed => "memory_used",
            HealthQuery::MemoryMax => "memory_max",
        }
    }

    fn slot<'m>(&self, m: &'m mut HealthMetrics) -> &'m mut f64 {
        match self {
            HealthQuery::SuccessfulBuilds => &mut m.successful_builds,
            HealthQuery::FailedBuilds => &mut m.failed_builds,
            HealthQuery::UnstableBuilds => &mut m.unstable_builds,
            HealthQuery::AbortedBuilds => &mut m.aborted_builds,
            HealthQuery::ExecutorBusy => &mut m.executor_busy,
            HealthQuery::ExecutorTotal => &mut m.executor_total,
            HealthQuery::QueueSize => &mut m.queue_size,
            HealthQuery::MemoryUsed => &mut m.memory_used,
            HealthQuery::MemoryMax => &mut m.memory_max,
        }
    }
}

/// Collected metrics plus the queries that fell back to zero
#[derive(Debug)]
pub struct HealthCollection {
    pub metrics: HealthMetrics,
    pub failures: Vec<(HealthQuery, QueryError)>,
}

pub struct HealthCollector<Q: MetricsQuery> {
    source: Q,
    progress: Option<ProgressBar>,
}

impl<Q: MetricsQuery> HealthCollector<Q> {
    pub fn new(source: Q) -> Self {
        Self {
            source,
            progress: None,
        }
    }

    /// Advance `progress` once per query
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Collect all health metrics, substituting 0.0 for any failed query
    pub fn collect(&self) -> HealthMetrics {
        self.collect_detailed().metrics
    }

    /// Like [`collect`](Self::collect), but keeps the per-query failures
    pub fn collect_detailed(&self) -> HealthCollection {
        let mut metrics = HealthMetrics::default();
        let mut failures = Vec::new();

        for query in HEALTH_QUERIES {
            if let Some(pb) = &self.progress {
                pb.set_message(format!("Querying {}...", query.field_name()));
            }

            let value = match self.source.query(query.expression()) {
                Ok(value) => value,
                Err(e) => {
                    warn!("{} unavailable, using 0: {}", query.field_name(), e);
                    failures.push((query, e));
                    0.0
                }
            };
            *query.slot(&mut metrics) = value;

            if let Some(pb) = &self.progress {
                pb.inc(1);
            }
        }

        let metrics = metrics.with_derived_total();
        debug!(
            "Collected health metrics: {} builds, {}/{} executors busy, {} queued ({} queries failed)",
            metrics.total_builds,
            metrics.executor_busy,
            metrics.executor_total,
            metrics.queue_size,
            failures.len()
        );

        HealthCollection { metrics, failures }
    }
}
