//! Score calculation

use crate::config::{FinalWeights, HealthWeights};
use crate::models::{HealthMetrics, SecurityMetrics};

/// Usage assumed when the JVM reports no maximum heap
const FALLBACK_MEMORY_USAGE_PCT: f64 = 50.0;

/// Points lost per queued build
const QUEUE_PENALTY_PER_ITEM: f64 = 10.0;

/// Security deductions per finding
const OUTDATED_PLUGIN_PENALTY: f64 = 5.0;
const CRITICAL_VULNERABILITY_PENALTY: f64 = 20.0;
const EXTRA_ADMIN_PENALTY: f64 = 5.0;
const MISSING_AUTH_PENALTY: f64 = 15.0;

/// The four normalized health sub-scores, before weighting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthBreakdown {
    pub success_rate: f64,
    pub executor_score: f64,
    pub queue_score: f64,
    pub memory_usage_pct: f64,
    pub memory_score: f64,
}

/// Round to two decimals.
///
/// Rounds the exact binary value, so `70.345` (stored just below the tie)
/// goes down to `70.34`.
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Compute the health sub-scores.
///
/// A zero denominator is treated as the neutral case rather than an error.
pub fn health_breakdown(m: &HealthMetrics) -> HealthBreakdown {
    let success_rate = if m.total_builds == 0.0 {
        100.0
    } else {
        m.successful_builds / m.total_builds * 100.0
    };

    let executor_score = if m.executor_total == 0.0 {
        100.0
    } else {
        100.0 - (m.executor_busy / m.executor_total * 100.0)
    };

    let queue_score = (100.0 - m.queue_size * QUEUE_PENALTY_PER_ITEM).max(0.0);

    let memory_usage_pct = if m.memory_max > 0.0 {
        m.memory_used / m.memory_max * 100.0
    } else {
        FALLBACK_MEMORY_USAGE_PCT
    };
    let memory_score = (100.0 - memory_usage_pct).max(0.0);

    HealthBreakdown {
        success_rate,
        executor_score,
        queue_score,
        memory_usage_pct,
        memory_score,
    }
}

/// Health score with the default weights
pub fn health_score(m: &HealthMetrics) -> f64 {
    health_score_weighted(m, &HealthWeights::default())
}

pub fn health_score_weighted(m: &HealthMetrics, weights: &HealthWeights) -> f64 {
    let b = health_breakdown(m);
    let weighted = b.success_rate * weights.success_rate
        + b.executor_score * weights.executor
        + b.queue_score * weights.queue
        + b.memory_score * weights.memory;

    round2(weighted.clamp(0.0, 100.0))
}

/// Security score: 100 minus per-finding deductions, floored at 0.
///
/// The first admin account is free.
pub fn security_score(s: &SecurityMetrics) -> f64 {
    let extra_admins = s.user_accounts_admin.saturating_sub(1);

    let score = 100.0
        - f64::from(s.outdated_plugins) * OUTDATED_PLUGIN_PENALTY
        - f64::from(s.critical_vulnerabilities) * CRITICAL_VULNERABILITY_PENALTY
        - f64::from(extra_admins) * EXTRA_ADMIN_PENALTY
        - f64::from(s.missing_auth_settings) * MISSING_AUTH_PENALTY;

    round2(score).max(0.0)
}

/// Final score with the default 60/40 split
pub fn final_score(health: f64, security: f64) -> f64 {
    final_score_weighted(health, security, &FinalWeights::default())
}

pub fn final_score_weighted(health: f64, security: f64, weights: &FinalWeights) -> f64 {
    round2(health * weights.health + security * weights.security)
}
