//! Jenkins Health & Security Scoring
//!
//! Three pure, total functions turn collected metrics into scores in
//! [0, 100], each rounded to two decimals.
//!
//! # Scoring Formula
//!
//! ```text
//! Health   = clamp(Success × 0.40 + Executor × 0.20 + Queue × 0.10 + Memory × 0.30, 0, 100)
//!
//! Where:
//!   Success  = successful / total × 100           (100 when no builds)
//!   Executor = 100 - busy / defined × 100          (100 when no executors)
//!   Queue    = max(0, 100 - queued × 10)
//!   Memory   = max(0, 100 - used / max × 100)      (usage taken as 50% when max ≤ 0)
//!
//! Security = max(0, 100 - outdated × 5 - critical × 20
//!                     - max(0, admins - 1) × 5 - missing_auth × 15)
//!
//! Final    = Health × 0.6 + Security × 0.4
//! ```
//!
//! # Example
//!
//! 8 of 10 builds green, 2/4 executors busy, 1 queued, 40% heap:
//! - Health = 80 × 0.4 + 50 × 0.2 + 90 × 0.1 + 60 × 0.3 = 69.00
//!
//! 2 outdated plugins, 1 critical CVE, 3 admins:
//! - Security = 100 - 10 - 20 - 10 = 60.00
//!
//! Final = 69 × 0.6 + 60 × 0.4 = 65.40

mod scorer;

pub use scorer::{
    final_score, final_score_weighted, health_breakdown, health_score, health_score_weighted,
    round2, security_score, HealthBreakdown,
};
