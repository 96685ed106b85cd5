//! Security posture sources
//!
//! Scoring only depends on [`SecurityMetrics`]; where the counters come from
//! is behind [`SecurityAuditSource`]. The only source today is
//! [`StaticSecurityAudit`], which reports configured findings.

use crate::models::SecurityMetrics;
use anyhow::Result;
use tracing::debug;

/// A provider of security posture counters
pub trait SecurityAuditSource {
    /// Name of this source (for logging)
    fn name(&self) -> &str;

    /// Produce the current counters. Errors abort the run.
    fn collect(&self) -> Result<SecurityMetrics>;
}

/// Returns a fixed set of findings
#[derive(Debug, Clone)]
pub struct StaticSecurityAudit {
    findings: SecurityMetrics,
}

impl StaticSecurityAudit {
    pub fn new(findings: SecurityMetrics) -> Self {
        Self { findings }
    }
}

impl Default for StaticSecurityAudit {
    fn default() -> Self {
        Self::new(SecurityMetrics {
            outdated_plugins: 2,
            critical_vulnerabilities: 1,
            user_accounts_admin: 3,
            missing_auth_settings: 0,
        })
    }
}

impl SecurityAuditSource for StaticSecurityAudit {
    fn name(&self) -> &str {
        "static"
    }

    fn collect(&self) -> Result<SecurityMetrics> {
        debug!("Security findings from static source: {:?}", self.findings);
        Ok(self.findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReporterConfig;

    #[test]
    fn test_default_findings() {
        let findings = StaticSecurityAudit::default().collect().expect("static audit");
        assert_eq!(
            findings,
            SecurityMetrics {
                outdated_plugins: 2,
                critical_vulnerabilities: 1,
                user_accounts_admin: 3,
                missing_auth_settings: 0,
            }
        );
    }

    #[test]
    fn test_default_matches_config_default() {
        let from_config = StaticSecurityAudit::new(ReporterConfig::default().security);
        assert_eq!(
            from_config.collect().expect("static audit"),
            StaticSecurityAudit::default().collect().expect("static audit")
        );
    }

    #[test]
    fn test_usable_as_trait_object() {
        let source: Box<dyn SecurityAuditSource> = Box::new(StaticSecurityAudit::new(
            SecurityMetrics::default(),
        ));
        assert_eq!(source.name(), "static");
        assert_eq!(source.collect().expect("static audit"), SecurityMetrics::default());
    }
}
