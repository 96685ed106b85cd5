//! Text (terminal) reporter

use super::json::to_pretty_json;
use crate::config::OutputConfig;
use crate::models::ScoreReport;
use anyhow::Result;
use console::style;

const BANNER: &str = "=== JENKINS HEALTH & SECURITY REPORT ===";

/// Header printed before any metric is collected
pub fn banner() -> String {
    format!("\n{}\n", style(BANNER).bold())
}

/// Metric dumps followed by the three scores
pub fn render(report: &ScoreReport) -> Result<String> {
    let mut out = String::new();

    out.push_str(&to_pretty_json(&report.health_metrics)?);
    out.push_str("\n\n");
    out.push_str(&to_pretty_json(&report.security_metrics)?);
    out.push_str("\n\n");

    out.push_str(&format!("{}\n", style("Scores:").bold()));
    out.push_str(&format!("Health Score  : {}\n", format_score(report.health_score)));
    out.push_str(&format!("Security Score: {}\n", format_score(report.security_score)));
    out.push_str(&format!("Final Score   : {}\n", format_score(report.final_score)));

    Ok(out)
}

/// Confirmation lines naming both artifacts
pub fn render_saved(output: &OutputConfig) -> String {
    format!(
        "\n{} Saved: {}\n{} Saved: {}\n",
        style("✓").green(),
        output.report_path.display(),
        style("✓").green(),
        output.chart_path.display()
    )
}

fn format_score(score: f64) -> String {
    format!("{:.2}", score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_report;

    fn plain(s: &str) -> String {
        console::strip_ansi_codes(s).to_string()
    }

    #[test]
    fn test_banner() {
        assert_eq!(
            plain(&banner()),
            "\n=== JENKINS HEALTH & SECURITY REPORT ===\n"
        );
    }

    #[test]
    fn test_render_scores() {
        let out = plain(&render(&test_report()).expect("render"));
        assert!(out.contains("Scores:\n"));
        assert!(out.contains("Health Score  : 69.00\n"));
        assert!(out.contains("Security Score: 60.00\n"));
        assert!(out.contains("Final Score   : 65.40\n"));
    }

    #[test]
    fn test_render_metric_dumps_in_order() {
        let out = plain(&render(&test_report()).expect("render"));
        let health = out.find("\"successful_builds\": 8.0").expect("health dump");
        let security = out.find("\"outdated_plugins\": 2").expect("security dump");
        let scores = out.find("Scores:").expect("scores");
        assert!(health < security && security < scores);
    }

    #[test]
    fn test_render_saved() {
        let out = plain(&render_saved(&OutputConfig::default()));
        assert!(out.contains("Saved: jenkins_score_report.json\n"));
        assert!(out.contains("Saved: jenkins_score_visual.png\n"));
    }
}
