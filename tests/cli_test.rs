//! CLI contract tests
//!
//! Run the built binary against an unreachable Prometheus: every metric falls
//! back to zero, yet the report, both artifacts and the exit status must
//! still come out right.

use std::net::TcpListener;
use std::path::Path;
use std::process::Command;

fn jenkins_score_bin() -> String {
    env!("CARGO_BIN_EXE_jenkins-score").to_string()
}

/// An endpoint on a port nothing listens on
fn dead_endpoint() -> String {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    format!("http://127.0.0.1:{}/api/v1/query", port)
}

fn run(dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(jenkins_score_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("JENKINS_SCORE_PROMETHEUS_URL")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run jenkins-score");
    let stdout = console::strip_ansi_codes(&String::from_utf8_lossy(&output.stdout)).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (output.status.code().unwrap_or(-1), stdout, stderr)
}

#[test]
fn test_unreachable_backend_produces_full_report() {
    let dir = tempfile::tempdir().unwrap();
    let url = dead_endpoint();
    let (code, stdout, stderr) = run(dir.path(), &["--prometheus-url", &url, "--timeout", "2"]);

    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.contains("=== JENKINS HEALTH & SECURITY REPORT ==="));
    assert!(stdout.contains("\"total_builds\": 0.0"));
    assert!(stdout.contains("Health Score  : 85.00"));
    assert!(stdout.contains("Security Score: 60.00"));
    assert!(stdout.contains("Final Score   : 75.00"));
    assert!(stdout.contains("Saved: jenkins_score_report.json"));
    assert!(stdout.contains("Saved: jenkins_score_visual.png"));

    // Silent by default: no warnings about the zeroed metrics
    assert!(!stderr.contains("unavailable"), "stderr: {stderr}");

    assert!(dir.path().join("jenkins_score_report.json").exists());
    assert!(dir.path().join("jenkins_score_visual.png").exists());
}

#[test]
fn test_warn_level_surfaces_fallbacks() {
    let dir = tempfile::tempdir().unwrap();
    let url = dead_endpoint();
    let (code, _, stderr) = run(
        dir.path(),
        &["--prometheus-url", &url, "--timeout", "2", "--log-level", "warn"],
    );

    assert_eq!(code, 0);
    assert!(stderr.contains("successful_builds unavailable"), "stderr: {stderr}");
}

#[test]
fn test_output_dir_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let url = dead_endpoint();
    let (code, _, stderr) = run(
        dir.path(),
        &["--prometheus-url", &url, "--output-dir", "reports/today"],
    );

    assert_eq!(code, 0, "stderr: {stderr}");
    let out = dir.path().join("reports/today");
    let report: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(out.join("jenkins_score_report.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(report["final_score"], 75.0);
    assert!(out.join("jenkins_score_visual.png").exists());
}

#[test]
fn test_config_file_is_picked_up() {
    let dir = tempfile::tempdir().unwrap();
    let url = dead_endpoint();
    std::fs::write(
        dir.path().join("jenkins-score.toml"),
        format!(
            "[prometheus]\nurl = \"{url}\"\ntimeout_secs = 2\n\n[security]\noutdated_plugins = 0\ncritical_vulnerabilities = 0\nuser_accounts_admin = 1\nmissing_auth_settings = 0\n"
        ),
    )
    .unwrap();

    let (code, stdout, stderr) = run(dir.path(), &[]);
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.contains("Security Score: 100.00"));
    // 85 × 0.6 + 100 × 0.4
    assert!(stdout.contains("Final Score   : 91.00"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run(dir.path(), &["--config", "nope.toml"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("nope.toml"), "stderr: {stderr}");
}

#[test]
fn test_init_writes_template() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run(dir.path(), &["init"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Created"));

    let content = std::fs::read_to_string(dir.path().join("jenkins-score.toml")).unwrap();
    assert!(content.contains("[prometheus]"));
    assert!(content.contains("http://localhost:9090/api/v1/query"));
}
