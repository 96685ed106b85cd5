//! JSON reporter
//!
//! Pretty-printed with a 4-space indent, both for the persisted report and for
//! the metric dumps on stdout.

use crate::models::ScoreReport;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// Serialize any value as 4-space indented JSON
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}

/// Render report as JSON
pub fn render(report: &ScoreReport) -> Result<String> {
    to_pretty_json(report)
}

/// Write the report to `path`, replacing any previous file
pub fn write(report: &ScoreReport, path: &Path) -> Result<()> {
    let json = render(report)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report to {}", path.display()))
}
