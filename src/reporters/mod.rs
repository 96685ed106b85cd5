//! Output reporters
//!
//! - `text` - terminal summary (banner, metric dumps, scores)
//! - `json` - the persisted `jenkins_score_report.json`
//! - `chart` - the `jenkins_score_visual.png` bar chart

pub mod chart;
mod glyphs;
pub mod json;
pub mod text;
