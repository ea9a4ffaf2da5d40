//! quizrun-report: exam report output.
//!
//! JSON persistence lives on [`quizrun_core::report::ExamReport`]; this crate
//! adds the self-contained HTML page and the format selection used by the CLI.

pub mod html;

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use quizrun_core::report::ExamReport;

/// Output formats for a finished exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Json,
    Html,
    All,
}

impl std::str::FromStr for ReportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "html" => Ok(ReportFormat::Html),
            "all" => Ok(ReportFormat::All),
            other => anyhow::bail!("unknown report format '{other}' (expected json, html or all)"),
        }
    }
}

/// Write `report` into `dir` in the requested format(s).
///
/// Files are named `exam-<session id>.{json,html}`. Returns the written paths.
pub fn write_reports(report: &ExamReport, dir: &Path, format: ReportFormat) -> Result<Vec<PathBuf>> {
    let stem = format!("exam-{}", report.id);
    let mut written = Vec::new();

    if matches!(format, ReportFormat::Json | ReportFormat::All) {
        let path = dir.join(format!("{stem}.json"));
        report.save_json(&path)?;
        written.push(path);
    }
    if matches!(format, ReportFormat::Html | ReportFormat::All) {
        let path = dir.join(format!("{stem}.html"));
        html::write_html_report(report, &path)?;
        written.push(path);
    }
    Ok(written)
}
