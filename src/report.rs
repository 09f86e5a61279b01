//! Run reports — the serialized record of a finished workflow run.
//!
//! Each finalized `WorkflowRun` is written as pretty-printed JSON under the
//! reports directory; external renderers (spreadsheet/HTML exporters and
//! the like) consume these files and nothing else. The text summary here is
//! for terminal output only.

use anyhow::{Context, Result};
use console::style;
use std::fs;
use std::path::{Path, PathBuf};

use crate::orchestrator::{RunStatus, WorkflowRun};
use crate::runner::{PhaseResult, PhaseStatus};

pub struct ReportWriter {
    reports_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(reports_dir: &Path) -> Self {
        Self {
            reports_dir: reports_dir.to_path_buf(),
        }
    }

    /// Write a finalized run to the reports directory.
    pub fn write(&self, run: &WorkflowRun) -> Result<PathBuf> {
        let filename = format!(
            "{}_{}.json",
            run.started_at.format("%Y-%m-%dT%H-%M-%S"),
            &run.run_id.to_string()[..8]
        );
        let report_file = self.reports_dir.join(filename);

        let json = serde_json::to_string_pretty(run).context("Failed to serialize run report")?;
        fs::write(&report_file, json).context("Failed to write run report file")?;

        Ok(report_file)
    }

    /// Load a previously written report.
    pub fn load(path: &Path) -> Result<WorkflowRun> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read report file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse report file: {}", path.display()))
    }

    /// List report files, most recent first.
    pub fn list_reports(&self) -> Result<Vec<PathBuf>> {
        if !self.reports_dir.exists() {
            return Ok(Vec::new());
        }

        let mut reports: Vec<PathBuf> = fs::read_dir(&self.reports_dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().map(|e| e == "json").unwrap_or(false))
            .collect();

        reports.sort();
        reports.reverse();
        Ok(reports)
    }
}

fn status_icon(status: PhaseStatus) -> console::StyledObject<&'static str> {
    match status {
        PhaseStatus::Success => style("✓").green(),
        PhaseStatus::Warning => style("!").yellow(),
        PhaseStatus::Blocked => style("■").red(),
        PhaseStatus::Failed => style("✗").red(),
    }
}

fn phase_line(result: &PhaseResult) -> String {
    let mut line = format!("  {} {}", status_icon(result.status), result.phase_name);
    for message in &result.messages {
        line.push_str(&format!("\n      {}", style(message).dim()));
    }
    line
}

/// Render a terminal summary of a run.
pub fn render_summary(run: &WorkflowRun) -> String {
    let overall = match run.overall_status {
        RunStatus::Success => style("success").green().bold(),
        RunStatus::Blocked => style("blocked").red().bold(),
        RunStatus::Failed => style("failed").red().bold(),
        RunStatus::Running => style("running").cyan().bold(),
    };

    let mut lines = vec![format!(
        "Run {} — {}",
        style(run.run_id).dim(),
        overall
    )];
    for result in &run.phase_results {
        lines.push(phase_line(result));
    }
    lines.join("\n")
}
