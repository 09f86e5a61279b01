//! Append-only run state log.
//!
//! Each line records one event: `run_id|subject|status|timestamp`, where
//! `subject` is a phase name or the literal `run` for run-level markers.
//! The log backs `phasegate status` across process restarts; the
//! authoritative record of a run is its JSON report.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::io::Write;

/// Marker subject for run-level entries.
const RUN_SUBJECT: &str = "run";

#[derive(Debug, Clone, PartialEq)]
pub struct StateEntry {
    pub run_id: String,
    /// Phase name, or `run` for run start/finish markers
    pub subject: String,
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl StateEntry {
    /// Check if this is a run-level marker rather than a phase entry.
    pub fn is_run_marker(&self) -> bool {
        self.subject == RUN_SUBJECT
    }
}

pub struct StateManager {
    state_file: std::path::PathBuf,
}

impl StateManager {
    pub fn new(state_file: std::path::PathBuf) -> Self {
        Self { state_file }
    }

    fn append(&self, run_id: &str, subject: &str, status: &str) -> Result<()> {
        let entry = format!(
            "{}|{}|{}|{}\n",
            run_id,
            subject,
            status,
            Utc::now().to_rfc3339()
        );

        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.state_file)
            .context("Failed to open state file")?
            .write_all(entry.as_bytes())
            .context("Failed to write state entry")?;

        Ok(())
    }

    pub fn record_run_started(&self, run_id: &str) -> Result<()> {
        self.append(run_id, RUN_SUBJECT, "started")
    }

    pub fn record_phase(&self, run_id: &str, phase: &str, status: &str) -> Result<()> {
        self.append(run_id, phase, status)
    }

    pub fn record_run_finished(&self, run_id: &str, status: &str) -> Result<()> {
        self.append(run_id, RUN_SUBJECT, status)
    }

    /// Get all state entries, oldest first. Malformed lines are skipped.
    pub fn get_entries(&self) -> Result<Vec<StateEntry>> {
        if !self.state_file.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.state_file).context("Failed to read state file")?;

        let entries: Vec<StateEntry> = content
            .lines()
            .filter_map(|line| {
                let parts: Vec<&str> = line.split('|').collect();
                if parts.len() != 4 {
                    return None;
                }
                Some(StateEntry {
                    run_id: parts[0].to_string(),
                    subject: parts[1].to_string(),
                    status: parts[2].to_string(),
                    timestamp: DateTime::parse_from_rfc3339(parts[3])
                        .ok()?
                        .with_timezone(&Utc),
                })
            })
            .collect();

        Ok(entries)
    }

    /// Get the most recently started run's id.
    pub fn last_run_id(&self) -> Option<String> {
        let entries = self.get_entries().ok()?;
        entries
            .iter()
            .rfind(|e| e.is_run_marker() && e.status == "started")
            .map(|e| e.run_id.clone())
    }

    /// Get entries belonging to one run, oldest first.
    pub fn entries_for_run(&self, run_id: &str) -> Result<Vec<StateEntry>> {
        let entries = self.get_entries()?;
        Ok(entries.into_iter().filter(|e| e.run_id == run_id).collect())
    }

    /// Get the final status of the most recent run, if it finished.
    pub fn last_run_outcome(&self) -> Option<(String, String)> {
        let run_id = self.last_run_id()?;
        let entries = self.entries_for_run(&run_id).ok()?;
        entries
            .iter()
            .rfind(|e| e.is_run_marker() && e.status != "started")
            .map(|e| (run_id.clone(), e.status.clone()))
    }

    pub fn reset(&self) -> Result<()> {
        if self.state_file.exists() {
            fs::remove_file(&self.state_file).context("Failed to remove state file")?;
        }
        Ok(())
    }
}
