//! Runtime configuration.
//!
//! Bridges CLI flags and the optional settings file with the paths the
//! orchestrator needs. Handles workflow file discovery and owns the
//! `.phasegate/` directory layout: state file, reports directory, settings.

use anyhow::{Context, Result, anyhow};
use glob::glob;
use std::path::PathBuf;

use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct Config {
    pub project_dir: PathBuf,
    pub workflow_file: PathBuf,
    pub state_file: PathBuf,
    pub reports_dir: PathBuf,
    pub verbose: bool,
    pub settings: Settings,
}

impl Config {
    /// Create a new Config, discovering the workflow file when none is given.
    pub fn new(project_dir: PathBuf, verbose: bool, workflow_file: Option<PathBuf>) -> Result<Self> {
        let project_dir = project_dir
            .canonicalize()
            .context("Failed to resolve project directory")?;

        let workflow_file = match workflow_file {
            Some(path) => path
                .canonicalize()
                .context("Failed to resolve workflow file path")?,
            None => Self::find_workflow_file(&project_dir)?,
        };

        let phasegate_dir = project_dir.join(".phasegate");
        let state_file = phasegate_dir.join("state");
        let settings = Settings::load_or_default(&phasegate_dir.join("phasegate.toml"))?;
        let reports_dir = match &settings.defaults.reports_dir {
            Some(dir) => project_dir.join(dir),
            None => phasegate_dir.join("reports"),
        };

        Ok(Self {
            project_dir,
            workflow_file,
            state_file,
            reports_dir,
            verbose,
            settings,
        })
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.reports_dir)
            .context("Failed to create reports directory")?;
        if let Some(parent) = self.state_file.parent() {
            std::fs::create_dir_all(parent).context("Failed to create state directory")?;
        }
        Ok(())
    }

    /// Find a workflow file, checking .phasegate/workflow.{json,yaml} first,
    /// then *workflow*.{json,yaml} in the project directory.
    /// Returns the most recently modified file if multiple match.
    fn find_workflow_file(project_dir: &PathBuf) -> Result<PathBuf> {
        for name in ["workflow.json", "workflow.yaml", "workflow.yml"] {
            let preferred = project_dir.join(".phasegate").join(name);
            if preferred.exists() {
                return Ok(preferred);
            }
        }

        let mut candidates: Vec<PathBuf> = Vec::new();
        for pattern in ["*workflow*.json", "*workflow*.yaml", "*workflow*.yml"] {
            let pattern = project_dir.join(pattern).to_string_lossy().to_string();
            candidates.extend(
                glob(&pattern)
                    .context("Failed to read glob pattern")?
                    .filter_map(|entry| entry.ok()),
            );
        }

        if candidates.is_empty() {
            return Err(anyhow!(
                "No workflow file found. Create .phasegate/workflow.json or provide --workflow-file"
            ));
        }

        // Sort by modification time (most recent first)
        candidates.sort_by(|a, b| {
            let a_time = a.metadata().and_then(|m| m.modified()).ok();
            let b_time = b.metadata().and_then(|m| m.modified()).ok();
            b_time.cmp(&a_time)
        });

        Ok(candidates.remove(0))
    }
}
