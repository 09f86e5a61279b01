//! Workflow execution — `phasegate run`.

use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use super::super::Cli;

pub async fn cmd_run(
    cli: &Cli,
    project_dir: PathBuf,
    inputs: &[String],
    inputs_file: Option<&Path>,
) -> Result<()> {
    use phasegate::actions::ActionRegistry;
    use phasegate::config::Config;
    use phasegate::orchestrator::{RunStatus, StateManager, WorkflowOrchestrator};
    use phasegate::phase::WorkflowFile;
    use phasegate::report::{ReportWriter, render_summary};
    use phasegate::ui::ProgressUI;

    let config = Config::new(project_dir, cli.verbose, cli.workflow_file.clone())?;
    config.ensure_directories()?;

    for warning in config.settings.validate() {
        eprintln!("Warning: {}", warning);
    }

    let workflow = WorkflowFile::load(&config.workflow_file)?;
    let initial_inputs = build_initial_inputs(inputs, inputs_file)?;

    let timeout = Duration::from_secs(config.settings.defaults.timeout_secs);
    let registry = ActionRegistry::from_configs(&workflow.actions, timeout);
    let orchestrator = WorkflowOrchestrator::new(registry, timeout);

    let ui = Arc::new(ProgressUI::new(workflow.phases.len() as u64, cli.verbose));
    ui.log_step(&format!("Workflow: {}", config.workflow_file.display()));

    let run = orchestrator
        .run(
            initial_inputs,
            &workflow.phases,
            &workflow.rules,
            Some(ui.clone()),
        )
        .await?;
    ui.finish(run.overall_status);

    // Record the run in the state log for `phasegate status`
    let state = StateManager::new(config.state_file.clone());
    let run_id = run.run_id.to_string();
    state.record_run_started(&run_id)?;
    for result in &run.phase_results {
        state.record_phase(&run_id, &result.phase_name, &result.status.to_string())?;
    }
    state.record_run_finished(&run_id, &run.overall_status.to_string())?;

    let report_path = ReportWriter::new(&config.reports_dir).write(&run)?;

    println!();
    println!("{}", render_summary(&run));
    println!();
    println!("Report: {}", report_path.display());

    match run.overall_status {
        RunStatus::Success => Ok(()),
        RunStatus::Blocked => std::process::exit(2),
        _ => std::process::exit(1),
    }
}

/// Merge the inputs file (if any) with `--input key=value` pairs; explicit
/// pairs win.
fn build_initial_inputs(
    pairs: &[String],
    inputs_file: Option<&Path>,
) -> Result<serde_json::Map<String, serde_json::Value>> {
    let mut initial = match inputs_file {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read inputs file: {}", path.display()))?;
            let value: serde_json::Value = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse inputs file: {}", path.display()))?;
            match value {
                serde_json::Value::Object(map) => map,
                _ => bail!(
                    "Inputs file must contain a JSON object: {}",
                    path.display()
                ),
            }
        }
        None => serde_json::Map::new(),
    };

    for pair in pairs {
        let (key, value) = parse_input_pair(pair)?;
        initial.insert(key, value);
    }

    Ok(initial)
}

/// Parse one `key=value` pair. The value is taken as JSON when it parses,
/// otherwise as a plain string, so `--input eligible=true` yields a boolean
/// and `--input org_type=501c3` a string.
fn parse_input_pair(pair: &str) -> Result<(String, serde_json::Value)> {
    let Some((key, raw)) = pair.split_once('=') else {
        bail!("Invalid --input '{}': expected key=value", pair);
    };
    if key.is_empty() {
        bail!("Invalid --input '{}': empty key", pair);
    }

    let value = serde_json::from_str(raw)
        .unwrap_or_else(|_| serde_json::Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}
