//! Workflow inspection commands — `phasegate list`, `status`, `reset`,
//! and `validate`.

use anyhow::{Result, bail};
use console::style;
use std::path::Path;
use std::time::Duration;

use super::super::Cli;

pub fn cmd_list(cli: &Cli, project_dir: &Path) -> Result<()> {
    use phasegate::config::Config;
    use phasegate::phase::WorkflowFile;

    let config = Config::new(project_dir.to_path_buf(), cli.verbose, cli.workflow_file.clone())?;
    let workflow = WorkflowFile::load(&config.workflow_file)?;

    let mut phases = workflow.phases.clone();
    phases.sort_by_key(|p| p.ordinal);

    println!();
    println!("Workflow: {}", config.workflow_file.display());
    println!();

    if phases.is_empty() {
        println!("  (no phases defined)");
        return Ok(());
    }

    for phase in &phases {
        let rule_count = workflow.rules_for(&phase.name).len();
        println!(
            "  {:>3}  {}  {}",
            phase.ordinal,
            style(&phase.name).bold(),
            style(format!("action={}", phase.action)).dim()
        );
        if !phase.required_inputs.is_empty() {
            println!("       requires: {}", phase.required_inputs.join(", "));
        }
        if !phase.produces.is_empty() {
            println!("       produces: {}", phase.produces.join(", "));
        }
        if rule_count > 0 {
            println!("       rules: {}", rule_count);
        }
    }
    println!();

    Ok(())
}

pub fn cmd_validate(cli: &Cli, project_dir: &Path) -> Result<()> {
    use phasegate::actions::ActionRegistry;
    use phasegate::config::Config;
    use phasegate::orchestrator::validate_config;
    use phasegate::phase::WorkflowFile;

    let config = Config::new(project_dir.to_path_buf(), cli.verbose, cli.workflow_file.clone())?;
    let workflow = WorkflowFile::load(&config.workflow_file)?;

    println!();
    println!("Validating {} ...", config.workflow_file.display());

    for warning in config.settings.validate() {
        println!("  {} {}", style("warning:").yellow(), warning);
    }

    let timeout = Duration::from_secs(config.settings.defaults.timeout_secs);
    let registry = ActionRegistry::from_configs(&workflow.actions, timeout);

    match validate_config(&workflow.phases, &workflow.rules, &registry) {
        Ok(ordered) => {
            println!(
                "  {} {} phase(s), {} rule set(s)",
                style("valid:").green(),
                ordered.len(),
                workflow.rules.len()
            );
            println!();
            Ok(())
        }
        Err(err) => {
            println!("  {} {}", style("invalid:").red(), err);
            println!();
            bail!("Workflow configuration is invalid")
        }
    }
}

pub fn cmd_status(cli: &Cli, project_dir: &Path) -> Result<()> {
    use phasegate::config::Config;
    use phasegate::orchestrator::StateManager;

    let config = Config::new(project_dir.to_path_buf(), cli.verbose, cli.workflow_file.clone())?;
    let state = StateManager::new(config.state_file.clone());

    let Some(run_id) = state.last_run_id() else {
        println!("No runs recorded. Run 'phasegate run' first.");
        return Ok(());
    };

    println!();
    println!("Last run: {}", style(&run_id).dim());
    for entry in state.entries_for_run(&run_id)? {
        if entry.is_run_marker() {
            println!(
                "  {}  {}",
                entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                style(format!("run {}", entry.status)).bold()
            );
        } else {
            println!(
                "  {}  {}: {}",
                entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                entry.subject,
                entry.status
            );
        }
    }
    println!();

    Ok(())
}

pub fn cmd_reset(cli: &Cli, project_dir: &Path, force: bool) -> Result<()> {
    use phasegate::config::Config;
    use phasegate::orchestrator::StateManager;

    if !force {
        bail!("This clears the run state log. Re-run with --force to confirm.");
    }

    let config = Config::new(project_dir.to_path_buf(), cli.verbose, cli.workflow_file.clone())?;
    let state = StateManager::new(config.state_file.clone());
    state.reset()?;
    println!("State log cleared.");

    Ok(())
}
