//! Terminal UI for workflow runs, rendered via `indicatif` progress bars.
//!
//! Two bars are stacked vertically: a phase bar tracking how many phases
//! have finished, and a status spinner naming the phase currently running.
//! Completed phases are printed as persistent lines above the bars.

use console::style;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::orchestrator::RunStatus;
use crate::runner::{PhaseResult, PhaseStatus};

pub struct ProgressUI {
    multi: MultiProgress,
    phase_bar: ProgressBar,
    status_bar: ProgressBar,
    verbose: bool,
}

impl ProgressUI {
    /// Create the UI and add both progress bars to the multiplex renderer.
    ///
    /// Call this once before the run starts; `total_phases` sizes the
    /// phase bar.
    pub fn new(total_phases: u64, verbose: bool) -> Self {
        let multi = MultiProgress::new();

        let phase_style = ProgressStyle::default_bar()
            .template("{prefix:.bold.dim} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("progress bar template is a valid static string")
            .progress_chars("█▓▒░");

        let phase_bar = multi.add(ProgressBar::new(total_phases));
        phase_bar.set_style(phase_style);
        phase_bar.set_prefix("Phases");

        let status_style = ProgressStyle::default_spinner()
            .template("{prefix:.bold.dim} {spinner} {msg}")
            .expect("progress bar template is a valid static string");

        let status_bar = multi.add(ProgressBar::new_spinner());
        status_bar.set_style(status_style);
        status_bar.set_prefix(" Phase");

        Self {
            multi,
            phase_bar,
            status_bar,
            verbose,
        }
    }

    /// Print a line via `MultiProgress`, falling back to `eprintln!` if the
    /// rich UI fails.
    fn print_line(&self, msg: impl AsRef<str>) {
        if self.multi.println(msg.as_ref()).is_err() {
            eprintln!("{}", msg.as_ref());
        }
    }

    pub fn start_phase(&self, name: &str) {
        self.status_bar
            .set_message(format!("Running {}", style(name).yellow()));
        self.status_bar
            .enable_steady_tick(Duration::from_millis(100));
    }

    /// Record a finished phase: advance the bar and print a persistent line.
    pub fn phase_done(&self, result: &PhaseResult) {
        self.status_bar.disable_steady_tick();
        self.phase_bar.inc(1);

        let line = match result.status {
            PhaseStatus::Success => format!("{} {}", style("✓").green(), result.phase_name),
            PhaseStatus::Warning => format!(
                "{} {} {}",
                style("!").yellow(),
                result.phase_name,
                style("(warnings)").dim()
            ),
            PhaseStatus::Blocked => format!(
                "{} {} {}",
                style("■").red(),
                result.phase_name,
                style("(blocked)").red()
            ),
            PhaseStatus::Failed => format!(
                "{} {} {}",
                style("✗").red(),
                result.phase_name,
                style("(failed)").red()
            ),
        };
        self.print_line(line);

        if self.verbose {
            for message in &result.messages {
                self.print_line(format!("    {}", style(message).dim()));
            }
        }
    }

    /// Print a step-level detail line (verbose mode only).
    pub fn log_step(&self, msg: &str) {
        if self.verbose {
            self.print_line(format!("  {}", style(msg).dim()));
        }
    }

    /// Tear down the bars and print the overall outcome.
    pub fn finish(&self, status: RunStatus) {
        self.status_bar.finish_and_clear();
        let msg = match status {
            RunStatus::Success => style("Workflow completed").green().bold().to_string(),
            RunStatus::Blocked => style("Workflow blocked").red().bold().to_string(),
            RunStatus::Failed => style("Workflow failed").red().bold().to_string(),
            RunStatus::Running => style("Workflow interrupted").yellow().bold().to_string(),
        };
        self.phase_bar.finish_with_message(msg);
    }
}
