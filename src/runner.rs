//! Single-phase execution.
//!
//! The runner resolves a phase's action through the registry, hands it
//! exactly the phase's declared inputs, and converts every failure mode —
//! missing inputs, action errors, timeouts — into a `Failed` result value.
//! Nothing that happens during phase execution escapes as an error; the
//! orchestrator and its callers always deal in `PhaseResult`s.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::actions::ActionRegistry;
use crate::phase::{OutputMap, Phase};

/// Outcome of one phase, as recorded in the run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    Success,
    /// Completed, but at least one warning rule failed at the gate
    Warning,
    /// A blocking rule failed at the gate; the run halted here
    Blocked,
    /// Missing input, action error, or timeout; the run halted here
    Failed,
}

impl std::fmt::Display for PhaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PhaseStatus::Success => "success",
            PhaseStatus::Warning => "warning",
            PhaseStatus::Blocked => "blocked",
            PhaseStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Result of executing (or refusing to execute) one phase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhaseResult {
    pub phase_name: String,
    pub status: PhaseStatus,
    /// Keys the phase's action produced
    pub output: OutputMap,
    /// Failure causes and gate messages, in the order they were recorded
    pub messages: Vec<String>,
}

impl PhaseResult {
    pub fn success(phase_name: &str, output: OutputMap) -> Self {
        Self {
            phase_name: phase_name.to_string(),
            status: PhaseStatus::Success,
            output,
            messages: Vec::new(),
        }
    }

    pub fn failed(phase_name: &str, messages: Vec<String>) -> Self {
        Self {
            phase_name: phase_name.to_string(),
            status: PhaseStatus::Failed,
            output: OutputMap::new(),
            messages,
        }
    }

    pub fn is_halting(&self) -> bool {
        matches!(self.status, PhaseStatus::Blocked | PhaseStatus::Failed)
    }
}

/// Executes phases against registered actions.
pub struct PhaseRunner {
    registry: ActionRegistry,
    /// Upper bound on any single action invocation
    timeout: Duration,
}

impl PhaseRunner {
    pub fn new(registry: ActionRegistry, timeout: Duration) -> Self {
        Self { registry, timeout }
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    pub fn has_action(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    /// Execute one phase.
    ///
    /// `inputs` is the orchestrator's accumulated mapping; only the phase's
    /// declared `required_inputs` are passed to the action, extra keys are
    /// ignored. A missing key fails fast without invoking the action.
    pub async fn execute(&self, phase: &Phase, inputs: &OutputMap) -> PhaseResult {
        let missing: Vec<&String> = phase
            .required_inputs
            .iter()
            .filter(|key| !inputs.contains_key(key.as_str()))
            .collect();

        if !missing.is_empty() {
            let messages = missing
                .iter()
                .map(|key| format!("required input '{}' is missing", key))
                .collect();
            return PhaseResult::failed(&phase.name, messages);
        }

        let selected: OutputMap = phase
            .required_inputs
            .iter()
            .filter_map(|key| inputs.get(key).map(|v| (key.clone(), v.clone())))
            .collect();

        let Some(action) = self.registry.get(&phase.action) else {
            return PhaseResult::failed(
                &phase.name,
                vec![format!("no action registered under '{}'", phase.action)],
            );
        };

        debug!(phase = %phase.name, action = %phase.action, "executing phase");

        match tokio::time::timeout(self.timeout, action.run(&selected)).await {
            Ok(Ok(output)) => PhaseResult::success(&phase.name, output),
            Ok(Err(err)) => PhaseResult::failed(
                &phase.name,
                vec![format!("action '{}' failed: {:#}", phase.action, err)],
            ),
            Err(_) => PhaseResult::failed(
                &phase.name,
                vec![format!(
                    "action '{}' timed out after {}s",
                    phase.action,
                    self.timeout.as_secs()
                )],
            ),
        }
    }
}
