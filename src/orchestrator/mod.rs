//! Sequential workflow orchestration.
//!
//! The orchestrator owns one run at a time: it validates the static
//! configuration up front (the only true error path), then walks the phases
//! in ordinal order, feeding each one from the accumulated output mapping,
//! gating its result, and halting on the first hard failure or blocking
//! rule. Whatever happens, callers get back a complete `WorkflowRun`
//! describing every phase attempted.

pub mod state;

pub use state::StateManager;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::actions::ActionRegistry;
use crate::errors::ConfigError;
use crate::gates::{GateDecision, ValidationGate, ValidationRule};
use crate::phase::{OutputMap, Phase};
use crate::runner::{PhaseResult, PhaseRunner, PhaseStatus};
use crate::ui::ProgressUI;

/// Final (or in-flight) status of a whole run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Running,
    Success,
    /// A blocking validation rule failed
    Blocked,
    /// A phase failed: missing input, action error, or timeout
    Failed,
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RunStatus::Running => "running",
            RunStatus::Success => "success",
            RunStatus::Blocked => "blocked",
            RunStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// One complete workflow run: every phase attempted, in execution order.
///
/// Mutated only by appending results while the run is live; `finish` seals
/// the overall status and end timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowRun {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub phase_results: Vec<PhaseResult>,
    pub overall_status: RunStatus,
}

impl WorkflowRun {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            ended_at: None,
            phase_results: Vec::new(),
            overall_status: RunStatus::Running,
        }
    }

    fn push_result(&mut self, result: PhaseResult) {
        self.phase_results.push(result);
    }

    fn finish(&mut self, status: RunStatus) {
        self.overall_status = status;
        self.ended_at = Some(Utc::now());
    }

    /// Get the result recorded for a phase, if it was attempted.
    pub fn result_for(&self, phase_name: &str) -> Option<&PhaseResult> {
        self.phase_results
            .iter()
            .find(|r| r.phase_name == phase_name)
    }
}

impl Default for WorkflowRun {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate workflow configuration before any phase runs.
///
/// Returns the phases sorted by ordinal. Fails on non-increasing ordinals,
/// duplicate phase names, rules targeting unknown phases, and actions with
/// no registry entry.
pub fn validate_config(
    phases: &[Phase],
    rules: &BTreeMap<String, Vec<ValidationRule>>,
    registry: &ActionRegistry,
) -> Result<Vec<Phase>, ConfigError> {
    let mut ordered = phases.to_vec();
    ordered.sort_by_key(|p| p.ordinal);

    let mut names = HashSet::new();
    let mut previous: Option<u32> = None;

    for phase in &ordered {
        if !names.insert(phase.name.clone()) {
            return Err(ConfigError::DuplicatePhaseName {
                name: phase.name.clone(),
            });
        }
        if let Some(prev) = previous
            && phase.ordinal <= prev
        {
            return Err(ConfigError::OrdinalNotIncreasing {
                phase: phase.name.clone(),
                ordinal: phase.ordinal,
                previous: prev,
            });
        }
        previous = Some(phase.ordinal);

        if !registry.contains(&phase.action) {
            return Err(ConfigError::UnknownAction {
                phase: phase.name.clone(),
                action: phase.action.clone(),
            });
        }
    }

    for (phase_name, phase_rules) in rules {
        if !names.contains(phase_name.as_str()) {
            let rule = phase_rules
                .first()
                .map_or(phase_name.clone(), |r| r.id.clone());
            return Err(ConfigError::RuleForUnknownPhase {
                rule,
                phase: phase_name.clone(),
            });
        }
    }

    Ok(ordered)
}

/// Drives one workflow run at a time.
///
/// Concurrent runs need independent orchestrator instances; the accumulated
/// mapping is owned exclusively by one run for its whole lifetime.
pub struct WorkflowOrchestrator {
    runner: PhaseRunner,
    gate: ValidationGate,
}

impl WorkflowOrchestrator {
    pub fn new(registry: ActionRegistry, action_timeout: Duration) -> Self {
        Self {
            runner: PhaseRunner::new(registry, action_timeout),
            gate: ValidationGate::new(),
        }
    }

    pub fn runner(&self) -> &PhaseRunner {
        &self.runner
    }

    /// Run the workflow to completion, block, or failure.
    ///
    /// Only configuration problems surface as `Err`; every run-time outcome
    /// is recorded in the returned `WorkflowRun`.
    pub async fn run(
        &self,
        initial_inputs: OutputMap,
        phases: &[Phase],
        rules: &BTreeMap<String, Vec<ValidationRule>>,
        ui: Option<Arc<ProgressUI>>,
    ) -> Result<WorkflowRun, ConfigError> {
        let ordered = self.validate(phases, rules)?;

        let mut run = WorkflowRun::new();
        let mut accumulated = initial_inputs;

        info!(run_id = %run.run_id, phases = ordered.len(), "starting workflow run");

        for phase in &ordered {
            if let Some(ref ui) = ui {
                ui.start_phase(&phase.name);
            }

            // Inputs are checked here, before the runner is involved: a key
            // no earlier phase produced is a normal run-time outcome, not an
            // exception.
            let missing: Vec<&String> = phase
                .required_inputs
                .iter()
                .filter(|key| !accumulated.contains_key(key.as_str()))
                .collect();
            if !missing.is_empty() {
                let result = PhaseResult::failed(
                    &phase.name,
                    missing
                        .iter()
                        .map(|key| format!("required input '{}' is missing", key))
                        .collect(),
                );
                info!(phase = %phase.name, "missing required inputs, halting run");
                if let Some(ref ui) = ui {
                    ui.phase_done(&result);
                }
                run.push_result(result);
                run.finish(RunStatus::Failed);
                return Ok(run);
            }

            let mut result = self.runner.execute(phase, &accumulated).await;

            if result.status == PhaseStatus::Failed {
                info!(phase = %phase.name, "phase failed, halting run");
                if let Some(ref ui) = ui {
                    ui.phase_done(&result);
                }
                run.push_result(result);
                run.finish(RunStatus::Failed);
                return Ok(run);
            }

            let outcome = self
                .gate
                .check(&result, rules.get(&phase.name).map_or(&[], |r| r.as_slice()));

            match outcome.decision {
                GateDecision::Block => {
                    result.status = PhaseStatus::Blocked;
                    result.messages.extend(outcome.messages);
                    info!(phase = %phase.name, "blocking rule failed, halting run");
                    if let Some(ref ui) = ui {
                        ui.phase_done(&result);
                    }
                    run.push_result(result);
                    run.finish(RunStatus::Blocked);
                    return Ok(run);
                }
                GateDecision::Warn => {
                    result.status = PhaseStatus::Warning;
                    result.messages.extend(outcome.messages);
                    debug!(phase = %phase.name, "gate warned, continuing");
                }
                GateDecision::Pass => {}
            }

            // A warning still allows forward progress, so produced outputs
            // are merged on both pass and warn.
            self.merge_produced(phase, &mut result, &mut accumulated);

            if let Some(ref ui) = ui {
                ui.phase_done(&result);
            }
            run.push_result(result);
        }

        run.finish(RunStatus::Success);
        info!(run_id = %run.run_id, "workflow run succeeded");
        Ok(run)
    }

    /// Validate phases and rules against this orchestrator's registry.
    pub fn validate(
        &self,
        phases: &[Phase],
        rules: &BTreeMap<String, Vec<ValidationRule>>,
    ) -> Result<Vec<Phase>, ConfigError> {
        validate_config(phases, rules, self.runner.registry())
    }

    /// Merge the phase's declared `produces` keys into the accumulated
    /// mapping. A declared key the action did not produce is recorded on
    /// the result, not fatal.
    fn merge_produced(&self, phase: &Phase, result: &mut PhaseResult, accumulated: &mut OutputMap) {
        for key in &phase.produces {
            match result.output.get(key) {
                Some(value) => {
                    accumulated.insert(key.clone(), value.clone());
                }
                None => {
                    warn!(phase = %phase.name, key = %key, "declared output not produced");
                    result
                        .messages
                        .push(format!("declared output '{}' was not produced", key));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{PhaseAction, ValuesAction};
    use crate::gates::{Condition, Severity};
    use anyhow::Result;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    fn output_with(entries: &[(&str, serde_json::Value)]) -> OutputMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn rule(id: &str, condition: Condition, severity: Severity) -> ValidationRule {
        ValidationRule {
            id: id.into(),
            condition,
            severity,
            message: None,
        }
    }

    /// Appends its phase label to a shared trace on every invocation.
    struct TracingAction {
        label: String,
        trace: Arc<Mutex<Vec<String>>>,
        output: OutputMap,
    }

    #[async_trait]
    impl PhaseAction for TracingAction {
        async fn run(&self, _inputs: &OutputMap) -> Result<OutputMap> {
            self.trace.lock().unwrap().push(self.label.clone());
            Ok(self.output.clone())
        }
    }

    fn orchestrator_with(actions: Vec<(&str, Box<dyn PhaseAction>)>) -> WorkflowOrchestrator {
        let mut registry = ActionRegistry::new();
        for (name, action) in actions {
            registry.register(name, action);
        }
        WorkflowOrchestrator::new(registry, Duration::from_secs(5))
    }

    fn values_action(entries: &[(&str, serde_json::Value)]) -> Box<dyn PhaseAction> {
        Box::new(ValuesAction::new(output_with(entries)))
    }

    /// The two-phase eligibility workflow used by several scenarios.
    fn eligibility_phases() -> Vec<Phase> {
        vec![
            Phase::new(
                "eligibility",
                1,
                vec!["org_type".into()],
                vec!["eligible".into()],
                "check_eligibility",
            ),
            Phase::new(
                "data_collection",
                2,
                vec!["eligible".into()],
                vec!["data".into()],
                "collect",
            ),
        ]
    }

    fn eligibility_blocking_rules() -> BTreeMap<String, Vec<ValidationRule>> {
        let mut rules = BTreeMap::new();
        rules.insert(
            "eligibility".to_string(),
            vec![rule(
                "must-be-eligible",
                Condition::IsTrue { key: "eligible".into() },
                Severity::Blocking,
            )],
        );
        rules
    }

    // =========================================
    // Configuration validation
    // =========================================

    #[test]
    fn test_validate_sorts_by_ordinal() {
        let orch = orchestrator_with(vec![("noop", values_action(&[]))]);
        let phases = vec![
            Phase::new("second", 2, vec![], vec![], "noop"),
            Phase::new("first", 1, vec![], vec![], "noop"),
        ];

        let ordered = orch.validate(&phases, &BTreeMap::new()).unwrap();
        assert_eq!(ordered[0].name, "first");
        assert_eq!(ordered[1].name, "second");
    }

    #[test]
    fn test_validate_rejects_duplicate_ordinals() {
        let orch = orchestrator_with(vec![("noop", values_action(&[]))]);
        let phases = vec![
            Phase::new("a", 1, vec![], vec![], "noop"),
            Phase::new("b", 1, vec![], vec![], "noop"),
        ];

        let err = orch.validate(&phases, &BTreeMap::new()).unwrap_err();
        assert!(matches!(err, ConfigError::OrdinalNotIncreasing { .. }));
    }

    #[test]
    fn test_validate_rejects_duplicate_names() {
        let orch = orchestrator_with(vec![("noop", values_action(&[]))]);
        let phases = vec![
            Phase::new("a", 1, vec![], vec![], "noop"),
            Phase::new("a", 2, vec![], vec![], "noop"),
        ];

        let err = orch.validate(&phases, &BTreeMap::new()).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicatePhaseName { .. }));
    }

    #[test]
    fn test_validate_rejects_unknown_action() {
        let orch = orchestrator_with(vec![("noop", values_action(&[]))]);
        let phases = vec![Phase::new("a", 1, vec![], vec![], "ghost")];

        let err = orch.validate(&phases, &BTreeMap::new()).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownAction { .. }));
    }

    #[test]
    fn test_validate_rejects_rule_for_unknown_phase() {
        let orch = orchestrator_with(vec![("noop", values_action(&[]))]);
        let phases = vec![Phase::new("a", 1, vec![], vec![], "noop")];
        let mut rules = BTreeMap::new();
        rules.insert(
            "misspelled".to_string(),
            vec![rule(
                "r1",
                Condition::Exists { key: "x".into() },
                Severity::Warning,
            )],
        );

        let err = orch.validate(&phases, &rules).unwrap_err();
        match err {
            ConfigError::RuleForUnknownPhase { rule, phase } => {
                assert_eq!(rule, "r1");
                assert_eq!(phase, "misspelled");
            }
            other => panic!("Expected RuleForUnknownPhase, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_run_empty_workflow_succeeds() {
        let orch = orchestrator_with(vec![]);
        let run = orch
            .run(OutputMap::new(), &[], &BTreeMap::new(), None)
            .await
            .unwrap();
        assert_eq!(run.overall_status, RunStatus::Success);
        assert!(run.phase_results.is_empty());
        assert!(run.ended_at.is_some());
    }

    // =========================================
    // Ordering and data flow
    // =========================================

    #[tokio::test]
    async fn test_run_executes_phases_in_ordinal_order_once_each() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let orch = orchestrator_with(vec![
            (
                "act_c",
                Box::new(TracingAction {
                    label: "c".into(),
                    trace: trace.clone(),
                    output: OutputMap::new(),
                }),
            ),
            (
                "act_a",
                Box::new(TracingAction {
                    label: "a".into(),
                    trace: trace.clone(),
                    output: OutputMap::new(),
                }),
            ),
            (
                "act_b",
                Box::new(TracingAction {
                    label: "b".into(),
                    trace: trace.clone(),
                    output: OutputMap::new(),
                }),
            ),
        ]);
        // Declared out of order on purpose
        let phases = vec![
            Phase::new("c", 30, vec![], vec![], "act_c"),
            Phase::new("a", 10, vec![], vec![], "act_a"),
            Phase::new("b", 20, vec![], vec![], "act_b"),
        ];

        let run = orch
            .run(OutputMap::new(), &phases, &BTreeMap::new(), None)
            .await
            .unwrap();

        assert_eq!(run.overall_status, RunStatus::Success);
        assert_eq!(*trace.lock().unwrap(), vec!["a", "b", "c"]);
        let names: Vec<&str> = run
            .phase_results
            .iter()
            .map(|r| r.phase_name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_run_feeds_later_phases_from_earlier_outputs() {
        let seen = Arc::new(Mutex::new(Vec::new()));

        struct EchoInputs {
            seen: Arc<Mutex<Vec<String>>>,
        }

        #[async_trait]
        impl PhaseAction for EchoInputs {
            async fn run(&self, inputs: &OutputMap) -> Result<OutputMap> {
                let mut keys: Vec<String> = inputs.keys().cloned().collect();
                keys.sort();
                self.seen.lock().unwrap().extend(keys);
                Ok(OutputMap::new())
            }
        }

        let orch = orchestrator_with(vec![
            ("produce", values_action(&[("eligible", json!(true))])),
            ("consume", Box::new(EchoInputs { seen: seen.clone() })),
        ]);
        let phases = vec![
            Phase::new("first", 1, vec![], vec!["eligible".into()], "produce"),
            Phase::new("second", 2, vec!["eligible".into()], vec![], "consume"),
        ];

        let run = orch
            .run(OutputMap::new(), &phases, &BTreeMap::new(), None)
            .await
            .unwrap();

        assert_eq!(run.overall_status, RunStatus::Success);
        assert_eq!(*seen.lock().unwrap(), vec!["eligible".to_string()]);
    }

    #[tokio::test]
    async fn test_run_merges_only_declared_produces_keys() {
        let orch = orchestrator_with(vec![
            (
                "chatty",
                values_action(&[("declared", json!(1)), ("undeclared", json!(2))]),
            ),
            ("probe", values_action(&[])),
        ]);
        let phases = vec![
            Phase::new("first", 1, vec![], vec!["declared".into()], "chatty"),
            // The undeclared key never reached the accumulated mapping
            Phase::new("second", 2, vec!["undeclared".into()], vec![], "probe"),
        ];

        let run = orch
            .run(OutputMap::new(), &phases, &BTreeMap::new(), None)
            .await
            .unwrap();

        assert_eq!(run.overall_status, RunStatus::Failed);
        let second = run.result_for("second").unwrap();
        assert!(second.messages[0].contains("undeclared"));
    }

    #[tokio::test]
    async fn test_run_records_missing_declared_output_without_failing() {
        let orch = orchestrator_with(vec![("quiet", values_action(&[]))]);
        let phases = vec![Phase::new(
            "first",
            1,
            vec![],
            vec!["promised".into()],
            "quiet",
        )];

        let run = orch
            .run(OutputMap::new(), &phases, &BTreeMap::new(), None)
            .await
            .unwrap();

        assert_eq!(run.overall_status, RunStatus::Success);
        let first = &run.phase_results[0];
        assert_eq!(first.status, PhaseStatus::Success);
        assert!(first.messages[0].contains("promised"));
    }

    // =========================================
    // Halting semantics
    // =========================================

    #[tokio::test]
    async fn test_run_halts_on_failed_phase() {
        struct Exploding;

        #[async_trait]
        impl PhaseAction for Exploding {
            async fn run(&self, _inputs: &OutputMap) -> Result<OutputMap> {
                anyhow::bail!("spreadsheet service unavailable")
            }
        }

        let orch = orchestrator_with(vec![
            ("explode", Box::new(Exploding)),
            ("later", values_action(&[])),
        ]);
        let phases = vec![
            Phase::new("first", 1, vec![], vec![], "explode"),
            Phase::new("second", 2, vec![], vec![], "later"),
        ];

        let run = orch
            .run(OutputMap::new(), &phases, &BTreeMap::new(), None)
            .await
            .unwrap();

        assert_eq!(run.overall_status, RunStatus::Failed);
        assert_eq!(run.phase_results.len(), 1);
        assert_eq!(run.phase_results[0].status, PhaseStatus::Failed);
        assert!(run.phase_results[0].messages[0].contains("spreadsheet service"));
        assert!(run.result_for("second").is_none());
    }

    #[tokio::test]
    async fn test_run_blocked_iff_blocking_rule_failed() {
        let orch = orchestrator_with(vec![
            ("check_eligibility", values_action(&[("eligible", json!(false))])),
            ("collect", values_action(&[("data", json!("rows"))])),
        ]);

        let run = orch
            .run(
                output_with(&[("org_type", json!("501c3"))]),
                &eligibility_phases(),
                &eligibility_blocking_rules(),
                None,
            )
            .await
            .unwrap();

        assert_eq!(run.overall_status, RunStatus::Blocked);
        assert_eq!(run.phase_results.len(), 1);
        let first = &run.phase_results[0];
        assert_eq!(first.status, PhaseStatus::Blocked);
        assert!(first.messages[0].contains("must-be-eligible"));
        // data_collection never ran
        assert!(run.result_for("data_collection").is_none());
    }

    #[tokio::test]
    async fn test_run_warning_continues_and_merges() {
        let orch = orchestrator_with(vec![
            ("produce", values_action(&[("rows", json!([])), ("data", json!("d"))])),
            ("consume", values_action(&[])),
        ]);
        let phases = vec![
            Phase::new("first", 1, vec![], vec!["data".into()], "produce"),
            Phase::new("second", 2, vec!["data".into()], vec![], "consume"),
        ];
        let mut rules = BTreeMap::new();
        rules.insert(
            "first".to_string(),
            vec![rule(
                "rows-present",
                Condition::NonEmpty { key: "rows".into() },
                Severity::Warning,
            )],
        );

        let run = orch
            .run(OutputMap::new(), &phases, &rules, None)
            .await
            .unwrap();

        assert_eq!(run.overall_status, RunStatus::Success);
        let first = run.result_for("first").unwrap();
        assert_eq!(first.status, PhaseStatus::Warning);
        assert!(first.messages[0].contains("rows-present"));
        // The warned phase's outputs still flowed downstream
        assert_eq!(run.result_for("second").unwrap().status, PhaseStatus::Success);
    }

    #[tokio::test]
    async fn test_run_missing_initial_input_fails_fast() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let orch = orchestrator_with(vec![
            (
                "check_eligibility",
                Box::new(TracingAction {
                    label: "invoked".into(),
                    trace: calls.clone(),
                    output: OutputMap::new(),
                }),
            ),
            ("collect", values_action(&[])),
        ]);

        // org_type absent from initial inputs
        let run = orch
            .run(
                OutputMap::new(),
                &eligibility_phases(),
                &BTreeMap::new(),
                None,
            )
            .await
            .unwrap();

        assert_eq!(run.overall_status, RunStatus::Failed);
        assert_eq!(run.phase_results.len(), 1);
        let first = &run.phase_results[0];
        assert_eq!(first.status, PhaseStatus::Failed);
        assert!(first.messages[0].contains("org_type"));
        // The eligibility action was never invoked
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_run_eligibility_scenario_succeeds() {
        let orch = orchestrator_with(vec![
            ("check_eligibility", values_action(&[("eligible", json!(true))])),
            ("collect", values_action(&[("data", json!("rows"))])),
        ]);

        let run = orch
            .run(
                output_with(&[("org_type", json!("501c3"))]),
                &eligibility_phases(),
                &eligibility_blocking_rules(),
                None,
            )
            .await
            .unwrap();

        assert_eq!(run.overall_status, RunStatus::Success);
        assert_eq!(run.phase_results.len(), 2);
        assert!(run.phase_results.iter().all(|r| r.status == PhaseStatus::Success));
    }

    #[tokio::test]
    async fn test_run_is_idempotent_for_pure_actions() {
        let phases = eligibility_phases();
        let rules = eligibility_blocking_rules();
        let inputs = output_with(&[("org_type", json!("501c3"))]);

        let mut status_sequences = Vec::new();
        for _ in 0..2 {
            let orch = orchestrator_with(vec![
                ("check_eligibility", values_action(&[("eligible", json!(true))])),
                ("collect", values_action(&[("data", json!("rows"))])),
            ]);
            let run = orch
                .run(inputs.clone(), &phases, &rules, None)
                .await
                .unwrap();
            status_sequences.push((
                run.overall_status,
                run.phase_results
                    .iter()
                    .map(|r| r.status)
                    .collect::<Vec<_>>(),
            ));
        }

        assert_eq!(status_sequences[0], status_sequences[1]);
    }

    #[tokio::test]
    async fn test_run_ids_are_unique_per_run() {
        let orch = orchestrator_with(vec![]);
        let a = orch
            .run(OutputMap::new(), &[], &BTreeMap::new(), None)
            .await
            .unwrap();
        let b = orch
            .run(OutputMap::new(), &[], &BTreeMap::new(), None)
            .await
            .unwrap();
        assert_ne!(a.run_id, b.run_id);
    }

    #[test]
    fn test_workflow_run_serializes_with_public_fields() {
        let mut run = WorkflowRun::new();
        run.push_result(PhaseResult::success("eligibility", OutputMap::new()));
        run.finish(RunStatus::Success);

        let json = serde_json::to_value(&run).unwrap();
        assert!(json.get("run_id").is_some());
        assert_eq!(json["overall_status"], "success");
        assert_eq!(json["phase_results"][0]["phase_name"], "eligibility");
    }
}
