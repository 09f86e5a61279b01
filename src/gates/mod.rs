//! Validation gates evaluated between phases.
//!
//! A gate takes the finished phase's result and the rules declared for that
//! phase, evaluates every rule in declaration order (no short-circuiting, so
//! every message is collected), and decides whether the run may continue.
//! Blocking failures always win over warnings. The gate never mutates the
//! phase result; recording messages on it is the orchestrator's job.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::phase::OutputMap;
use crate::runner::PhaseResult;

/// How a failed rule affects the run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Surface the failure and keep going.
    Warning,
    /// Halt the run; the workflow must not progress past invalid state.
    Blocking,
}

/// A deterministic predicate over a phase's output mapping.
///
/// Conditions assert over present values: a missing key fails the condition,
/// whatever the operator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Condition {
    /// The key is present in the output.
    Exists { key: String },
    /// The key equals the given JSON value.
    Equals {
        key: String,
        value: serde_json::Value,
    },
    /// The key is present and differs from the given JSON value.
    NotEquals {
        key: String,
        value: serde_json::Value,
    },
    /// The key is boolean `true`.
    IsTrue { key: String },
    /// The key is a non-empty string or array.
    NonEmpty { key: String },
    /// The key is a number strictly greater than the threshold.
    GreaterThan { key: String, value: f64 },
    /// The key is a number strictly less than the threshold.
    LessThan { key: String, value: f64 },
}

impl Condition {
    /// Evaluate the condition against a phase output mapping.
    pub fn eval(&self, output: &OutputMap) -> bool {
        match self {
            Condition::Exists { key } => output.contains_key(key),
            Condition::Equals { key, value } => output.get(key) == Some(value),
            Condition::NotEquals { key, value } => {
                output.get(key).is_some_and(|actual| actual != value)
            }
            Condition::IsTrue { key } => {
                output.get(key).and_then(|v| v.as_bool()) == Some(true)
            }
            Condition::NonEmpty { key } => match output.get(key) {
                Some(serde_json::Value::String(s)) => !s.is_empty(),
                Some(serde_json::Value::Array(a)) => !a.is_empty(),
                _ => false,
            },
            Condition::GreaterThan { key, value } => output
                .get(key)
                .and_then(|v| v.as_f64())
                .is_some_and(|n| n > *value),
            Condition::LessThan { key, value } => output
                .get(key)
                .and_then(|v| v.as_f64())
                .is_some_and(|n| n < *value),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Exists { key } => write!(f, "'{}' exists", key),
            Condition::Equals { key, value } => write!(f, "'{}' == {}", key, value),
            Condition::NotEquals { key, value } => write!(f, "'{}' != {}", key, value),
            Condition::IsTrue { key } => write!(f, "'{}' is true", key),
            Condition::NonEmpty { key } => write!(f, "'{}' is non-empty", key),
            Condition::GreaterThan { key, value } => write!(f, "'{}' > {}", key, value),
            Condition::LessThan { key, value } => write!(f, "'{}' < {}", key, value),
        }
    }
}

/// A single validation rule attached to a phase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationRule {
    /// Stable identifier, used in messages and reports
    pub id: String,
    /// Predicate that must hold over the phase's output
    pub condition: Condition,
    pub severity: Severity,
    /// Message shown when the rule fails; a default is derived from the
    /// condition when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationRule {
    fn failure_message(&self) -> String {
        match &self.message {
            Some(msg) => format!("rule '{}': {}", self.id, msg),
            None => format!("rule '{}' failed: expected {}", self.id, self.condition),
        }
    }
}

/// The gate's verdict for one phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Pass,
    Warn,
    Block,
}

/// Decision plus the messages of every failed rule, in declaration order.
#[derive(Debug, Clone)]
pub struct GateOutcome {
    pub decision: GateDecision,
    pub messages: Vec<String>,
}

impl GateOutcome {
    fn pass() -> Self {
        Self {
            decision: GateDecision::Pass,
            messages: Vec::new(),
        }
    }
}

/// Evaluates validation rules against finished phase results.
#[derive(Debug, Default)]
pub struct ValidationGate;

impl ValidationGate {
    pub fn new() -> Self {
        Self
    }

    /// Check a phase result against the rules declared for its phase.
    ///
    /// Every rule is evaluated, so the outcome carries the message of every
    /// failed rule, not just the first one.
    pub fn check(&self, result: &PhaseResult, rules: &[ValidationRule]) -> GateOutcome {
        if rules.is_empty() {
            return GateOutcome::pass();
        }

        let mut messages = Vec::new();
        let mut any_blocking = false;
        let mut any_warning = false;

        for rule in rules {
            if rule.condition.eval(&result.output) {
                continue;
            }
            match rule.severity {
                Severity::Blocking => any_blocking = true,
                Severity::Warning => any_warning = true,
            }
            messages.push(rule.failure_message());
        }

        let decision = if any_blocking {
            GateDecision::Block
        } else if any_warning {
            GateDecision::Warn
        } else {
            GateDecision::Pass
        };

        GateOutcome { decision, messages }
    }
}
