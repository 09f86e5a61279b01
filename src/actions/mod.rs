//! Phase actions — the capability interface to external collaborators.
//!
//! The runner never talks to a concrete service; it resolves a phase's
//! `action` name through an `ActionRegistry` and invokes the `PhaseAction`
//! trait. Workflow files can define the built-in action kinds inline;
//! library callers register custom implementations on top.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use crate::phase::OutputMap;

pub mod command;
pub use command::CommandAction;

/// An action a phase can perform against an external collaborator.
///
/// Implementations own all side effects; errors are surfaced as `Err` and
/// converted into a `Failed` phase result by the runner.
#[async_trait]
pub trait PhaseAction: Send + Sync {
    async fn run(&self, inputs: &OutputMap) -> Result<OutputMap>;
}

/// File-format definition of a built-in action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionConfig {
    /// Return a fixed output map. Useful for gate-only phases and dry runs.
    Values { values: OutputMap },
    /// Spawn a subprocess: inputs go to stdin as JSON, the last JSON object
    /// line of stdout becomes the output map.
    Command {
        program: String,
        #[serde(default)]
        args: Vec<String>,
        /// Per-action timeout; the settings default applies when absent
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timeout_secs: Option<u64>,
        /// Bounded retries on failure, defaults to none
        #[serde(default)]
        retries: u32,
    },
}

/// Returns its configured values, ignoring inputs.
pub struct ValuesAction {
    values: OutputMap,
}

impl ValuesAction {
    pub fn new(values: OutputMap) -> Self {
        Self { values }
    }
}

#[async_trait]
impl PhaseAction for ValuesAction {
    async fn run(&self, _inputs: &OutputMap) -> Result<OutputMap> {
        Ok(self.values.clone())
    }
}

/// Named actions available to a workflow's phases.
#[derive(Default)]
pub struct ActionRegistry {
    actions: HashMap<String, Box<dyn PhaseAction>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from the workflow file's action definitions.
    ///
    /// `default_timeout` applies to command actions that do not declare
    /// their own.
    pub fn from_configs(
        configs: &BTreeMap<String, ActionConfig>,
        default_timeout: Duration,
    ) -> Self {
        let mut registry = Self::new();
        for (name, config) in configs {
            let action: Box<dyn PhaseAction> = match config {
                ActionConfig::Values { values } => Box::new(ValuesAction::new(values.clone())),
                ActionConfig::Command {
                    program,
                    args,
                    timeout_secs,
                    retries,
                } => Box::new(CommandAction::new(
                    program,
                    args.clone(),
                    timeout_secs.map_or(default_timeout, Duration::from_secs),
                    *retries,
                )),
            };
            registry.register(name, action);
        }
        registry
    }

    /// Register an action under a name, replacing any previous entry.
    pub fn register(&mut self, name: &str, action: Box<dyn PhaseAction>) {
        self.actions.insert(name.to_string(), action);
    }

    pub fn get(&self, name: &str) -> Option<&dyn PhaseAction> {
        self.actions.get(name).map(|a| a.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }
}
