//! Phase definitions and workflow file loading.
//!
//! This module provides:
//! - `Phase` struct representing a single workflow phase
//! - `WorkflowFile` struct representing the full workflow.json/yaml format
//!   (phases, per-phase validation rules, and action definitions)
//! - Loading and saving functions for file-based workflow configuration

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::actions::ActionConfig;
use crate::gates::ValidationRule;

/// Key-value outputs exchanged between phases.
///
/// Also the shape of the accumulated mapping the orchestrator grows as
/// phases produce outputs.
pub type OutputMap = serde_json::Map<String, serde_json::Value>;

/// Represents a single workflow phase.
///
/// Ordinals define strict execution order; a phase is immutable once defined.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Phase {
    /// Unique phase name (e.g., "eligibility")
    pub name: String,
    /// Execution order; must be strictly increasing across the workflow
    pub ordinal: u32,
    /// Keys this phase consumes from the accumulated mapping
    #[serde(default)]
    pub required_inputs: Vec<String>,
    /// Keys this phase contributes to the accumulated mapping
    #[serde(default)]
    pub produces: Vec<String>,
    /// Name of the registered action that implements this phase
    pub action: String,
}

impl Phase {
    /// Create a new Phase with all fields.
    pub fn new(
        name: &str,
        ordinal: u32,
        required_inputs: Vec<String>,
        produces: Vec<String>,
        action: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            ordinal,
            required_inputs,
            produces,
            action: action.to_string(),
        }
    }
}

/// Represents the full workflow file format.
///
/// `rules` maps a phase name to the validation rules its gate evaluates,
/// in declaration order. `actions` defines the built-in actions phases may
/// reference by name; library callers can register further actions
/// programmatically.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowFile {
    /// List of phases, in any order; ordinals decide execution order
    pub phases: Vec<Phase>,
    /// Validation rules keyed by phase name
    #[serde(default)]
    pub rules: BTreeMap<String, Vec<ValidationRule>>,
    /// Built-in action definitions keyed by action name
    #[serde(default)]
    pub actions: BTreeMap<String, ActionConfig>,
}

impl WorkflowFile {
    /// Load a workflow from a JSON or YAML file, chosen by extension.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read workflow file: {}", path.display()))?;

        let workflow: WorkflowFile = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse workflow YAML: {}", path.display()))?,
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse workflow JSON: {}", path.display()))?,
            other => bail!(
                "Unsupported workflow file extension {:?} for {}",
                other,
                path.display()
            ),
        };

        Ok(workflow)
    }

    /// Save the workflow to a file, serialized to match its extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => {
                serde_yaml::to_string(self).context("Failed to serialize workflow to YAML")?
            }
            _ => serde_json::to_string_pretty(self)
                .context("Failed to serialize workflow to JSON")?,
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write workflow file: {}", path.display()))?;

        Ok(())
    }

    /// Get a specific phase by name.
    pub fn get_phase(&self, name: &str) -> Option<&Phase> {
        self.phases.iter().find(|p| p.name == name)
    }

    /// Get the rules declared for a phase, empty if none.
    pub fn rules_for(&self, phase_name: &str) -> &[ValidationRule] {
        self.rules
            .get(phase_name)
            .map_or(&[], |rules| rules.as_slice())
    }
}
