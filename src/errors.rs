//! Typed error hierarchy for phasegate.
//!
//! Only static configuration problems surface as real errors: everything
//! that happens while a workflow is running is captured as data inside a
//! `PhaseResult`, so callers can always inspect a complete `WorkflowRun`.

use thiserror::Error;

/// Errors raised while validating workflow configuration, before any phase runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Phase '{phase}' has ordinal {ordinal}, which does not increase past {previous}")]
    OrdinalNotIncreasing {
        phase: String,
        ordinal: u32,
        previous: u32,
    },

    #[error("Duplicate phase name: {name}")]
    DuplicatePhaseName { name: String },

    #[error("Rule '{rule}' targets unknown phase '{phase}': no phase with that name exists")]
    RuleForUnknownPhase { rule: String, phase: String },

    #[error("Phase '{phase}' references unknown action '{action}'")]
    UnknownAction { phase: String, action: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
