//! Optional settings file read from `.phasegate/phasegate.toml`.
//!
//! # Configuration File Format
//!
//! ```toml
//! [defaults]
//! timeout_secs = 60
//! reports_dir = "out/reports"
//! ```
//!
//! All settings have sensible defaults; a missing file means defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default settings applied to every run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsSettings {
    /// Upper bound on any single phase action, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Reports directory, relative to the project directory
    /// (default: .phasegate/reports)
    #[serde(default)]
    pub reports_dir: Option<String>,
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for DefaultsSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            reports_dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub defaults: DefaultsSettings,
}

impl Settings {
    /// Load settings from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    /// Load settings, falling back to defaults if the file doesn't exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate settings and return any warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.defaults.timeout_secs == 0 {
            warnings.push("timeout_secs is 0; every action will time out immediately".to_string());
        }
        if self.defaults.timeout_secs > 3600 {
            warnings.push(format!(
                "timeout_secs is {}; a hung action will stall the run for over an hour",
                self.defaults.timeout_secs
            ));
        }
        warnings
    }
}
