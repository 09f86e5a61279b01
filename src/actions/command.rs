//! Subprocess-backed phase action.
//!
//! The external collaborator is an arbitrary program: the phase's inputs are
//! written to its stdin as a single JSON object, and the last line of stdout
//! that parses as a JSON object becomes the phase's output map. Anything
//! else on stdout (progress chatter, logs) is ignored.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::actions::PhaseAction;
use crate::phase::OutputMap;

pub struct CommandAction {
    program: String,
    args: Vec<String>,
    timeout: Duration,
    retries: u32,
}

impl CommandAction {
    pub fn new(program: &str, args: Vec<String>, timeout: Duration, retries: u32) -> Self {
        Self {
            program: program.to_string(),
            args,
            timeout,
            retries,
        }
    }

    async fn run_once(&self, payload: &[u8]) -> Result<OutputMap> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .kill_on_drop(true);

        debug!(program = %self.program, "spawning action command");

        let mut child = cmd
            .spawn()
            .with_context(|| format!("Failed to spawn command '{}'", self.program))?;

        // Write inputs to stdin and close it so the child sees EOF
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(payload)
                .await
                .context("Failed to write inputs to command stdin")?;
            stdin
                .shutdown()
                .await
                .context("Failed to close command stdin")?;
        }

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.context("Failed to collect command output")?,
            Err(_) => bail!(
                "Command '{}' timed out after {}s",
                self.program,
                self.timeout.as_secs()
            ),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "Command '{}' exited with {} ({})",
                self.program,
                output.status,
                stderr.trim()
            );
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_output_map(&stdout).with_context(|| {
            format!("Command '{}' produced no JSON object on stdout", self.program)
        })
    }
}

#[async_trait]
impl PhaseAction for CommandAction {
    async fn run(&self, inputs: &OutputMap) -> Result<OutputMap> {
        let payload = serde_json::to_vec(inputs).context("Failed to encode inputs as JSON")?;

        let mut attempt = 0;
        loop {
            match self.run_once(&payload).await {
                Ok(out) => return Ok(out),
                Err(err) if attempt < self.retries => {
                    attempt += 1;
                    warn!(
                        program = %self.program,
                        attempt,
                        retries = self.retries,
                        "action command failed, retrying: {err:#}"
                    );
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// Pick the last stdout line that parses as a JSON object.
fn parse_output_map(stdout: &str) -> Result<OutputMap> {
    stdout
        .lines()
        .rev()
        .find_map(|line| {
            let line = line.trim();
            if line.is_empty() {
                return None;
            }
            serde_json::from_str::<OutputMap>(line).ok()
        })
        .ok_or_else(|| anyhow::anyhow!("no parsable JSON object line"))
}
