use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, error, warn};

use crate::errors::{ObfuscationError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code; `None` when the process was killed by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

#[async_trait]
pub trait ToolRunner: Send + Sync {
    async fn run(&self, tool: &str, args: &[String]) -> Result<ToolOutput>;
}

/// Spawns real processes, killing any that outlive `timeout`.
#[derive(Debug, Clone)]
pub struct SystemToolRunner {
    timeout: Duration,
}

impl SystemToolRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl ToolRunner for SystemToolRunner {
    async fn run(&self, tool: &str, args: &[String]) -> Result<ToolOutput> {
        debug!(tool, ?args, "running external tool");
        let child = Command::new(tool)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ObfuscationError::ToolSpawn {
                tool: tool.to_string(),
                source,
            })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| ObfuscationError::ToolTimeout {
                tool: tool.to_string(),
                secs: self.timeout.as_secs(),
            })??;

        Ok(ToolOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Runs `tool`, retrying retryable failures up to `retries` extra times, and
/// turns a non-zero exit into [`ObfuscationError::ToolFailed`].
pub async fn run_checked(
    runner: &dyn ToolRunner,
    tool: &str,
    args: &[String],
    retries: u32,
) -> Result<ToolOutput> {
    let mut attempt = 0;
    loop {
        match runner.run(tool, args).await {
            Ok(output) if output.success() => return Ok(output),
            Ok(output) => {
                error!(tool, status = ?output.status, stderr = %output.stderr, "external tool failed");
                return Err(ObfuscationError::ToolFailed {
                    tool: tool.to_string(),
                    status: output.status,
                    stderr: output.stderr,
                });
            }
            Err(err) if err.is_retryable() && attempt < retries => {
                attempt += 1;
                warn!(tool, attempt, error = %err, "retrying external tool");
            }
            Err(err) => return Err(err),
        }
    }
}
