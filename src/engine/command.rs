//! Builder for executing external tool commands with timeout support.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::process::Command;
use tracing::debug;

use crate::constants::DEFAULT_ENGINE_TIMEOUT_SECS;
use crate::error::{Error, Result};

/// Output captured from a tool execution.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Process exit status.
    pub status: ExitStatus,
    /// Captured standard output (lossy UTF-8).
    pub stdout: String,
    /// Captured standard error (lossy UTF-8).
    pub stderr: String,
}

/// A builder for constructing and executing external tool invocations.
///
/// The child never reads from the terminal and is killed if it outlives
/// the timeout.
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<String>,
    timeout: Duration,
}

impl ToolCommand {
    /// Create a new command for the given program path.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: Duration::from_secs(DEFAULT_ENGINE_TIMEOUT_SECS),
        }
    }

    /// Append a single argument.
    pub fn arg(&mut self, s: impl Into<String>) -> &mut Self {
        self.args.push(s.into());
        self
    }

    /// Append multiple arguments.
    pub fn args(&mut self, iter: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.args.extend(iter.into_iter().map(Into::into));
        self
    }

    /// Set the maximum execution time.
    pub fn timeout(&mut self, d: Duration) -> &mut Self {
        self.timeout = d;
        self
    }

    /// Arguments collected so far.
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// Execute the command, capturing stdout and stderr.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Engine`] if spawning fails, the process times out
    /// (it is killed), or it exits with a non-zero status (message includes
    /// the trimmed stderr).
    pub async fn execute(&self) -> Result<ToolOutput> {
        let tool = tool_name(&self.program);
        debug!("Running {} {}", self.program.display(), self.args.join(" "));

        let child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::Engine {
                tool: tool.clone(),
                message: format!("failed to spawn: {e}"),
            })?;

        // Dropping the wait future on timeout drops the child, which kills it.
        match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => {
                let tool_output = ToolOutput {
                    status: output.status,
                    stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                    stderr: String::from_utf8_lossy(&output.stderr).to_string(),
                };

                if !output.status.success() {
                    return Err(Error::Engine {
                        tool,
                        message: format!(
                            "exited with {}: {}",
                            output.status,
                            tool_output.stderr.trim()
                        ),
                    });
                }

                Ok(tool_output)
            }
            Ok(Err(e)) => Err(Error::Engine {
                tool,
                message: format!("I/O error waiting for process: {e}"),
            }),
            Err(_elapsed) => Err(Error::Engine {
                tool,
                message: format!("timed out after {}s", self.timeout.as_secs_f64()),
            }),
        }
    }
}

fn tool_name(program: &Path) -> String {
    program.file_name().map_or_else(
        || program.to_string_lossy().to_string(),
        |n| n.to_string_lossy().to_string(),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(future)
    }

    #[test]
    fn test_builder_collects_arguments() {
        let mut cmd = ToolCommand::new("ffmpeg");
        cmd.arg("-i").args(["in.mp4", "out.mp4"]);
        assert_eq!(cmd.arguments(), ["-i", "in.mp4", "out.mp4"]);
    }

    #[test]
    fn test_tool_name_uses_file_name() {
        assert_eq!(tool_name(Path::new("/usr/bin/ffmpeg")), "ffmpeg");
        assert_eq!(tool_name(Path::new("ffprobe")), "ffprobe");
    }

    #[test]
    fn test_execute_nonexistent_tool() {
        let result = block_on(ToolCommand::new("nonexistent_tool_xyz_12345").execute());
        assert!(matches!(result, Err(Error::Engine { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_execute_captures_stdout() {
        let result = block_on(ToolCommand::new("echo").arg("hello").execute());
        let output = result.unwrap();
        assert!(output.status.success());
        assert_eq!(output.stdout.trim(), "hello");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_is_engine_error() {
        let result = block_on(ToolCommand::new("false").execute());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("exited with"), "unexpected error: {err}");
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout_fires() {
        let result = block_on(
            ToolCommand::new("sleep")
                .arg("10")
                .timeout(Duration::from_millis(100))
                .execute(),
        );
        let err = result.unwrap_err().to_string();
        assert!(err.contains("timed out"), "unexpected error: {err}");
    }
}
