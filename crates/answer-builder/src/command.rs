// SPDX-FileCopyrightText: 2026 Answer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! External tool invocation.
//!
//! Every cargo and package-manager call goes through [`CommandRunner`], so
//! the pipeline can be driven by a scripted runner in tests.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::BuildError;

/// A fully specified program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub envs: Vec<(String, String)>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>, cwd: impl AsRef<Path>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.as_ref().to_path_buf(),
            envs: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Returns the value of `--flag <value>` if present.
    pub fn flag_value(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }
}

impl std::fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Captured output of a successful invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Runs external programs for the pipeline.
///
/// Implementations return [`BuildError::Tool`] for non-zero exits and
/// [`BuildError::Cancelled`] once `cancel` fires.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(
        &self,
        command: ToolCommand,
        cancel: &CancellationToken,
    ) -> Result<ToolOutput, BuildError>;
}

/// Runs commands as child processes with `tokio::process`.
///
/// The child is killed when cancellation wins the race.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

/// Bytes of stderr kept in [`BuildError::Tool`].
const STDERR_TAIL: usize = 4096;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(
        &self,
        command: ToolCommand,
        cancel: &CancellationToken,
    ) -> Result<ToolOutput, BuildError> {
        debug!(command = %command, cwd = %command.cwd.display(), "running");

        let child = tokio::process::Command::new(&command.program)
            .args(&command.args)
            .current_dir(&command.cwd)
            .envs(command.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| BuildError::Spawn {
                program: command.program.clone(),
                source,
            })?;

        let output = tokio::select! {
            output = child.wait_with_output() => output.map_err(|source| BuildError::Spawn {
                program: command.program.clone(),
                source,
            })?,
            _ = cancel.cancelled() => return Err(BuildError::Cancelled),
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            return Err(BuildError::Tool {
                command: command.to_string(),
                status: output.status.to_string(),
                stderr: tail(&stderr, STDERR_TAIL).trim().to_string(),
            });
        }
        Ok(ToolOutput { stdout, stderr })
    }
}

fn tail(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut start = text.len() - max;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    &text[start..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn display_joins_program_and_args() {
        let cmd = ToolCommand::new("cargo", "/tmp").args(["vendor", "--versioned-dirs"]);
        assert_eq!(cmd.to_string(), "cargo vendor --versioned-dirs");
    }

    #[test]
    fn flag_value_lookup() {
        let cmd = ToolCommand::new("cargo", "/tmp").args(["build", "--bin", "answer"]);
        assert_eq!(cmd.flag_value("--bin"), Some("answer"));
        assert_eq!(cmd.flag_value("--target-dir"), None);
    }

    #[test]
    fn tail_respects_char_boundaries() {
        assert_eq!(tail("héllo", 4), "llo");
        assert_eq!(tail("abc", 10), "abc");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn captures_stdout() {
        let cmd = ToolCommand::new("sh", ".").args(["-c", "echo hello"]);
        let output = ProcessRunner
            .run(cmd, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(output.stdout.trim(), "hello");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_is_a_tool_error() {
        let cmd = ToolCommand::new("sh", ".").args(["-c", "echo nope >&2; exit 3"]);
        let err = ProcessRunner
            .run(cmd, &CancellationToken::new())
            .await
            .unwrap_err();
        match err {
            BuildError::Tool { stderr, status, .. } => {
                assert_eq!(stderr, "nope");
                assert!(status.contains('3'));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn missing_program_fails_to_spawn() {
        let cmd = ToolCommand::new("answer-no-such-program", ".");
        let err = ProcessRunner
            .run(cmd, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, BuildError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn cancellation_aborts_running_command() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let cmd = ToolCommand::new("sleep", ".").arg("30");
        let started = std::time::Instant::now();
        let err = ProcessRunner.run(cmd, &cancel).await.unwrap_err();
        assert!(matches!(err, BuildError::Cancelled));
        assert!(started.elapsed() < Duration::from_secs(10));
    }
}
