use crate::utils::debug_with_context;
use async_trait::async_trait;
use std::io;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

/// Why an external command produced nothing. None of these are fatal; the
/// segment that asked simply renders empty.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProbeError {
    #[error("{0} is not available")]
    Unavailable(String),

    #[error("{program} did not finish within {millis}ms")]
    Timeout { program: String, millis: u128 },

    #[error("not applicable here")]
    NotApplicable,
}

/// Capability for running an external program and capturing its stdout.
///
/// Implementations must bound the call by `timeout` and map a non-zero exit
/// to [`ProbeError::NotApplicable`].
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: &Path,
        timeout: Duration,
    ) -> Result<String, ProbeError>;
}

/// Runs real subprocesses through tokio.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: &Path,
        timeout: Duration,
    ) -> Result<String, ProbeError> {
        let mut command = Command::new(program);
        command
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ProbeError::Unavailable(program.to_string()));
            }
            Ok(Err(e)) => {
                debug_with_context("process", &format!("{} failed to spawn: {}", program, e));
                return Err(ProbeError::Unavailable(program.to_string()));
            }
            Err(_) => {
                return Err(ProbeError::Timeout {
                    program: program.to_string(),
                    millis: timeout.as_millis(),
                });
            }
        };

        if !output.status.success() {
            return Err(ProbeError::NotApplicable);
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
