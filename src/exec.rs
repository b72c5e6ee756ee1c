use anyhow::{Context, Result};
use std::process::{Command, ExitStatus, Output, Stdio};

/// Result of a captured command execution.
#[derive(Debug)]
pub struct ExecResult {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Build a [`Command`] that runs `cmd` through the platform shell.
fn shell_command(cmd: &str) -> Command {
    #[cfg(target_os = "windows")]
    {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(cmd);
        c
    }

    #[cfg(not(target_os = "windows"))]
    {
        let mut c = Command::new("sh");
        c.arg("-c").arg(cmd);
        c
    }
}

/// Run a shell command line, capturing its output.
///
/// A non-zero exit is reported via `success`/`code`, not as an error; `Err`
/// means the shell itself could not be spawned.
///
/// # Errors
///
/// Returns an error if the platform shell cannot be executed.
pub fn run_shell(cmd: &str) -> Result<ExecResult> {
    let output = shell_command(cmd)
        .output()
        .with_context(|| format!("failed to execute: {cmd}"))?;
    Ok(ExecResult::from(output))
}

/// Run a shell command line with inherited stdio, returning its exit status.
///
/// Used for long-running transfer and batch commands whose output should
/// stream straight to the console.
///
/// # Errors
///
/// Returns an error if the platform shell cannot be executed.
pub fn run_shell_passthrough(cmd: &str) -> Result<ExitStatus> {
    shell_command(cmd)
        .stdin(Stdio::null())
        .status()
        .with_context(|| format!("failed to execute: {cmd}"))
}

/// Check if a program is available on PATH.
#[must_use]
pub fn which(program: &str) -> bool {
    #[cfg(target_os = "windows")]
    let check = Command::new("where").arg(program).output();

    #[cfg(not(target_os = "windows"))]
    let check = Command::new("which").arg(program).output();

    check.is_ok_and(|o| o.status.success())
}
