//! Execute shell commands from a file, logging failures.
use std::io::Write as _;

use anyhow::{Context as _, Result};

use crate::cli::{GlobalOpts, RunOpts};
use crate::exec;
use crate::logging::{Logger, progress_bar};

/// Run the batch command runner.
///
/// Executes each non-blank, non-comment line of the command file through the
/// platform shell. A command's failure is appended as one entry to the
/// failure log and execution continues with the next command; the subcommand
/// itself succeeds regardless of how many commands failed.
///
/// # Errors
///
/// Returns an error if the command file cannot be read or the failure log
/// cannot be written.
pub fn run(global: &GlobalOpts, opts: &RunOpts, log: &Logger) -> Result<()> {
    let text = std::fs::read_to_string(&opts.command_file)
        .with_context(|| format!("reading command file {}", opts.command_file.display()))?;
    let commands: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();

    if commands.is_empty() {
        log.info("no commands to execute");
        return Ok(());
    }

    if global.dry_run {
        log.info(&format!("{} command(s) would be executed:", commands.len()));
        for cmd in &commands {
            log.dry_run(cmd);
        }
        return Ok(());
    }

    let mut failure_log = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&opts.log_file)
        .with_context(|| format!("opening log file {}", opts.log_file.display()))?;

    log.stage(&format!("Executing {} command(s)", commands.len()));
    let bar = progress_bar("run", commands.len() as u64);

    let mut failures = 0u32;
    for cmd in &commands {
        log.debug(&format!("executing: {cmd}"));
        let failure = match exec::run_shell_passthrough(cmd) {
            Ok(status) if status.success() => None,
            Ok(status) => Some(status.code().map_or_else(
                || "terminated by signal".to_string(),
                |code| format!("exit status {code}"),
            )),
            Err(e) => Some(format!("{e:#}")),
        };
        if let Some(reason) = failure {
            writeln!(failure_log, "Error executing command '{cmd}': {reason}")
                .with_context(|| format!("writing to log file {}", opts.log_file.display()))?;
            log.warn(&format!("command failed ({reason}): {cmd}"));
            failures += 1;
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    if failures > 0 {
        log.info(&format!(
            "{} command(s) executed, {failures} failed (logged to {})",
            commands.len(),
            opts.log_file.display()
        ));
    } else {
        log.info(&format!("{} command(s) executed, 0 failed", commands.len()));
    }
    Ok(())
}
