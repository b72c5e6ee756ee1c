//! Download FASTQ files listed in a run manifest via Aspera.
use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context as _, Result};
use rayon::prelude::*;

use crate::cli::{FetchOpts, GlobalOpts};
use crate::exec;
use crate::logging::{Logger, progress_bar};
use crate::manifest::Manifest;

/// Run the fetch command.
///
/// Builds one `ascp` transfer command per (optionally filtered) manifest row
/// and executes them across a bounded worker pool. Individual transfer
/// failures are counted and reported but do not abort the batch; the command
/// fails only if every transfer failed.
///
/// # Errors
///
/// Returns an error if the manifest cannot be loaded, a required column is
/// missing, `ascp` is not on PATH, or all transfers fail.
pub fn run(global: &GlobalOpts, opts: &FetchOpts, log: &Logger) -> Result<()> {
    anyhow::ensure!(opts.threads >= 1, "--threads must be at least 1");

    let manifest = Manifest::load(&opts.manifest)?;
    let filter: Option<HashSet<String>> = if opts.experiments.is_empty() {
        None
    } else {
        Some(opts.experiments.iter().cloned().collect())
    };
    let sources = manifest.aspera_sources(filter.as_ref())?;

    if sources.is_empty() {
        log.info("no manifest rows to fetch");
        return Ok(());
    }

    let commands: Vec<String> = sources
        .iter()
        .map(|source| transfer_command(source, &opts.key_file, &opts.rate_limit, &opts.output_dir))
        .collect();

    if global.dry_run {
        log.info(&format!(
            "{} transfer(s) would be executed:",
            commands.len()
        ));
        for cmd in &commands {
            log.dry_run(cmd);
        }
        return Ok(());
    }

    if !exec::which("ascp") {
        anyhow::bail!("ascp not found on PATH; install the IBM Aspera CLI");
    }

    log.stage(&format!(
        "Fetching {} run(s) with {} worker(s)",
        commands.len(),
        opts.threads
    ));

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(opts.threads)
        .build()
        .context("building transfer worker pool")?;

    let bar = progress_bar("fetch", commands.len() as u64);
    let failures = AtomicUsize::new(0);
    pool.install(|| {
        commands.par_iter().for_each(|cmd| {
            log.debug(cmd);
            match exec::run_shell_passthrough(cmd) {
                Ok(status) if status.success() => {}
                Ok(status) => {
                    log.warn(&format!(
                        "transfer failed (exit {}): {cmd}",
                        status.code().unwrap_or(-1)
                    ));
                    failures.fetch_add(1, Ordering::SeqCst);
                }
                Err(e) => {
                    log.warn(&format!("transfer failed: {e:#}"));
                    failures.fetch_add(1, Ordering::SeqCst);
                }
            }
            bar.inc(1);
        });
    });
    bar.finish_and_clear();

    let failed = failures.load(Ordering::SeqCst);
    if failed == commands.len() {
        anyhow::bail!("all {failed} transfers failed");
    }
    if failed > 0 {
        log.warn(&format!(
            "{failed} of {} transfers failed",
            commands.len()
        ));
    } else {
        log.info(&format!("{} transfer(s) completed", commands.len()));
    }
    Ok(())
}

/// Build the `ascp` invocation for one remote FASTQ location.
///
/// `-k 1` resumes partially transferred files, `-QT` enables fair transfer
/// policy without encryption, `-P33001` is the standard ENA Aspera port.
fn transfer_command(source: &str, key_file: &Path, rate_limit: &str, output_dir: &Path) -> String {
    format!(
        "ascp -QT -l {rate_limit} -P33001 -k 1 -i {} era-fasp@{source} {}",
        key_file.display(),
        output_dir.display()
    )
}
