//! Verify FASTQ files against manifest MD5 checksums.
use std::path::Path;

use anyhow::Result;

use crate::accession::{self, AccessionError};
use crate::checksum;
use crate::cli::{GlobalOpts, VerifyOpts};
use crate::logging::{Logger, progress_bar};
use crate::manifest::Manifest;

/// Run the verify command.
///
/// # Errors
///
/// Returns an error if the manifest cannot be loaded, a file name carries no
/// GSM accession, an accession is absent from the manifest, a file cannot be
/// hashed, or any file's MD5 does not match its manifest entry.
pub fn run(_global: &GlobalOpts, opts: &VerifyOpts, log: &Logger) -> Result<()> {
    let mismatched = verify_folder(&opts.manifest, &opts.fastq_dir, log)?;

    if mismatched.is_empty() {
        log.info("all samples matched their expected MD5 values");
        return Ok(());
    }

    log.error("samples with unmatched MD5 values:");
    for sample in &mismatched {
        log.error(&format!("  {sample}"));
    }
    anyhow::bail!("{} file(s) failed MD5 verification", mismatched.len())
}

/// Verify every `*.fastq.gz` file in `fastq_dir` against the manifest's
/// expected hashes, returning the accessions whose computed MD5 differs.
///
/// An empty return value means every file matched.
///
/// # Errors
///
/// Returns an error for an unreadable or incomplete manifest, a file name
/// without a GSM accession, an accession missing from the manifest, or a
/// file that cannot be hashed. Hash mismatches are collected, not errors.
pub fn verify_folder(manifest: &Path, fastq_dir: &Path, log: &Logger) -> Result<Vec<String>> {
    let expected = Manifest::load(manifest)?.md5_by_experiment()?;
    let files = super::fastq_files(fastq_dir)?;

    if files.is_empty() {
        log.info(&format!(
            "no {} files found in {}",
            super::FASTQ_SUFFIX,
            fastq_dir.display()
        ));
        return Ok(Vec::new());
    }

    log.stage(&format!("Verifying {} file(s)", files.len()));
    let bar = progress_bar("verify", files.len() as u64);

    let mut mismatched = Vec::new();
    for file in &files {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let sample = accession::sample_accession(&name)?.to_string();
        let want = expected
            .get(&sample)
            .ok_or_else(|| AccessionError::UnknownAccession(sample.clone()))?;
        let got = checksum::md5_hex(file)?;
        if got == *want {
            log.debug(&format!("ok: {name}"));
        } else {
            log.warn(&format!(
                "unmatched MD5 for sample {sample}: expected {want}, got {got}"
            ));
            mismatched.push(sample);
        }
        bar.inc(1);
    }
    bar.finish_and_clear();
    Ok(mismatched)
}
