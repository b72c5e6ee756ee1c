//! Rename FASTQ files using manifest aliases.
use anyhow::Result;

use crate::accession::{self, AccessionError};
use crate::cli::{GlobalOpts, RenameOpts};
use crate::logging::Logger;
use crate::manifest::Manifest;
use crate::resources::{self, rename::RenameResource};

/// Run the rename command.
///
/// Renames every `*.fastq.gz` file in the directory to
/// `{study_alias}_{experiment_alias}_{original_name}`, with the aliases
/// looked up by the SRR accession embedded in the file name. Files already
/// carrying their derived prefix are left untouched, so re-running the
/// command is safe.
///
/// # Errors
///
/// Returns an error if the manifest cannot be loaded or lacks the alias
/// columns, a file name carries no SRR accession, an accession is absent
/// from the manifest, or a rename fails.
pub fn run(global: &GlobalOpts, opts: &RenameOpts, log: &Logger) -> Result<()> {
    let aliases = Manifest::load(&opts.manifest)?.aliases_by_run()?;
    let files = super::fastq_files(&opts.fastq_dir)?;

    if files.is_empty() {
        log.info(&format!(
            "no {} files found in {}",
            super::FASTQ_SUFFIX,
            opts.fastq_dir.display()
        ));
        return Ok(());
    }

    let mut renames = Vec::new();
    let mut already_ok = 0u32;
    for file in &files {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let acc = accession::run_accession(&name)?;
        let aliased = aliases
            .get(acc)
            .ok_or_else(|| AccessionError::UnknownAccession(acc.to_string()))?;
        let prefix = format!("{}_{}_", aliased.study_alias, aliased.experiment_alias);

        if name.starts_with(&prefix) {
            log.debug(&format!("already renamed: {name}"));
            already_ok += 1;
            continue;
        }

        let to = file.with_file_name(format!("{prefix}{name}"));
        renames.push(RenameResource::new(file.clone(), to));
    }

    log.stage(&format!("Renaming {} file(s)", renames.len()));
    let mut stats = resources::process(log, global.dry_run, "rename", &renames)?;
    stats.already_ok += already_ok;
    log.info(&stats.summary(global.dry_run));
    Ok(())
}
