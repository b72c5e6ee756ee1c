//! Stage FASTQ folders into a pipeline's expected layout.
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::cli::{GlobalOpts, StageOpts};
use crate::logging::Logger;
use crate::resources::{self, symlink::LinkResource};

/// Run the stage command.
///
/// For each immediate subdirectory of the source directory matching the
/// pattern, creates `<target>/<prefix><name>/fastq/` and symlinks every
/// `*.fastq.gz` file of the source folder into it.
///
/// # Errors
///
/// Returns an error if the pattern is invalid, a directory cannot be read
/// or created, or a link fails.
pub fn run(global: &GlobalOpts, opts: &StageOpts, log: &Logger) -> Result<()> {
    let pattern = glob::Pattern::new(&opts.pattern)
        .with_context(|| format!("invalid folder pattern '{}'", opts.pattern))?;

    let folders = matching_folders(&opts.src_dir, &pattern)?;
    if folders.is_empty() {
        log.info(&format!("no folders matched pattern '{}'", opts.pattern));
        return Ok(());
    }
    log.info(&format!("{} folder(s) matched", folders.len()));

    let mut links = Vec::new();
    for folder in &folders {
        // Absolute sources so the created links resolve from anywhere.
        let folder = std::fs::canonicalize(folder)
            .with_context(|| format!("resolving {}", folder.display()))?;
        let name = folder
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let fastq_dir = opts
            .target_dir
            .join(format!("{}{name}", opts.prefix))
            .join("fastq");

        if global.dry_run {
            log.dry_run(&format!("would create folder: {}", fastq_dir.display()));
        } else {
            std::fs::create_dir_all(&fastq_dir)
                .with_context(|| format!("creating {}", fastq_dir.display()))?;
        }

        for file in super::fastq_files(&folder)? {
            let link = fastq_dir.join(file.file_name().unwrap_or_default());
            links.push(LinkResource::new(file, link));
        }
    }

    log.stage("Linking FASTQ files");
    let stats = resources::process(log, global.dry_run, "link", &links)?;
    log.info(&stats.summary(global.dry_run));
    Ok(())
}

/// Immediate subdirectories of `dir` whose names match `pattern`, sorted.
fn matching_folders(dir: &Path, pattern: &glob::Pattern) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("reading directory {}", dir.display()))?;

    let mut folders = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("reading entry in {}", dir.display()))?;
        let path = entry.path();
        if path.is_dir() && pattern.matches(&entry.file_name().to_string_lossy()) {
            folders.push(path);
        }
    }
    folders.sort();
    Ok(folders)
}
