pub mod copy;
pub mod fetch;
pub mod rename;
pub mod run_file;
pub mod stage;
pub mod verify;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

/// File-name suffix identifying compressed FASTQ files.
pub const FASTQ_SUFFIX: &str = ".fastq.gz";

/// List the `*.fastq.gz` files directly inside `dir`, sorted by name.
///
/// The listing is non-recursive, matching the fixed naming convention used
/// throughout the workflow.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn fastq_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("reading directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("reading entry in {}", dir.display()))?;
        let path = entry.path();
        if path.is_file() && entry.file_name().to_string_lossy().ends_with(FASTQ_SUFFIX) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
