use std::io::BufReader;
use std::path::Path;

use anyhow::{Context as _, Result};

/// Compute the lowercase hex MD5 digest of the file at `path`.
///
/// The file is streamed through the hasher, so arbitrarily large FASTQ
/// files are handled without loading them into memory.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn md5_hex(path: &Path) -> Result<String> {
    use md5::{Digest, Md5};

    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {} for checksum", path.display()))?;
    let mut reader = BufReader::new(file);
    let mut hasher = Md5::new();
    std::io::copy(&mut reader, &mut hasher)
        .with_context(|| format!("reading {} for checksum", path.display()))?;
    Ok(hex::encode(hasher.finalize()))
}
