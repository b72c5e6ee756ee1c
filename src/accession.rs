//! Accession extraction from FASTQ file names.
//!
//! Sample and run identifiers are embedded in file names by a fixed
//! convention: GEO sample accessions look like `GSM1234567`, SRA run
//! accessions like `SRR1234567`. A file name without the expected
//! accession cannot be matched against a manifest and is a hard error.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

#[allow(clippy::expect_used)]
static GEO_SAMPLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"GSM\d+").expect("valid GSM pattern"));

#[allow(clippy::expect_used)]
static SRA_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"SRR\d+").expect("valid SRR pattern"));

/// Errors raised while resolving accessions against file names or manifests.
#[derive(Error, Debug)]
pub enum AccessionError {
    /// The file name does not contain a GEO sample accession.
    #[error("no GSM accession found in filename: {0}")]
    NoSampleAccession(String),

    /// The file name does not contain an SRA run accession.
    #[error("no SRR accession found in filename: {0}")]
    NoRunAccession(String),

    /// The accession was extracted but is absent from the manifest.
    #[error("accession '{0}' not found in manifest")]
    UnknownAccession(String),
}

/// Extract the GEO sample accession (`GSM…`) from a file name.
///
/// # Errors
///
/// Returns [`AccessionError::NoSampleAccession`] if the name contains none.
pub fn sample_accession(filename: &str) -> Result<&str, AccessionError> {
    GEO_SAMPLE
        .find(filename)
        .map(|m| m.as_str())
        .ok_or_else(|| AccessionError::NoSampleAccession(filename.to_string()))
}

/// Extract the SRA run accession (`SRR…`) from a file name.
///
/// # Errors
///
/// Returns [`AccessionError::NoRunAccession`] if the name contains none.
pub fn run_accession(filename: &str) -> Result<&str, AccessionError> {
    SRA_RUN
        .find(filename)
        .map(|m| m.as_str())
        .ok_or_else(|| AccessionError::NoRunAccession(filename.to_string()))
}
