//! Run manifest loading and column queries.
//!
//! A manifest is a tab-separated table describing sequencing runs, read
//! wholesale into memory and queried by column name. Different subcommands
//! need different columns, so the table is held dynamically and each query
//! names the columns it requires; a missing required column is a
//! [`ManifestError::MissingColumn`].

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use csv::StringRecord;
use serde::Deserialize;
use thiserror::Error;

/// Errors that arise from manifest loading and column resolution.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// The manifest file could not be read.
    #[error("failed to read manifest {path}: {source}")]
    Io {
        /// Path to the manifest that could not be read.
        path: String,
        /// Underlying reader error.
        source: csv::Error,
    },

    /// The manifest file is not well-formed TSV.
    #[error("failed to parse manifest {path}: {source}")]
    Parse {
        /// Path to the malformed manifest.
        path: String,
        /// Underlying parser error.
        source: csv::Error,
    },

    /// A column required by the invoked operation is absent.
    #[error("manifest {path} is missing required column '{column}'")]
    MissingColumn {
        /// Path to the manifest.
        path: String,
        /// Name of the missing column.
        column: String,
    },
}

/// Alias columns for a single run, used to derive human-readable file names.
#[derive(Debug, Clone, Deserialize)]
pub struct RunAliases {
    /// SRA run accession (`SRR…`).
    pub run_accession: String,
    /// GEO series identifier (e.g. `GSE…`).
    pub study_alias: String,
    /// GEO sample identifier (`GSM…`).
    pub experiment_alias: String,
}

/// An in-memory tab-separated run manifest.
#[derive(Debug)]
pub struct Manifest {
    path: PathBuf,
    headers: StringRecord,
    rows: Vec<StringRecord>,
}

impl Manifest {
    /// Load a manifest from a TSV file.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Io`] if the file cannot be read and
    /// [`ManifestError::Parse`] if it is not well-formed TSV.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let mut reader = match csv::ReaderBuilder::new().delimiter(b'\t').from_path(path) {
            Ok(reader) => reader,
            Err(e) => return Err(Self::classify(path, e)),
        };

        let headers = reader
            .headers()
            .map_err(|e| Self::classify(path, e))?
            .clone();

        let mut rows = Vec::new();
        for record in reader.records() {
            rows.push(record.map_err(|e| Self::classify(path, e))?);
        }

        Ok(Self {
            path: path.to_path_buf(),
            headers,
            rows,
        })
    }

    fn classify(path: &Path, err: csv::Error) -> ManifestError {
        let path = path.display().to_string();
        if err.is_io_error() {
            ManifestError::Io { path, source: err }
        } else {
            ManifestError::Parse { path, source: err }
        }
    }

    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the manifest contains no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Resolve a column name to its index.
    fn column_index(&self, column: &str) -> Result<usize, ManifestError> {
        self.headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| ManifestError::MissingColumn {
                path: self.path.display().to_string(),
                column: column.to_string(),
            })
    }

    /// Map each experiment alias to its expected FASTQ MD5.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::MissingColumn`] if `experiment_alias` or
    /// `fastq_md5` is absent.
    pub fn md5_by_experiment(&self) -> Result<HashMap<String, String>, ManifestError> {
        let experiment = self.column_index("experiment_alias")?;
        let md5 = self.column_index("fastq_md5")?;

        let mut map = HashMap::with_capacity(self.rows.len());
        for row in &self.rows {
            let key = row.get(experiment).unwrap_or("").trim();
            let value = row.get(md5).unwrap_or("").trim();
            if !key.is_empty() {
                map.insert(key.to_string(), value.to_string());
            }
        }
        Ok(map)
    }

    /// Map each run accession to its study/experiment aliases.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::MissingColumn`] if `run_accession`,
    /// `study_alias` or `experiment_alias` is absent, and
    /// [`ManifestError::Parse`] if a row cannot be deserialised.
    pub fn aliases_by_run(&self) -> Result<HashMap<String, RunAliases>, ManifestError> {
        for column in ["run_accession", "study_alias", "experiment_alias"] {
            self.column_index(column)?;
        }

        let mut map = HashMap::with_capacity(self.rows.len());
        for row in &self.rows {
            let aliases: RunAliases = row
                .deserialize(Some(&self.headers))
                .map_err(|e| Self::classify(&self.path, e))?;
            map.insert(aliases.run_accession.clone(), aliases);
        }
        Ok(map)
    }

    /// Remote Aspera locations, optionally filtered to a set of experiment
    /// aliases. Rows with an empty `fastq_aspera` value are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::MissingColumn`] if `fastq_aspera` is absent,
    /// or if `experiment_alias` is absent while a filter is given.
    pub fn aspera_sources(
        &self,
        experiments: Option<&HashSet<String>>,
    ) -> Result<Vec<String>, ManifestError> {
        let aspera = self.column_index("fastq_aspera")?;
        let experiment = match experiments {
            Some(_) => Some(self.column_index("experiment_alias")?),
            None => None,
        };

        let mut sources = Vec::new();
        for row in &self.rows {
            if let (Some(filter), Some(idx)) = (experiments, experiment) {
                let alias = row.get(idx).unwrap_or("").trim();
                if !filter.contains(alias) {
                    continue;
                }
            }
            let source = row.get(aspera).unwrap_or("").trim();
            if !source.is_empty() {
                sources.push(source.to_string());
            }
        }
        Ok(sources)
    }
}
