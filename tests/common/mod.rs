// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed workspace so each integration test
// can set up manifests, FASTQ files and folders without repeating
// filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use seqops::cli::GlobalOpts;
use seqops::logging::Logger;

/// Global options for a normal (non-dry-run) invocation.
pub fn global_opts() -> GlobalOpts {
    GlobalOpts { dry_run: false }
}

/// Global options for a dry-run invocation.
pub fn dry_run_opts() -> GlobalOpts {
    GlobalOpts { dry_run: true }
}

/// A logger suitable for tests; events go to the test subscriber, if any.
pub fn test_logger() -> Logger {
    Logger::new("test")
}

/// An isolated workspace backed by a [`tempfile::TempDir`].
///
/// The directory is automatically deleted when dropped.
pub struct TestWorkspace {
    /// Temporary directory containing the workspace.
    pub root: tempfile::TempDir,
}

impl TestWorkspace {
    /// Create a new empty workspace.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// Path to the workspace root.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Write a tab-separated manifest with the given header and rows,
    /// returning its path.
    pub fn write_manifest(&self, name: &str, header: &[&str], rows: &[&[&str]]) -> PathBuf {
        let mut content = header.join("\t");
        content.push('\n');
        for row in rows {
            content.push_str(&row.join("\t"));
            content.push('\n');
        }
        self.write_file(name, content.as_bytes())
    }

    /// Create a directory (and parents) under the workspace root.
    pub fn create_dir(&self, rel: &str) -> PathBuf {
        let path = self.root.path().join(rel);
        std::fs::create_dir_all(&path).expect("create dir");
        path
    }

    /// Write a file (creating parents) under the workspace root.
    pub fn write_file(&self, rel: &str, content: &[u8]) -> PathBuf {
        let path = self.root.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create file parent");
        }
        std::fs::write(&path, content).expect("write file");
        path
    }
}
