//! Sequencing data workflow utilities.
//!
//! A single binary with independent subcommands gluing together a
//! FASTQ/ENA/GEO data-processing workflow: bulk file copying by glob
//! pattern, parallel Aspera downloads, MD5 verification against a run
//! manifest, directory/symlink staging for a pipeline's expected layout,
//! manifest-driven renaming, and batch shell-command execution.
//!
//! The public API is organised into four layers:
//!
//! - **[`manifest`]** — load and query tab-separated run manifests
//! - **[`resources`]** — idempotent `check + apply` primitives (copies, links, renames)
//! - **[`commands`]** — top-level subcommand orchestration
//! - **[`logging`]** — console and file output via `tracing`
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod accession;
pub mod checksum;
pub mod cli;
pub mod commands;
pub mod exec;
pub mod logging;
pub mod manifest;
pub mod resources;
