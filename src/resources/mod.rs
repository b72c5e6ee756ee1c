//! Idempotent resource primitives (check + apply pattern).
pub mod copy;
pub mod rename;
pub mod symlink;

use anyhow::Result;
use indicatif::ProgressBar;

use crate::logging::{Logger, progress_bar};

/// State of a resource (copied file, symlink, rename target).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// Resource does not exist yet.
    Missing,
    /// Resource exists and matches the desired state.
    Correct,
    /// Resource exists but does not match the desired state.
    Incorrect {
        /// The current value of the resource.
        current: String,
    },
    /// Resource cannot be applied (e.g., its source has disappeared).
    Invalid {
        /// Reason why the resource cannot be applied.
        reason: String,
    },
}

/// Result of applying a resource change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceChange {
    /// Resource was created or updated.
    Applied,
    /// Resource was already correct (no change needed).
    AlreadyCorrect,
}

/// Unified interface for resources that can be checked and applied.
///
/// All file operations performed by the subcommands are expressed through
/// this trait so that re-running a command is idempotent: resources already
/// in the desired state are counted rather than re-applied.
pub trait Resource {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Check the current state of the resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource state cannot be determined due to
    /// I/O failures, permission issues, or other system errors.
    fn current_state(&self) -> Result<ResourceState>;

    /// Apply the resource change.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be applied due to I/O
    /// failures, permission issues, invalid paths, or other system errors.
    fn apply(&self) -> Result<ResourceChange>;

    /// Determine if the resource needs to be changed.
    ///
    /// # Errors
    ///
    /// Propagates errors from `current_state()`.
    fn needs_change(&self) -> Result<bool> {
        Ok(matches!(
            self.current_state()?,
            ResourceState::Missing | ResourceState::Incorrect { .. }
        ))
    }
}

/// Counters for batch operations that process many resources.
#[derive(Debug, Default)]
pub struct Stats {
    /// Number of items changed or applied.
    pub changed: u32,
    /// Number of items already in the correct state.
    pub already_ok: u32,
    /// Number of items skipped due to inapplicability.
    pub skipped: u32,
}

impl Stats {
    /// Create a new empty stats counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Format the summary string (e.g. "3 changed, 10 already ok, 1 skipped").
    #[must_use]
    pub fn summary(&self, dry_run: bool) -> String {
        let verb = if dry_run { "would change" } else { "changed" };
        if self.skipped > 0 {
            format!(
                "{} {verb}, {} already ok, {} skipped",
                self.changed, self.already_ok, self.skipped
            )
        } else {
            format!("{} {verb}, {} already ok", self.changed, self.already_ok)
        }
    }
}

/// Process resources by checking each one's current state and applying as
/// needed, collecting [`Stats`].
///
/// In dry-run mode no resource is applied; would-be changes are logged via
/// [`Logger::dry_run`] and counted as changed.  A progress bar is shown for
/// larger batches (hidden automatically on non-TTY output).
///
/// # Errors
///
/// Returns an error if any resource fails to report its state or to apply,
/// with the failing resource named in the error context.
pub fn process<R: Resource>(
    log: &Logger,
    dry_run: bool,
    verb: &str,
    resources: &[R],
) -> Result<Stats> {
    use anyhow::Context as _;

    let bar = if dry_run || resources.len() < 2 {
        ProgressBar::hidden()
    } else {
        progress_bar(verb, resources.len() as u64)
    };

    let mut stats = Stats::new();
    for resource in resources {
        let state = resource
            .current_state()
            .with_context(|| format!("checking {}", resource.description()))?;
        match state {
            ResourceState::Correct => {
                log.debug(&format!("ok: {}", resource.description()));
                stats.already_ok += 1;
            }
            ResourceState::Invalid { reason } => {
                log.debug(&format!("skipping {}: {reason}", resource.description()));
                stats.skipped += 1;
            }
            ResourceState::Missing | ResourceState::Incorrect { .. } => {
                if dry_run {
                    log.dry_run(&format!("would {verb} {}", resource.description()));
                    stats.changed += 1;
                } else {
                    let change = resource
                        .apply()
                        .with_context(|| format!("{verb} {}", resource.description()))?;
                    match change {
                        ResourceChange::Applied => {
                            log.debug(&format!("{verb}: {}", resource.description()));
                            stats.changed += 1;
                        }
                        ResourceChange::AlreadyCorrect => stats.already_ok += 1,
                    }
                }
            }
        }
        bar.inc(1);
    }
    bar.finish_and_clear();
    Ok(stats)
}
