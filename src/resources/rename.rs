//! Renamed-file resource.
use anyhow::{Context as _, Result};
use std::path::PathBuf;

use super::{Resource, ResourceChange, ResourceState};

/// A file rename that can be checked and applied.
#[derive(Debug, Clone)]
pub struct RenameResource {
    /// The file's current path.
    pub from: PathBuf,
    /// The file's desired path.
    pub to: PathBuf,
}

impl RenameResource {
    /// Create a new rename resource.
    #[must_use]
    pub const fn new(from: PathBuf, to: PathBuf) -> Self {
        Self { from, to }
    }
}

impl Resource for RenameResource {
    fn description(&self) -> String {
        format!("{} -> {}", self.from.display(), self.to.display())
    }

    fn current_state(&self) -> Result<ResourceState> {
        let from_exists = self.from.exists();
        let to_exists = self.to.exists();

        if to_exists && from_exists {
            return Ok(ResourceState::Invalid {
                reason: format!("destination already exists: {}", self.to.display()),
            });
        }
        if to_exists {
            return Ok(ResourceState::Correct);
        }
        if !from_exists {
            return Ok(ResourceState::Invalid {
                reason: format!("source does not exist: {}", self.from.display()),
            });
        }
        Ok(ResourceState::Missing)
    }

    fn apply(&self) -> Result<ResourceChange> {
        std::fs::rename(&self.from, &self.to).with_context(|| {
            format!(
                "rename {} to {}",
                self.from.display(),
                self.to.display()
            )
        })?;
        Ok(ResourceChange::Applied)
    }
}
