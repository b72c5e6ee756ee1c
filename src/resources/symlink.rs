//! Symlink resource.
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

use super::{Resource, ResourceChange, ResourceState};

/// A symlink resource that can be checked and applied.
#[derive(Debug, Clone)]
pub struct LinkResource {
    /// The source file (what the symlink points to).
    pub source: PathBuf,
    /// The link path (where the symlink will be created).
    pub link: PathBuf,
}

impl LinkResource {
    /// Create a new symlink resource.
    #[must_use]
    pub const fn new(source: PathBuf, link: PathBuf) -> Self {
        Self { source, link }
    }
}

impl Resource for LinkResource {
    fn description(&self) -> String {
        format!("{} -> {}", self.link.display(), self.source.display())
    }

    fn current_state(&self) -> Result<ResourceState> {
        if !self.source.exists() {
            return Ok(ResourceState::Invalid {
                reason: format!("source does not exist: {}", self.source.display()),
            });
        }

        std::fs::read_link(&self.link).map_or_else(
            |_| {
                // Link path doesn't exist or isn't a symlink
                if self.link.exists() {
                    Ok(ResourceState::Incorrect {
                        current: "link path is a regular file".to_string(),
                    })
                } else {
                    Ok(ResourceState::Missing)
                }
            },
            |existing| {
                if existing == self.source {
                    Ok(ResourceState::Correct)
                } else {
                    Ok(ResourceState::Incorrect {
                        current: format!("points to {}", existing.display()),
                    })
                }
            },
        )
    }

    fn apply(&self) -> Result<ResourceChange> {
        if let Some(parent) = self.link.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create parent: {}", parent.display()))?;
        }

        // Remove an existing file or stale link before re-linking
        if self.link.exists() || self.link.symlink_metadata().is_ok() {
            std::fs::remove_file(&self.link)
                .with_context(|| format!("remove existing: {}", self.link.display()))?;
        }

        create_symlink(&self.source, &self.link)
            .with_context(|| format!("create link: {}", self.link.display()))?;

        Ok(ResourceChange::Applied)
    }
}

/// Create a symlink at `link` pointing to `source` (platform-specific).
fn create_symlink(source: &Path, link: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(source, link)?;
    }

    #[cfg(windows)]
    {
        std::os::windows::fs::symlink_file(source, link)?;
    }

    Ok(())
}
