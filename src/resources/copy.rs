//! Copied-file resource.
use anyhow::{Context as _, Result};
use std::path::PathBuf;

use super::{Resource, ResourceChange, ResourceState};

/// A file copy that can be checked and applied.
///
/// The destination is considered correct when it exists with the same
/// length as the source; differing content is overwritten on apply.
#[derive(Debug, Clone)]
pub struct CopyResource {
    /// The file to copy.
    pub source: PathBuf,
    /// Where the copy should land.
    pub dest: PathBuf,
}

impl CopyResource {
    /// Create a new copy resource.
    #[must_use]
    pub const fn new(source: PathBuf, dest: PathBuf) -> Self {
        Self { source, dest }
    }
}

impl Resource for CopyResource {
    fn description(&self) -> String {
        format!("{} -> {}", self.source.display(), self.dest.display())
    }

    fn current_state(&self) -> Result<ResourceState> {
        let source_meta = match self.source.metadata() {
            Ok(meta) => meta,
            Err(_) => {
                return Ok(ResourceState::Invalid {
                    reason: format!("source does not exist: {}", self.source.display()),
                });
            }
        };

        match self.dest.metadata() {
            Ok(dest_meta) if dest_meta.len() == source_meta.len() => Ok(ResourceState::Correct),
            Ok(dest_meta) => Ok(ResourceState::Incorrect {
                current: format!("{} bytes", dest_meta.len()),
            }),
            Err(_) => Ok(ResourceState::Missing),
        }
    }

    fn apply(&self) -> Result<ResourceChange> {
        if let Some(parent) = self.dest.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create parent: {}", parent.display()))?;
        }
        std::fs::copy(&self.source, &self.dest).with_context(|| {
            format!(
                "copy {} to {}",
                self.source.display(),
                self.dest.display()
            )
        })?;
        Ok(ResourceChange::Applied)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn missing_when_dest_not_exists() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.txt");
        std::fs::write(&source, b"data").unwrap();

        let resource = CopyResource::new(source, dir.path().join("out/a.txt"));
        assert_eq!(resource.current_state().unwrap(), ResourceState::Missing);
    }

    #[test]
    fn invalid_when_source_missing() {
        let dir = tempfile::tempdir().unwrap();
        let resource = CopyResource::new(dir.path().join("gone"), dir.path().join("out"));
        assert!(matches!(
            resource.current_state().unwrap(),
            ResourceState::Invalid { .. }
        ));
    }

    #[test]
    fn correct_when_dest_has_same_length() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.txt");
        let dest = dir.path().join("b.txt");
        std::fs::write(&source, b"data").unwrap();
        std::fs::write(&dest, b"data").unwrap();

        let resource = CopyResource::new(source, dest);
        assert_eq!(resource.current_state().unwrap(), ResourceState::Correct);
    }

    #[test]
    fn incorrect_when_dest_differs() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.txt");
        let dest = dir.path().join("b.txt");
        std::fs::write(&source, b"data").unwrap();
        std::fs::write(&dest, b"different length").unwrap();

        let resource = CopyResource::new(source, dest);
        assert!(matches!(
            resource.current_state().unwrap(),
            ResourceState::Incorrect { .. }
        ));
    }

    #[test]
    fn apply_copies_and_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.txt");
        std::fs::write(&source, b"payload").unwrap();
        let dest = dir.path().join("nested/dir/a.txt");

        let resource = CopyResource::new(source, dest.clone());
        assert_eq!(resource.apply().unwrap(), ResourceChange::Applied);
        assert_eq!(std::fs::read(&dest).unwrap(), b"payload");
        assert_eq!(resource.current_state().unwrap(), ResourceState::Correct);
    }

    #[test]
    fn apply_overwrites_incorrect_dest() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.txt");
        let dest = dir.path().join("b.txt");
        std::fs::write(&source, b"new content").unwrap();
        std::fs::write(&dest, b"stale").unwrap();

        let resource = CopyResource::new(source, dest.clone());
        resource.apply().unwrap();
        assert_eq!(std::fs::read(&dest).unwrap(), b"new content");
    }
}
