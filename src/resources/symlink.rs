//! One symlink in the client mods directory pointing into the artifact cache.
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

use super::{Resource, ResourceChange, ResourceState};

/// A link at `target` that should resolve to the cached archive `source`.
#[derive(Debug, Clone)]
pub struct LinkResource {
    /// Cached archive.
    pub source: PathBuf,
    /// Entry in the mods directory.
    pub target: PathBuf,
}

impl LinkResource {
    /// Describe the link `target -> source`.
    #[must_use]
    pub const fn new(source: PathBuf, target: PathBuf) -> Self {
        Self { source, target }
    }
}

impl Resource for LinkResource {
    fn description(&self) -> String {
        format!("{} -> {}", self.target.display(), self.source.display())
    }

    fn current_state(&self) -> Result<ResourceState> {
        if !self.source.is_file() {
            return Ok(ResourceState::Invalid {
                reason: format!("{} is not cached", self.source.display()),
            });
        }
        let Ok(meta) = self.target.symlink_metadata() else {
            return Ok(ResourceState::Missing);
        };
        if !meta.file_type().is_symlink() {
            return Ok(ResourceState::Incorrect {
                current: "not a symlink".to_string(),
            });
        }
        let points_to = std::fs::read_link(&self.target)
            .with_context(|| format!("read link {}", self.target.display()))?;
        if dunce::simplified(&points_to) == dunce::simplified(&self.source) {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Incorrect {
                current: format!("points to {}", points_to.display()),
            })
        }
    }

    fn apply(&self) -> Result<ResourceChange> {
        if self.current_state()? == ResourceState::Correct {
            return Ok(ResourceChange::AlreadyCorrect);
        }
        super::helpers::fs::ensure_parent_dir(&self.target)?;
        super::helpers::fs::remove_existing(&self.target)?;
        create_symlink(&self.source, &self.target)?;
        Ok(ResourceChange::Applied)
    }

    fn remove(&self) -> Result<ResourceChange> {
        if self.target.symlink_metadata().is_err() {
            return Ok(ResourceChange::AlreadyCorrect);
        }
        remove_symlink(&self.target)?;
        Ok(ResourceChange::Applied)
    }
}

fn create_symlink(source: &Path, link: &Path) -> Result<()> {
    #[cfg(unix)]
    let created = std::os::unix::fs::symlink(source, link);
    // Needs developer mode or an elevated shell.
    #[cfg(windows)]
    let created = std::os::windows::fs::symlink_file(source, link);
    created.with_context(|| format!("link {} -> {}", link.display(), source.display()))
}

/// Unlink `path` without touching what it points to.
pub(super) fn remove_symlink(path: &Path) -> Result<()> {
    // Directory links on Windows only go away with remove_dir.
    std::fs::remove_file(path)
        .or_else(|_| std::fs::remove_dir(path))
        .with_context(|| format!("remove link {}", path.display()))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn description_names_both_ends() {
        let link = LinkResource::new(PathBuf::from("/pool/a.jar"), PathBuf::from("/mods/a.jar"));
        assert!(link.description().contains("/pool/a.jar"));
        assert!(link.description().contains("/mods/a.jar"));
    }

    #[test]
    fn invalid_when_source_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let link = LinkResource::new(tmp.path().join("gone.jar"), tmp.path().join("link.jar"));
        assert!(matches!(
            link.current_state().unwrap(),
            ResourceState::Invalid { .. }
        ));
    }

    #[test]
    fn missing_when_target_absent() {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("a.jar");
        std::fs::write(&source, "jar").unwrap();
        let link = LinkResource::new(source, tmp.path().join("mods").join("a.jar"));
        assert_eq!(link.current_state().unwrap(), ResourceState::Missing);
    }

    #[test]
    fn incorrect_when_target_is_regular_file() {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("a.jar");
        let target = tmp.path().join("copy.jar");
        std::fs::write(&source, "jar").unwrap();
        std::fs::write(&target, "stale copy").unwrap();
        let link = LinkResource::new(source, target);
        assert!(matches!(
            link.current_state().unwrap(),
            ResourceState::Incorrect { .. }
        ));
    }

    #[cfg(unix)]
    #[test]
    fn apply_creates_then_reports_correct() {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("a.jar");
        std::fs::write(&source, "jar").unwrap();
        let target = tmp.path().join("mods").join("a.jar");
        let link = LinkResource::new(source.clone(), target.clone());

        assert_eq!(link.apply().unwrap(), ResourceChange::Applied);
        assert_eq!(std::fs::read_link(&target).unwrap(), source);
        assert_eq!(link.apply().unwrap(), ResourceChange::AlreadyCorrect);
    }

    #[cfg(unix)]
    #[test]
    fn apply_replaces_wrong_link() {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("a.jar");
        let other = tmp.path().join("b.jar");
        let target = tmp.path().join("link.jar");
        std::fs::write(&source, "a").unwrap();
        std::fs::write(&other, "b").unwrap();
        std::os::unix::fs::symlink(&other, &target).unwrap();

        let link = LinkResource::new(source.clone(), target.clone());
        assert!(link.needs_change().unwrap());
        link.apply().unwrap();
        assert_eq!(std::fs::read_link(&target).unwrap(), source);
        assert!(other.exists());
    }

    #[cfg(unix)]
    #[test]
    fn remove_unlinks_but_keeps_source() {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("a.jar");
        std::fs::write(&source, "jar").unwrap();
        let link = LinkResource::new(source.clone(), tmp.path().join("link.jar"));
        link.apply().unwrap();

        assert_eq!(link.remove().unwrap(), ResourceChange::Applied);
        assert!(source.exists());
        assert_eq!(link.current_state().unwrap(), ResourceState::Missing);
        assert_eq!(link.remove().unwrap(), ResourceChange::AlreadyCorrect);
    }
}
