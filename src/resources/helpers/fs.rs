//! Filesystem helpers shared by the link and artifact code.
use anyhow::{Context as _, Result};
use std::path::Path;

/// Create every missing ancestor directory of `path`.
///
/// # Errors
///
/// Returns an error if a directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent.display()))
}

/// Remove whatever lives at `path`: a file, a symlink (broken or not), or a
/// real directory tree. Does nothing if `path` does not exist.
///
/// Symlinks are removed without touching what they point at.
///
/// # Errors
///
/// Returns an error if the path exists but cannot be removed.
pub fn remove_existing(path: &Path) -> Result<()> {
    let Ok(meta) = std::fs::symlink_metadata(path) else {
        return Ok(());
    };
    if meta.is_symlink() {
        super::super::symlink::remove_symlink(path)
    } else if meta.is_dir() {
        std::fs::remove_dir_all(path)
            .with_context(|| format!("remove directory: {}", path.display()))
    } else {
        std::fs::remove_file(path).with_context(|| format!("remove existing: {}", path.display()))
    }
}

/// Remove every entry directly inside `dir`. Returns how many were removed.
///
/// A missing directory has nothing to remove.
///
/// # Errors
///
/// Returns an error if the directory cannot be listed or an entry cannot be
/// removed.
pub fn clear_dir(dir: &Path) -> Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }
    let mut removed = 0;
    for entry in
        std::fs::read_dir(dir).with_context(|| format!("read directory: {}", dir.display()))?
    {
        let entry = entry.with_context(|| format!("read entry in {}", dir.display()))?;
        remove_existing(&entry.path())?;
        removed += 1;
    }
    Ok(removed)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parents_are_created() {
        let tmp = tempfile::tempdir().unwrap();
        let jar = tmp.path().join("client").join("mods").join("sodium.jar");
        ensure_parent_dir(&jar).unwrap();
        assert!(tmp.path().join("client").join("mods").is_dir());
        assert!(!jar.exists());
    }

    #[test]
    fn removes_plain_file() {
        let tmp = tempfile::tempdir().unwrap();
        let jar = tmp.path().join("copied.jar");
        std::fs::write(&jar, "jar").unwrap();
        remove_existing(&jar).unwrap();
        assert!(!jar.exists());
    }

    #[test]
    fn absent_path_is_fine() {
        let tmp = tempfile::tempdir().unwrap();
        remove_existing(&tmp.path().join("never-created.jar")).unwrap();
    }

    #[test]
    fn removes_whole_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let unpacked = tmp.path().join("unpacked");
        std::fs::create_dir_all(unpacked.join("META-INF")).unwrap();
        std::fs::write(unpacked.join("META-INF").join("MANIFEST.MF"), "x").unwrap();
        remove_existing(&unpacked).unwrap();
        assert!(!unpacked.exists());
    }

    #[cfg(unix)]
    #[test]
    fn removes_dangling_link() {
        let tmp = tempfile::tempdir().unwrap();
        let dangling = tmp.path().join("old.jar");
        std::os::unix::fs::symlink(tmp.path().join("deleted.jar"), &dangling).unwrap();
        remove_existing(&dangling).unwrap();
        assert!(dangling.symlink_metadata().is_err());
    }

    #[cfg(unix)]
    #[test]
    fn link_removal_leaves_cached_archive() {
        let tmp = tempfile::tempdir().unwrap();
        let cached = tmp.path().join("sodium-1.20.1-fabric.jar");
        let link = tmp.path().join("mods-link.jar");
        std::fs::write(&cached, "jar").unwrap();
        std::os::unix::fs::symlink(&cached, &link).unwrap();
        remove_existing(&link).unwrap();
        assert!(cached.is_file());
        assert!(link.symlink_metadata().is_err());
    }

    #[test]
    fn clear_dir_counts_what_it_removed() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("a.jar"), "a").unwrap();
        std::fs::write(tmp.path().join("b.jar"), "b").unwrap();
        std::fs::create_dir(tmp.path().join("config")).unwrap();
        assert_eq!(clear_dir(tmp.path()).unwrap(), 3);
        assert!(std::fs::read_dir(tmp.path()).unwrap().next().is_none());
    }

    #[test]
    fn clear_dir_without_dir_removes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(clear_dir(&tmp.path().join("mods")).unwrap(), 0);
    }
}
