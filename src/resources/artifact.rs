//! Content-keyed cache of downloaded archives.
use anyhow::{Context as _, Result};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::Layout;
use crate::config::profiles::Loader;

/// Which pool an artifact lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pool {
    /// `<root>/mods`
    Mods,
    /// `<root>/libs`
    Libs,
}

impl Pool {
    /// Capitalised singular label used in messages ("Mod", "Lib").
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mods => "Mod",
            Self::Libs => "Lib",
        }
    }
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mods => "mods",
            Self::Libs => "libs",
        })
    }
}

/// Identity of a cached archive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactKey {
    /// Catalog slug as requested by the user.
    pub slug: String,
    /// Game version the archive was resolved for.
    pub game_version: String,
    /// Loader the archive was resolved for.
    pub loader: Loader,
}

impl ArtifactKey {
    /// Create a key.
    #[must_use]
    pub fn new(slug: impl Into<String>, game_version: impl Into<String>, loader: Loader) -> Self {
        Self {
            slug: slug.into(),
            game_version: game_version.into(),
            loader,
        }
    }

    /// `<slug>-<gameVersion>-<loader>.jar`
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}-{}-{}.jar", self.slug, self.game_version, self.loader)
    }

    /// Parse a file name produced by [`file_name`](Self::file_name).
    ///
    /// The rightmost `-` separates the loader and the next one the game
    /// version, so slugs may contain dashes but game versions may not.
    ///
    /// # Examples
    ///
    /// ```
    /// use modder::config::profiles::Loader;
    /// use modder::resources::artifact::ArtifactKey;
    ///
    /// let key = ArtifactKey::parse("fabric-api-1.20.1-fabric.jar").unwrap();
    /// assert_eq!(key.slug, "fabric-api");
    /// assert_eq!(key.game_version, "1.20.1");
    /// assert_eq!(key.loader, Loader::Fabric);
    /// assert!(ArtifactKey::parse("readme.txt").is_none());
    /// ```
    #[must_use]
    pub fn parse(file_name: &str) -> Option<Self> {
        let stem = file_name.strip_suffix(".jar")?;
        let (rest, loader) = stem.rsplit_once('-')?;
        let (slug, game_version) = rest.rsplit_once('-')?;
        if slug.is_empty() || game_version.is_empty() {
            return None;
        }
        Some(Self::new(slug, game_version, loader.parse().ok()?))
    }
}

impl fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.slug, self.game_version, self.loader)
    }
}

/// Archive cache under the root directory's `mods/` and `libs/` pools.
///
/// Existence on disk is the only state; there is no index.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    mods: PathBuf,
    libs: PathBuf,
}

impl ArtifactStore {
    /// Create a store over the pools of `layout`.
    #[must_use]
    pub fn new(layout: &Layout) -> Self {
        Self {
            mods: layout.mods_dir(),
            libs: layout.libs_dir(),
        }
    }

    /// Directory backing `pool`.
    #[must_use]
    pub fn pool_dir(&self, pool: Pool) -> &Path {
        match pool {
            Pool::Mods => &self.mods,
            Pool::Libs => &self.libs,
        }
    }

    /// Absolute path of the archive for `key`.
    #[must_use]
    pub fn path(&self, key: &ArtifactKey, pool: Pool) -> PathBuf {
        self.pool_dir(pool).join(key.file_name())
    }

    /// Whether the archive for `key` is cached.
    #[must_use]
    pub fn exists(&self, key: &ArtifactKey, pool: Pool) -> bool {
        self.path(key, pool).is_file()
    }

    /// Store `bytes` for `key`, replacing any existing archive.
    ///
    /// The bytes land in a sibling `.part` file first and are renamed into
    /// place, so an interrupted write never leaves a truncated `.jar`.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool directory or the file cannot be written.
    pub fn write(&self, key: &ArtifactKey, pool: Pool, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.path(key, pool);
        super::helpers::fs::ensure_parent_dir(&path)?;
        let part = path.with_extension("jar.part");
        std::fs::write(&part, bytes).with_context(|| format!("write {}", part.display()))?;
        if let Err(e) = std::fs::rename(&part, &path) {
            let _ = std::fs::remove_file(&part);
            return Err(e).with_context(|| format!("rename {} to {}", part.display(), path.display()));
        }
        Ok(path)
    }

    /// Remove the archive for `key`. Returns whether a file was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn delete(&self, key: &ArtifactKey, pool: Pool) -> Result<bool> {
        self.delete_file(pool, &key.file_name())
    }

    /// Remove the archive called `file_name` from `pool`. Returns whether a
    /// file was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn delete_file(&self, pool: Pool, file_name: &str) -> Result<bool> {
        let path = self.pool_dir(pool).join(file_name);
        if !path.is_file() {
            return Ok(false);
        }
        std::fs::remove_file(&path).with_context(|| format!("remove {}", path.display()))?;
        Ok(true)
    }

    /// File names of every `.jar` in `pool`, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool directory cannot be read.
    pub fn list_files(&self, pool: Pool) -> Result<Vec<String>> {
        let dir = self.pool_dir(pool);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in
            std::fs::read_dir(dir).with_context(|| format!("read directory: {}", dir.display()))?
        {
            let entry = entry.with_context(|| format!("read entry in {}", dir.display()))?;
            if !entry.path().is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str()
                && name.ends_with(".jar")
            {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Keys of every parseable archive in `pool`, in file name order.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool directory cannot be read.
    pub fn list_all(&self, pool: Pool) -> Result<Vec<ArtifactKey>> {
        Ok(self
            .list_files(pool)?
            .iter()
            .filter_map(|name| ArtifactKey::parse(name))
            .collect())
    }
}
