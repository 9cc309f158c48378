//! Profile records and the on-disk profile store.
use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::{read_json, write_json};
use crate::error::UserError;

/// Mod loader a profile targets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Loader {
    /// Minecraft Forge.
    Forge,
    /// Fabric.
    Fabric,
    /// Quilt.
    Quilt,
    /// NeoForge.
    #[value(name = "neoforge")]
    NeoForge,
}

impl Loader {
    /// Lowercase catalog name, as used in artifact file names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forge => "forge",
            Self::Fabric => "fabric",
            Self::Quilt => "quilt",
            Self::NeoForge => "neoforge",
        }
    }
}

impl fmt::Display for Loader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Loader {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "forge" => Ok(Self::Forge),
            "fabric" => Ok(Self::Fabric),
            "quilt" => Ok(Self::Quilt),
            "neoforge" => Ok(Self::NeoForge),
            other => Err(format!(
                "unknown loader '{other}' (expected forge, fabric, quilt or neoforge)"
            )),
        }
    }
}

/// A named selection of mods and libraries for one game version and loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Profile name; derived from the file name, never serialized.
    #[serde(skip)]
    pub name: String,
    /// Game version.
    pub version: String,
    /// Mod loader.
    pub loader: Loader,
    /// Mod slugs, in insertion order, without duplicates.
    #[serde(default)]
    pub mods: Vec<String>,
    /// Library slugs, in insertion order, without duplicates.
    #[serde(default)]
    pub libs: Vec<String>,
    /// Profiles whose mods and libs are linked alongside this one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fork: Option<Vec<String>>,
}

impl Profile {
    /// Create an empty profile.
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>, loader: Loader) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            loader,
            mods: Vec::new(),
            libs: Vec::new(),
            fork: None,
        }
    }

    /// Append `slug` to `mods` unless present. Returns whether it was added.
    pub fn add_mod(&mut self, slug: &str) -> bool {
        if self.mods.iter().any(|m| m == slug) {
            return false;
        }
        self.mods.push(slug.to_string());
        true
    }

    /// Drop `slug` from `mods` and `libs`. Returns whether anything changed.
    pub fn remove_slug(&mut self, slug: &str) -> bool {
        let before = self.mods.len() + self.libs.len();
        self.mods.retain(|m| m != slug);
        self.libs.retain(|l| l != slug);
        before != self.mods.len() + self.libs.len()
    }

    /// Whether `slug` appears in `mods` or `libs`.
    #[must_use]
    pub fn uses(&self, slug: &str) -> bool {
        self.mods.iter().chain(&self.libs).any(|s| s == slug)
    }

    /// Fork names, empty when the profile declares none.
    #[must_use]
    pub fn forks(&self) -> &[String] {
        self.fork.as_deref().unwrap_or_default()
    }

    /// Collapse duplicate slugs, keeping the first occurrence.
    fn dedup(&mut self) {
        dedup_in_order(&mut self.mods);
        dedup_in_order(&mut self.libs);
    }
}

fn dedup_in_order(items: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    items.retain(|item| seen.insert(item.clone()));
}

/// Check that `name` can be used as a profile file name.
///
/// # Errors
///
/// Returns [`UserError::InvalidProfileName`] for empty names, names starting
/// with `.`, and names containing path separators or NUL.
pub fn validate_name(name: &str) -> Result<(), UserError> {
    let bad = name.is_empty()
        || name.starts_with('.')
        || name.contains(['/', '\\', '\0']);
    if bad {
        return Err(UserError::InvalidProfileName(name.to_string()));
    }
    Ok(())
}

/// Stateless access to `profiles/<name>.json`.
///
/// Every call goes to disk; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    dir: PathBuf,
}

impl ProfileStore {
    /// Create a store over `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the profile files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    /// Whether a profile file exists for `name`.
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        validate_name(name).is_ok() && self.path(name).is_file()
    }

    /// Load the profile called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::ProfileNotFound`] if there is no such file, or an
    /// I/O / parse error if it cannot be read.
    pub fn load(&self, name: &str) -> Result<Profile> {
        validate_name(name)?;
        let path = self.path(name);
        if !path.is_file() {
            return Err(UserError::ProfileNotFound(name.to_string()).into());
        }
        let mut profile: Profile = read_json(&path)?;
        profile.name = name.to_string();
        profile.dedup();
        Ok(profile)
    }

    /// Write `profile`, overwriting any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or the file cannot be written.
    pub fn save(&self, profile: &Profile) -> Result<()> {
        validate_name(&profile.name)?;
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create directory: {}", self.dir.display()))?;
        write_json(&self.path(&profile.name), profile)
    }

    /// Remove the profile file for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::ProfileNotFound`] if there is no such file, or an
    /// I/O error if it cannot be removed.
    pub fn delete(&self, name: &str) -> Result<()> {
        if !self.exists(name) {
            return Err(UserError::ProfileNotFound(name.to_string()).into());
        }
        let path = self.path(name);
        std::fs::remove_file(&path).with_context(|| format!("remove {}", path.display()))
    }

    /// Names of all stored profiles, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    pub fn list_names(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.dir)
            .with_context(|| format!("read directory: {}", self.dir.display()))?
        {
            let path = entry
                .with_context(|| format!("read entry in {}", self.dir.display()))?
                .path();
            if path.extension().is_some_and(|e| e == "json")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Load every stored profile, in name order.
    ///
    /// # Errors
    ///
    /// Returns an error if any profile cannot be read or parsed.
    pub fn load_all(&self) -> Result<Vec<Profile>> {
        self.list_names()?.iter().map(|n| self.load(n)).collect()
    }
}
