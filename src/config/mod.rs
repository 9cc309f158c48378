//! On-disk layout, the process-wide config file, and profile records.
pub mod profiles;

use anyhow::{Context as _, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::UserError;
use crate::logging::Log;
use crate::platform::Platform;

/// Directory layout under the root working directory.
///
/// ```text
/// <root>/config.json
/// <root>/profiles/<name>.json
/// <root>/mods/<slug>-<version>-<loader>.jar
/// <root>/libs/<slug>-<version>-<loader>.jar
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    /// Create a layout rooted at `root`. Nothing is touched on disk.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root working directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the process-wide config file.
    #[must_use]
    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.json")
    }

    /// Directory holding one JSON file per profile.
    #[must_use]
    pub fn profiles_dir(&self) -> PathBuf {
        self.root.join("profiles")
    }

    /// Artifact pool for mods.
    #[must_use]
    pub fn mods_dir(&self) -> PathBuf {
        self.root.join("mods")
    }

    /// Artifact pool for libraries.
    #[must_use]
    pub fn libs_dir(&self) -> PathBuf {
        self.root.join("libs")
    }

    /// Create the root and its subdirectories if they are missing.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created.
    pub fn ensure(&self) -> Result<()> {
        for dir in [self.profiles_dir(), self.mods_dir(), self.libs_dir()] {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("create directory: {}", dir.display()))?;
        }
        Ok(())
    }
}

/// Process-wide configuration, persisted as `config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Name of the active profile, if any.
    #[serde(default)]
    pub selected_profile: Option<String>,
    /// Game client directory that receives the links.
    #[serde(default)]
    pub mods_dir: PathBuf,
}

impl Config {
    /// Load `config.json`, creating it with the platform default mods
    /// directory on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if the initial file cannot be written.
    pub fn load_or_create(layout: &Layout, platform: &Platform, log: &dyn Log) -> Result<Self> {
        let path = layout.config_file();
        if path.exists() {
            return read_json(&path);
        }

        let mods_dir = platform.default_mods_dir().unwrap_or_else(|| {
            log.warn(&format!(
                "platform not known, please set the mods directory in {} manually",
                path.display()
            ));
            PathBuf::new()
        });
        let config = Self {
            selected_profile: None,
            mods_dir,
        };
        config.save(layout)?;
        log.debug(&format!("created {}", path.display()));
        Ok(config)
    }

    /// Persist to `config.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, layout: &Layout) -> Result<()> {
        write_json(&layout.config_file(), self)
    }

    /// Name of the active profile, or [`UserError::NoProfileSelected`].
    ///
    /// # Errors
    ///
    /// Returns an error if no profile is selected.
    pub fn require_selected(&self) -> Result<&str, UserError> {
        self.selected_profile
            .as_deref()
            .ok_or(UserError::NoProfileSelected)
    }
}

/// Resolve the root working directory from the CLI override or the
/// environment, create it, and return its canonical form.
///
/// # Errors
///
/// Returns an error if no candidate can be determined or the directory
/// cannot be created.
pub fn resolve_root(explicit: Option<&Path>, platform: &Platform) -> Result<PathBuf> {
    let root = root_candidate(explicit, platform, |name| std::env::var(name).ok())?;
    std::fs::create_dir_all(&root)
        .with_context(|| format!("create root directory: {}", root.display()))?;
    dunce::canonicalize(&root).with_context(|| format!("canonicalize {}", root.display()))
}

/// Pick the root directory: `--root`, then `$MODDER_HOME`, then the
/// platform data directory joined with `modder`.
fn root_candidate<F>(explicit: Option<&Path>, platform: &Platform, env: F) -> Result<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(root) = explicit {
        return Ok(root.to_path_buf());
    }
    if let Some(home) = env("MODDER_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    platform
        .data_dir_with(env)
        .map(|d| d.join("modder"))
        .ok_or_else(|| anyhow::anyhow!("cannot determine data directory. Use --root or set MODDER_HOME"))
}

/// Read and deserialize a JSON file.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parse {}", path.display()))
}

/// Serialize `value` as pretty JSON and write it to `path`.
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)
        .with_context(|| format!("serialize {}", path.display()))?;
    std::fs::write(path, content).with_context(|| format!("write {}", path.display()))
}
