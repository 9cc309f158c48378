//! Command: show the selected profile and cache statistics.
use anyhow::Result;

use super::CommandSetup;
use crate::config::profiles::{Loader, Profile};
use crate::logging::Log;
use crate::resources::artifact::{ArtifactKey, Pool};
use crate::resources::symlink::LinkResource;
use crate::resources::{Resource as _, ResourceState};

/// Details of the selected profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveProfile {
    /// Profile name.
    pub name: String,
    /// Game version.
    pub version: String,
    /// Mod loader.
    pub loader: Loader,
    /// Mods listed in the profile itself.
    pub mods: usize,
    /// Libraries listed in the profile itself.
    pub libs: usize,
    /// Profiles this one forks.
    pub forks: Vec<String>,
    /// Own mods and libraries currently linked into the mods directory.
    pub linked: usize,
}

/// A snapshot of the root and the client mods directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    /// The selected profile, if any.
    pub active: Option<ActiveProfile>,
    /// Archives in the mod pool.
    pub cached_mods: usize,
    /// Archives in the library pool.
    pub cached_libs: usize,
    /// Number of stored profiles.
    pub profiles: usize,
}

impl Status {
    /// Gather the status without touching the mods directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the selected profile, the profile directory, or a
    /// pool directory cannot be read.
    pub fn collect(setup: &CommandSetup) -> Result<Self> {
        let active = match &setup.config.selected_profile {
            Some(name) => Some(describe(setup, &setup.profiles.load(name)?)?),
            None => None,
        };
        Ok(Self {
            active,
            cached_mods: setup.artifacts.list_files(Pool::Mods)?.len(),
            cached_libs: setup.artifacts.list_files(Pool::Libs)?.len(),
            profiles: setup.profiles.list_names()?.len(),
        })
    }

    /// Lines to print, in display order.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        match &self.active {
            Some(p) => {
                lines.push(format!("Selected profile: {}", p.name));
                lines.push(format!("  Version: {}", p.version));
                lines.push(format!("  Loader: {}", p.loader));
                lines.push(format!("  Mods: {}", p.mods));
                lines.push(format!("  Libs: {}", p.libs));
                if !p.forks.is_empty() {
                    lines.push(format!("  Forks: {}", p.forks.join(", ")));
                }
                lines.push(format!("  Linked: {}/{}", p.linked, p.mods + p.libs));
            }
            None => lines.push("Selected profile: none".to_string()),
        }
        lines.push(format!("Installed mods: {}", self.cached_mods));
        lines.push(format!("Installed libs: {}", self.cached_libs));
        lines.push(format!("Profiles: {}", self.profiles));
        lines
    }
}

fn describe(setup: &CommandSetup, profile: &Profile) -> Result<ActiveProfile> {
    let mut linked = 0;
    for (slugs, pool) in [(&profile.mods, Pool::Mods), (&profile.libs, Pool::Libs)] {
        for slug in slugs {
            let key = ArtifactKey::new(slug.as_str(), profile.version.as_str(), profile.loader);
            let link = LinkResource::new(
                setup.artifacts.path(&key, pool),
                setup.config.mods_dir.join(key.file_name()),
            );
            if link.current_state()? == ResourceState::Correct {
                linked += 1;
            }
        }
    }
    Ok(ActiveProfile {
        name: profile.name.clone(),
        version: profile.version.clone(),
        loader: profile.loader,
        mods: profile.mods.len(),
        libs: profile.libs.len(),
        forks: profile.forks().to_vec(),
        linked,
    })
}

/// Print the status.
///
/// # Errors
///
/// Returns the errors of [`Status::collect`].
pub fn run(setup: &CommandSetup, log: &dyn Log) -> Result<Status> {
    let status = Status::collect(setup)?;
    for line in status.lines() {
        log.info(&line);
    }
    Ok(status)
}
