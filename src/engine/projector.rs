//! Link projection: make the client mods directory mirror the active profile.
use anyhow::{Context as _, Result};
use std::path::Path;

use crate::config::profiles::{Profile, ProfileStore};
use crate::error::ReconcileError;
use crate::logging::Log;
use crate::resources::artifact::{ArtifactKey, ArtifactStore, Pool};
use crate::resources::helpers::fs::clear_dir;
use crate::resources::symlink::LinkResource;
use crate::resources::{Resource as _, ResourceChange};

/// Reconciles symlinks in the client mods directory against a profile.
///
/// Every pass starts by emptying the directory, so the result depends only
/// on the profile and the artifact store.
pub struct LinkProjector<'a> {
    mods_dir: &'a Path,
    artifacts: &'a ArtifactStore,
    profiles: &'a ProfileStore,
    log: &'a dyn Log,
}

impl std::fmt::Debug for LinkProjector<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkProjector")
            .field("mods_dir", &self.mods_dir)
            .field("artifacts", &self.artifacts)
            .field("profiles", &self.profiles)
            .field("log", &"<dyn Log>")
            .finish()
    }
}

impl<'a> LinkProjector<'a> {
    /// Create a projector targeting `mods_dir`.
    #[must_use]
    pub fn new(
        mods_dir: &'a Path,
        artifacts: &'a ArtifactStore,
        profiles: &'a ProfileStore,
        log: &'a dyn Log,
    ) -> Self {
        Self {
            mods_dir,
            artifacts,
            profiles,
            log,
        }
    }

    /// Replace the contents of the mods directory with links to every
    /// artifact `active` requires, following forks. Returns the number of
    /// links created.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::ModsDirUnset`] when no mods directory is
    /// configured, [`ReconcileError::MissingArtifact`] at the first required
    /// artifact that is not cached, and [`ReconcileError::ForkCycle`] when a
    /// fork chain loops. The directory is left as far as the pass got.
    /// Filesystem and profile-loading failures propagate as-is.
    pub fn project(&self, active: Option<&Profile>) -> Result<usize> {
        if self.mods_dir.as_os_str().is_empty() {
            return Err(ReconcileError::ModsDirUnset.into());
        }

        let removed = clear_dir(self.mods_dir)?;
        self.log.debug(&format!(
            "removed {removed} entries from {}",
            self.mods_dir.display()
        ));

        let Some(profile) = active.filter(|p| !p.mods.is_empty()) else {
            return Ok(0);
        };

        std::fs::create_dir_all(self.mods_dir)
            .with_context(|| format!("create directory: {}", self.mods_dir.display()))?;

        let mut chain = Vec::new();
        let linked = self.link_profile(profile, &mut chain)?;
        self.log.debug(&format!(
            "linked {linked} artifacts into {}",
            self.mods_dir.display()
        ));
        Ok(linked)
    }

    fn link_profile(&self, profile: &Profile, chain: &mut Vec<String>) -> Result<usize> {
        if chain.contains(&profile.name) {
            let mut cycle = chain.clone();
            cycle.push(profile.name.clone());
            return Err(ReconcileError::ForkCycle {
                chain: cycle.join(" -> "),
            }
            .into());
        }
        chain.push(profile.name.clone());

        let mut linked = self.link_pool(profile, &profile.mods, Pool::Mods)?;
        linked += self.link_pool(profile, &profile.libs, Pool::Libs)?;

        for fork_name in profile.forks() {
            let fork = self.profiles.load(fork_name)?;
            self.log.debug(&format!("{}: following fork {fork_name}", profile.name));
            linked += self.link_profile(&fork, chain)?;
        }

        chain.pop();
        Ok(linked)
    }

    fn link_pool(&self, profile: &Profile, slugs: &[String], pool: Pool) -> Result<usize> {
        let mut linked = 0;
        for slug in slugs {
            let key = ArtifactKey::new(slug.as_str(), profile.version.as_str(), profile.loader);
            let source = self.artifacts.path(&key, pool);
            if !source.is_file() {
                return Err(ReconcileError::MissingArtifact {
                    kind: pool.label(),
                    path: source.display().to_string(),
                }
                .into());
            }
            let link = LinkResource::new(source, self.mods_dir.join(key.file_name()));
            if link.apply()? == ResourceChange::Applied {
                linked += 1;
            }
        }
        Ok(linked)
    }
}
