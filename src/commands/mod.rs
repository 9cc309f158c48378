//! Subcommand orchestration and the setup shared between commands.
pub mod completions;
pub mod install;
pub mod mods;
pub mod profile;
pub mod search;
pub mod status;
pub mod version;

use anyhow::Result;
use std::path::Path;

use crate::cli::GlobalOpts;
use crate::config::profiles::{Profile, ProfileStore};
use crate::config::{Config, Layout, resolve_root};
use crate::engine::LinkProjector;
use crate::error;
use crate::logging::Log;
use crate::platform::Platform;
use crate::resources::artifact::ArtifactStore;

/// Shared state produced by the common command setup sequence.
///
/// Resolves the root directory, creates its layout, and loads the config
/// once so that each command does not have to repeat the boilerplate.
#[derive(Debug)]
pub struct CommandSetup {
    /// Host platform.
    pub platform: Platform,
    /// Paths under the root.
    pub layout: Layout,
    /// Loaded `config.json`.
    pub config: Config,
    /// Profile files.
    pub profiles: ProfileStore,
    /// Cached mod and library archives.
    pub artifacts: ArtifactStore,
}

impl CommandSetup {
    /// Resolve the root from the CLI/environment and load the config.
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory cannot be determined or
    /// created, or `config.json` cannot be read.
    pub fn init(global: &GlobalOpts, log: &dyn Log) -> Result<Self> {
        let platform = Platform::detect();
        let root = resolve_root(global.root.as_deref(), &platform)?;
        Self::at(&root, platform, log)
    }

    /// Load (creating on first use) the layout and config under `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout cannot be created or `config.json`
    /// cannot be read or written.
    pub fn at(root: &Path, platform: Platform, log: &dyn Log) -> Result<Self> {
        let layout = Layout::new(root);
        layout.ensure()?;
        log.debug(&format!("root: {}", layout.root().display()));

        let config = Config::load_or_create(&layout, &platform, log)?;
        log.debug(&format!("mods directory: {}", config.mods_dir.display()));

        Ok(Self {
            platform,
            profiles: ProfileStore::new(layout.profiles_dir()),
            artifacts: ArtifactStore::new(&layout),
            layout,
            config,
        })
    }

    /// Projector over the configured client mods directory.
    #[must_use]
    pub fn projector<'a>(&'a self, log: &'a dyn Log) -> LinkProjector<'a> {
        LinkProjector::new(&self.config.mods_dir, &self.artifacts, &self.profiles, log)
    }

    /// Load the selected profile.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::NoProfileSelected`](crate::error::UserError) if
    /// none is selected, or the profile store's error if it cannot be loaded.
    pub fn active_profile(&self) -> Result<Profile> {
        let name = self.config.require_selected()?;
        self.profiles.load(name)
    }

    /// Re-project the selected profile (or nothing) into the mods directory.
    ///
    /// # Errors
    ///
    /// Returns projection errors, or an error if the selected profile file
    /// cannot be loaded.
    pub fn reproject(&self, log: &dyn Log) -> Result<usize> {
        let active = match &self.config.selected_profile {
            Some(name) => Some(self.profiles.load(name)?),
            None => None,
        };
        let linked = self.projector(log).project(active.as_ref())?;
        log.info(&format!(
            "linked {linked} file(s) into {}",
            self.config.mods_dir.display()
        ));
        Ok(linked)
    }
}

/// Turn expected failures into a logged error and a clean return.
///
/// User and reconcile errors are printed; anything else propagates.
///
/// # Errors
///
/// Returns `result`'s error when it is not a reportable class.
pub fn report<T>(result: Result<T>, log: &dyn Log) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) => match error::reportable(&err) {
            Some(message) => {
                log.error(&message);
                Ok(None)
            }
            None => Err(err),
        },
    }
}
