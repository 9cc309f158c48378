//! Profile lifecycle commands: `switch`, `create`, and `delete`.
use anyhow::Result;

use super::CommandSetup;
use crate::config::profiles::{Loader, Profile, validate_name};
use crate::error::UserError;
use crate::logging::Log;

/// Select `name` (or nothing), persist the config, and re-project.
///
/// # Errors
///
/// Returns [`UserError::ProfileNotFound`] for an unknown profile, or an
/// error if the config cannot be written or projection fails.
pub fn switch(setup: &mut CommandSetup, name: Option<String>, log: &dyn Log) -> Result<usize> {
    if let Some(name) = &name
        && !setup.profiles.exists(name)
    {
        return Err(UserError::ProfileNotFound(name.clone()).into());
    }

    match &name {
        Some(name) => log.stage(&format!("Switching to profile '{name}'")),
        None => log.stage("Deselecting profile"),
    }
    setup.config.selected_profile = name;
    setup.config.save(&setup.layout)?;
    setup.reproject(log)
}

/// Create a profile with empty mod and library lists.
///
/// # Errors
///
/// Returns [`UserError::InvalidProfileName`] or [`UserError::ProfileExists`],
/// or an error if the profile file cannot be written. With `switch_to`, also
/// the errors of [`switch`].
pub fn create(
    setup: &mut CommandSetup,
    name: &str,
    version: &str,
    loader: Loader,
    switch_to: bool,
    log: &dyn Log,
) -> Result<Profile> {
    validate_name(name)?;
    if setup.profiles.exists(name) {
        return Err(UserError::ProfileExists(name.to_string()).into());
    }

    let profile = Profile::new(name, version, loader);
    setup.profiles.save(&profile)?;
    log.info(&format!("created profile '{name}' ({version}, {loader})"));

    if switch_to {
        switch(setup, Some(name.to_string()), log)?;
    }
    Ok(profile)
}

/// Delete a profile that is not currently selected, clear the selection,
/// and re-project, which leaves the mods directory empty.
///
/// # Errors
///
/// Returns [`UserError::ProfileInUse`] for the selected profile,
/// [`UserError::ProfileNotFound`] for an unknown one, or a filesystem or
/// projection error.
pub fn delete(setup: &mut CommandSetup, name: &str, log: &dyn Log) -> Result<()> {
    if setup.config.selected_profile.as_deref() == Some(name) {
        return Err(UserError::ProfileInUse(name.to_string()).into());
    }
    setup.profiles.delete(name)?;
    log.info(&format!("deleted profile '{name}'"));
    setup.config.selected_profile = None;
    setup.config.save(&setup.layout)?;
    setup.reproject(log)?;
    Ok(())
}
