//! Commands that edit or inspect mod membership: `remove`, `refresh`,
//! `clean`, and `using`.
use anyhow::Result;
use std::collections::HashSet;

use super::CommandSetup;
use crate::logging::Log;
use crate::resources::artifact::{ArtifactKey, Pool};

/// Drop `slugs` from the selected profile's mods and libs, then re-project.
///
/// Cached artifacts are kept until `clean`. Returns the slugs that were
/// actually present.
///
/// # Errors
///
/// Returns a user error when no profile is selected, or a storage or
/// projection error.
pub fn remove(setup: &CommandSetup, slugs: &[String], log: &dyn Log) -> Result<Vec<String>> {
    let mut profile = setup.active_profile()?;
    let mut removed = Vec::new();
    for slug in slugs {
        if profile.remove_slug(slug) {
            log.info(&format!("removed {slug} from '{}'", profile.name));
            removed.push(slug.clone());
        } else {
            log.warn(&format!("{slug} is not in profile '{}'", profile.name));
        }
    }
    if !removed.is_empty() {
        setup.profiles.save(&profile)?;
    }
    setup.projector(log).project(Some(&profile))?;
    Ok(removed)
}

/// Re-project the selected profile.
///
/// # Errors
///
/// Returns a user error when no profile is selected, or a projection error.
pub fn refresh(setup: &CommandSetup, log: &dyn Log) -> Result<usize> {
    let profile = setup.active_profile()?;
    log.stage(&format!("Linking profile '{}'", profile.name));
    let linked = setup.projector(log).project(Some(&profile))?;
    log.info(&format!("linked {linked} file(s)"));
    Ok(linked)
}

/// What `clean` deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanReport {
    /// Mods removed from the cache.
    pub mods: usize,
    /// Libraries removed from the cache.
    pub libs: usize,
}

/// Delete every cached artifact that no profile references under that
/// profile's game version and loader.
///
/// Artifacts are matched by file name, so archives whose names do not parse
/// are removed too.
///
/// # Errors
///
/// Returns an error if a profile or a pool directory cannot be read, or a
/// file cannot be removed.
pub fn clean(setup: &CommandSetup, log: &dyn Log) -> Result<CleanReport> {
    let profiles = setup.profiles.load_all()?;
    let mut report = CleanReport::default();

    for pool in [Pool::Mods, Pool::Libs] {
        let referenced: HashSet<String> = profiles
            .iter()
            .flat_map(|p| {
                let slugs = match pool {
                    Pool::Mods => &p.mods,
                    Pool::Libs => &p.libs,
                };
                slugs
                    .iter()
                    .map(|s| ArtifactKey::new(s.as_str(), p.version.as_str(), p.loader).file_name())
            })
            .collect();

        let mut removed = 0;
        for file in setup.artifacts.list_files(pool)? {
            if referenced.contains(&file) {
                continue;
            }
            if setup.artifacts.delete_file(pool, &file)? {
                log.debug(&format!("removed {pool}/{file}"));
                removed += 1;
            }
        }
        log.info(&removed_message(removed, pool));
        match pool {
            Pool::Mods => report.mods = removed,
            Pool::Libs => report.libs = removed,
        }
    }
    Ok(report)
}

fn removed_message(count: usize, pool: Pool) -> String {
    let noun = pool.label().to_lowercase();
    if count == 1 {
        format!("Removed 1 {noun}")
    } else {
        format!("Removed {count} {noun}s")
    }
}

/// Names of the profiles whose mods or libs contain `slug`, sorted.
///
/// # Errors
///
/// Returns an error if a profile cannot be read.
pub fn using(setup: &CommandSetup, slug: &str, log: &dyn Log) -> Result<Vec<String>> {
    let names: Vec<String> = setup
        .profiles
        .load_all()?
        .into_iter()
        .filter(|p| p.uses(slug))
        .map(|p| p.name)
        .collect();
    if names.is_empty() {
        log.info(&format!("no profile uses {slug}"));
    }
    for name in &names {
        log.info(name);
    }
    Ok(names)
}
