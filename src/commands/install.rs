//! Command: install mods into the cache and the selected profile.
use anyhow::Result;

use super::CommandSetup;
use crate::catalog::{Catalog, SpecialArtifactSource};
use crate::cli::InstallOpts;
use crate::engine::{InstallOptions, InstallReport, Resolver, Verdict};
use crate::logging::{Log as _, Logger};

impl From<&InstallOpts> for InstallOptions {
    fn from(opts: &InstallOpts) -> Self {
        Self {
            add: opts.add,
            update: opts.update,
            game_version: opts.game_version.clone(),
            loader: opts.loader,
        }
    }
}

/// Run the install command against the selected profile.
///
/// With no slugs, every mod already in the profile is reinstalled and
/// membership addition is forced on.
///
/// # Errors
///
/// Returns [`UserError::NoProfileSelected`](crate::error::UserError) when no
/// profile is selected, or a storage error.
pub fn run(
    setup: &CommandSetup,
    opts: &InstallOpts,
    catalog: &dyn Catalog,
    special: &dyn SpecialArtifactSource,
    log: &Logger,
) -> Result<InstallReport> {
    let mut profile = setup.active_profile()?;
    let mut options = InstallOptions::from(opts);

    let slugs = if opts.slugs.is_empty() {
        options.add = true;
        log.info(&format!(
            "reinstalling {} mod(s) from profile '{}'",
            profile.mods.len(),
            profile.name
        ));
        profile.mods.clone()
    } else {
        opts.slugs.clone()
    };

    let projector = setup.projector(log);
    let resolver = Resolver::new(
        catalog,
        special,
        &setup.artifacts,
        &setup.profiles,
        &projector,
        log,
    );
    let report = resolver.install(&mut profile, &slugs, &options)?;

    log.print_summary();
    match report.verdict() {
        Verdict::Success => log.info(&report.verdict().to_string()),
        Verdict::Partial | Verdict::TotalFailure => log.warn(&report.verdict().to_string()),
    }
    if report.aborted {
        let skipped = report.requested - report.outcomes.len();
        log.warn(&format!("{skipped} mod(s) were not attempted"));
    }
    Ok(report)
}
