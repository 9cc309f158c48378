//! Install resolution: turn requested slugs into cached artifacts.
use anyhow::Result;
use std::fmt;

use super::projector::LinkProjector;
use crate::catalog::{Catalog, SpecialArtifactSource, resolve_release};
use crate::config::profiles::{Loader, Profile, ProfileStore};
use crate::error::{self, CatalogError};
use crate::logging::{EntryStatus, Log};
use crate::resources::artifact::{ArtifactKey, ArtifactStore, Pool};

/// Slug that bypasses the catalog.
pub const OPTIFINE: &str = "optifine";

/// Flags for one `install` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOptions {
    /// Append installed slugs to the active profile's mods.
    pub add: bool,
    /// Replace cached artifacts instead of skipping them.
    pub update: bool,
    /// Override the profile's game version.
    pub game_version: Option<String>,
    /// Override the profile's loader.
    pub loader: Option<Loader>,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            add: true,
            update: false,
            game_version: None,
            loader: None,
        }
    }
}

/// Terminal state of one slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Downloaded and stored.
    Installed,
    /// Left alone.
    Skipped(String),
    /// Could not be installed.
    Failed(String),
}

/// Result for one requested slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugOutcome {
    /// Requested slug.
    pub slug: String,
    /// What happened to it.
    pub outcome: Outcome,
}

/// Overall result of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Every slug was installed or skipped.
    Success,
    /// Some slugs failed, or the batch was cut short.
    Partial,
    /// Slugs were requested and none was installed or skipped.
    TotalFailure,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "all mods installed",
            Self::Partial => "some mods could not be installed",
            Self::TotalFailure => "no mods were installed",
        })
    }
}

/// Everything one `install` run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    /// Number of slugs asked for.
    pub requested: usize,
    /// Outcomes in request order. Shorter than `requested` when aborted.
    pub outcomes: Vec<SlugOutcome>,
    /// Whether a client-unsupported project stopped the batch.
    pub aborted: bool,
}

impl InstallReport {
    /// Slugs that were installed.
    pub fn installed(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|o| o.outcome == Outcome::Installed)
            .map(|o| o.slug.as_str())
    }

    /// `(slug, reason)` for every failure.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes.iter().filter_map(|o| match &o.outcome {
            Outcome::Failed(reason) => Some((o.slug.as_str(), reason.as_str())),
            _ => None,
        })
    }

    /// `(slug, reason)` for every skip.
    pub fn skips(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes.iter().filter_map(|o| match &o.outcome {
            Outcome::Skipped(reason) => Some((o.slug.as_str(), reason.as_str())),
            _ => None,
        })
    }

    /// Classify the batch.
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        let succeeded = self
            .outcomes
            .iter()
            .filter(|o| !matches!(o.outcome, Outcome::Failed(_)))
            .count();
        if self.requested > 0 && succeeded == 0 {
            Verdict::TotalFailure
        } else if self.aborted || self.failures().next().is_some() {
            Verdict::Partial
        } else {
            Verdict::Success
        }
    }
}

/// Game version and loader a run installs for.
struct Target<'p> {
    game_version: &'p str,
    loader: Loader,
    /// Whether the target matches the profile, so membership edits apply.
    matches_profile: bool,
}

/// Drives the per-slug install sequence against the catalog and store.
pub struct Resolver<'a> {
    catalog: &'a dyn Catalog,
    special: &'a dyn SpecialArtifactSource,
    artifacts: &'a ArtifactStore,
    profiles: &'a ProfileStore,
    projector: &'a LinkProjector<'a>,
    log: &'a dyn Log,
}

impl fmt::Debug for Resolver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("catalog", &"<dyn Catalog>")
            .field("special", &"<dyn SpecialArtifactSource>")
            .field("artifacts", &self.artifacts)
            .field("profiles", &self.profiles)
            .field("projector", &self.projector)
            .field("log", &"<dyn Log>")
            .finish()
    }
}

/// What to do about an artifact that is already cached.
enum Cached {
    Absent,
    Replace,
    Skip(&'static str),
}

impl<'a> Resolver<'a> {
    /// Create a resolver.
    #[must_use]
    pub fn new(
        catalog: &'a dyn Catalog,
        special: &'a dyn SpecialArtifactSource,
        artifacts: &'a ArtifactStore,
        profiles: &'a ProfileStore,
        projector: &'a LinkProjector<'a>,
        log: &'a dyn Log,
    ) -> Self {
        Self {
            catalog,
            special,
            artifacts,
            profiles,
            projector,
            log,
        }
    }

    /// Install `slugs` in order for `profile` (the active profile).
    ///
    /// Catalog failures are recorded per slug and the batch continues,
    /// except for a client-unsupported project, which stops it.
    ///
    /// # Errors
    ///
    /// Returns an error only for storage failures (writing an artifact or
    /// the profile file). Reconcile errors from re-projection are logged.
    pub fn install(
        &self,
        profile: &mut Profile,
        slugs: &[String],
        options: &InstallOptions,
    ) -> Result<InstallReport> {
        let game_version = options
            .game_version
            .clone()
            .unwrap_or_else(|| profile.version.clone());
        let loader = options.loader.unwrap_or(profile.loader);
        let target = Target {
            matches_profile: game_version == profile.version && loader == profile.loader,
            game_version: &game_version,
            loader,
        };

        let mut report = InstallReport {
            requested: slugs.len(),
            ..InstallReport::default()
        };

        for slug in slugs {
            self.log
                .stage(&format!("Installing {slug} ({} {})", target.game_version, target.loader));
            let outcome = match self.install_one(slug, &target, options) {
                Ok(outcome) => outcome,
                Err(SlugError::Catalog(err)) => {
                    let abort = matches!(err, CatalogError::ClientUnsupported { .. });
                    report.aborted = abort;
                    let outcome = Outcome::Failed(err.to_string());
                    self.finish(&mut report, slug, outcome);
                    if abort {
                        self.log.warn("client-unsupported project, stopping the remaining installs");
                        break;
                    }
                    continue;
                }
                Err(SlugError::Storage(err)) => return Err(err),
            };

            if options.add {
                self.add_to_profile(profile, slug, &target)?;
            }
            self.finish(&mut report, slug, outcome);
        }

        Ok(report)
    }

    fn finish(&self, report: &mut InstallReport, slug: &str, outcome: Outcome) {
        match &outcome {
            Outcome::Installed => {
                self.log.info(&format!("{slug} installed"));
                self.log.record(slug, EntryStatus::Ok, None);
            }
            Outcome::Skipped(reason) => {
                self.log.info(&format!("{slug}: {reason}"));
                self.log.record(slug, EntryStatus::Skipped, Some(reason));
            }
            Outcome::Failed(reason) => {
                self.log.error(reason);
                self.log.record(slug, EntryStatus::Failed, Some(reason));
            }
        }
        report.outcomes.push(SlugOutcome {
            slug: slug.to_string(),
            outcome,
        });
    }

    fn install_one(
        &self,
        slug: &str,
        target: &Target<'_>,
        options: &InstallOptions,
    ) -> Result<Outcome, SlugError> {
        if slug == OPTIFINE {
            return self.install_optifine(target);
        }

        let release = resolve_release(self.catalog, slug, target.game_version, target.loader)?;
        self.log.debug(&format!(
            "{}: resolved release {} ({})",
            release.title, release.version_number, release.file.filename
        ));

        let key = ArtifactKey::new(slug, target.game_version, target.loader);
        match self.check_cached(&key, options)? {
            Cached::Skip(reason) => return Ok(Outcome::Skipped(reason.to_string())),
            Cached::Replace | Cached::Absent => {}
        }

        let bytes = self.catalog.download(&release.file.url)?;
        if bytes.is_empty() {
            return Err(CatalogError::EmptyDownload {
                url: release.file.url,
            }
            .into());
        }
        let path = self.artifacts.write(&key, Pool::Mods, &bytes)?;
        self.log
            .debug(&format!("wrote {} bytes to {}", bytes.len(), path.display()));
        Ok(Outcome::Installed)
    }

    fn install_optifine(&self, target: &Target<'_>) -> Result<Outcome, SlugError> {
        if target.loader != Loader::Forge {
            return Err(CatalogError::OptifineRequiresForge.into());
        }
        let key = ArtifactKey::new(OPTIFINE, target.game_version, Loader::Forge);
        let bytes = self.special.fetch(target.game_version)?;
        if bytes.is_empty() {
            return Err(CatalogError::EmptyDownload {
                url: format!("optifine {}", target.game_version),
            }
            .into());
        }
        self.artifacts.write(&key, Pool::Mods, &bytes)?;
        Ok(Outcome::Installed)
    }

    fn check_cached(&self, key: &ArtifactKey, options: &InstallOptions) -> Result<Cached> {
        if !self.artifacts.exists(key, Pool::Mods) {
            return Ok(Cached::Absent);
        }
        if options.update {
            self.artifacts.delete(key, Pool::Mods)?;
            self.log.debug(&format!("removed cached {}", key.file_name()));
            return Ok(Cached::Replace);
        }
        if options.add {
            Ok(Cached::Skip("already installed"))
        } else {
            Ok(Cached::Skip("already installed, not added to profile"))
        }
    }

    fn add_to_profile(&self, profile: &mut Profile, slug: &str, target: &Target<'_>) -> Result<()> {
        if !target.matches_profile {
            self.log.warn(&format!(
                "{slug} was installed for {} {}, but profile '{}' uses {} {}; not adding it",
                target.game_version, target.loader, profile.name, profile.version, profile.loader
            ));
            return Ok(());
        }
        if profile.add_mod(slug) {
            self.profiles.save(profile)?;
            self.log.debug(&format!("added {slug} to profile '{}'", profile.name));
        }

        match self.projector.project(Some(profile)) {
            Ok(_) => Ok(()),
            Err(err) => match error::reportable(&err) {
                Some(message) => {
                    self.log.error(&message);
                    Ok(())
                }
                None => Err(err),
            },
        }
    }
}

/// Per-slug failure: catalog errors are recorded, storage errors abort.
enum SlugError {
    Catalog(CatalogError),
    Storage(anyhow::Error),
}

impl From<CatalogError> for SlugError {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(err)
    }
}

impl From<anyhow::Error> for SlugError {
    fn from(err: anyhow::Error) -> Self {
        Self::Storage(err)
    }
}
