//! Remote mod catalog: types, the [`Catalog`] trait, and release resolution.
//!
//! [`resolve_release`] runs the lookup sequence that turns a slug plus a
//! game version and loader into one downloadable file:
//!
//! ```text
//! project(slug)            404 → ProjectNotFound, client unsupported → ClientUnsupported
//! versions(loader)         none list the loader → LoaderUnsupported
//! versions(game version)   none list the version → VersionUnsupported
//! versions(both)           first listing both, else NoCompatibleRelease
//! files                    primary, else first, else NoFile
//! ```
mod http;
pub mod modrinth;
pub mod optifine;

use serde::Deserialize;

use crate::config::profiles::Loader;
use crate::error::CatalogError;

pub use modrinth::ModrinthClient;
pub use optifine::OptifineSource;

/// Whether a project runs on one side of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SideSupport {
    /// Needed on this side.
    Required,
    /// Works with or without.
    Optional,
    /// Does not run on this side.
    Unsupported,
    /// Anything the catalog reports that is not one of the above.
    #[serde(other)]
    Unknown,
}

impl SideSupport {
    /// Table glyph: `✓` required, `-` optional, `✗` unsupported, `?` unknown.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Required => "✓",
            Self::Optional => "-",
            Self::Unsupported => "✗",
            Self::Unknown => "?",
        }
    }
}

/// Project metadata.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Project {
    /// Canonical slug.
    pub slug: String,
    /// Display title.
    pub title: String,
    /// Client-side support.
    pub client_side: SideSupport,
    /// Server-side support.
    pub server_side: SideSupport,
}

/// One downloadable file of a release.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VersionFile {
    /// Download URL.
    pub url: String,
    /// File name on the catalog.
    pub filename: String,
    /// Whether the catalog marks this as the main file.
    #[serde(default)]
    pub primary: bool,
}

/// One release of a project, newest first in listings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    /// Release version label.
    #[serde(default)]
    pub version_number: String,
    /// Game versions the release supports.
    #[serde(default)]
    pub game_versions: Vec<String>,
    /// Loaders the release supports.
    #[serde(default)]
    pub loaders: Vec<String>,
    /// Attached files.
    #[serde(default)]
    pub files: Vec<VersionFile>,
}

impl Release {
    fn supports_loader(&self, loader: Loader) -> bool {
        self.loaders.iter().any(|l| l == loader.as_str())
    }

    fn supports_game_version(&self, version: &str) -> bool {
        self.game_versions.iter().any(|v| v == version)
    }

    /// The primary file, else the first listed one.
    #[must_use]
    pub fn preferred_file(&self) -> Option<&VersionFile> {
        self.files
            .iter()
            .find(|f| f.primary)
            .or_else(|| self.files.first())
    }
}

/// A search result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchHit {
    /// Project slug.
    pub slug: String,
    /// Display title.
    pub title: String,
    /// Author name.
    #[serde(default)]
    pub author: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Download count.
    #[serde(default)]
    pub downloads: u64,
    /// Follower count.
    #[serde(default)]
    pub follows: u64,
    /// Client-side support, if reported.
    #[serde(default)]
    pub client_side: Option<SideSupport>,
    /// Server-side support, if reported.
    #[serde(default)]
    pub server_side: Option<SideSupport>,
    /// `mod`, `modpack`, `resourcepack`, ...
    #[serde(default)]
    pub project_type: String,
}

/// Filters for a release listing. `None` fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionFilter {
    /// Only releases for this loader.
    pub loader: Option<Loader>,
    /// Only releases for this game version.
    pub game_version: Option<String>,
}

impl VersionFilter {
    /// Filter by loader only.
    #[must_use]
    pub const fn loader(loader: Loader) -> Self {
        Self {
            loader: Some(loader),
            game_version: None,
        }
    }

    /// Filter by game version only.
    #[must_use]
    pub fn game_version(version: &str) -> Self {
        Self {
            loader: None,
            game_version: Some(version.to_string()),
        }
    }

    /// Filter by both.
    #[must_use]
    pub fn both(loader: Loader, version: &str) -> Self {
        Self {
            loader: Some(loader),
            game_version: Some(version.to_string()),
        }
    }
}

/// Query interface to a remote mod catalog.
#[cfg_attr(test, mockall::automock)]
pub trait Catalog {
    /// Look up a project. `Ok(None)` when the catalog has no such slug.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Network`] or [`CatalogError::Decode`].
    fn project(&self, slug: &str) -> Result<Option<Project>, CatalogError>;

    /// List releases of `slug`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Network`] or [`CatalogError::Decode`].
    fn versions(&self, slug: &str, filter: &VersionFilter) -> Result<Vec<Release>, CatalogError>;

    /// Search for mods matching `query`, by relevance.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Network`] or [`CatalogError::Decode`].
    fn search(&self, query: &str) -> Result<Vec<SearchHit>, CatalogError>;

    /// Fetch the bytes at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Network`] if the download fails.
    fn download(&self, url: &str) -> Result<Vec<u8>, CatalogError>;
}

/// Source for archives that are not in the catalog (OptiFine).
#[cfg_attr(test, mockall::automock)]
pub trait SpecialArtifactSource {
    /// Fetch the archive for `game_version`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::SpecialArtifact`] if no archive can be located,
    /// or a network error.
    fn fetch(&self, game_version: &str) -> Result<Vec<u8>, CatalogError>;
}

/// The release and file chosen for a slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRelease {
    /// Project title, for messages.
    pub title: String,
    /// Release version label.
    pub version_number: String,
    /// The file to download.
    pub file: VersionFile,
}

/// Pick the newest release of `slug` supporting both `game_version` and
/// `loader`, and the file to download from it.
///
/// # Errors
///
/// Returns the [`CatalogError`] for the first check that fails, in the order
/// listed in the module documentation.
pub fn resolve_release(
    catalog: &dyn Catalog,
    slug: &str,
    game_version: &str,
    loader: Loader,
) -> Result<ResolvedRelease, CatalogError> {
    let project = catalog
        .project(slug)?
        .ok_or_else(|| CatalogError::ProjectNotFound {
            slug: slug.to_string(),
        })?;
    let title = project.title;

    if project.client_side == SideSupport::Unsupported {
        return Err(CatalogError::ClientUnsupported { title });
    }

    let by_loader = catalog.versions(slug, &VersionFilter::loader(loader))?;
    if !by_loader.iter().any(|r| r.supports_loader(loader)) {
        return Err(CatalogError::LoaderUnsupported {
            title,
            loader: loader.to_string(),
        });
    }

    let by_version = catalog.versions(slug, &VersionFilter::game_version(game_version))?;
    if !by_version.iter().any(|r| r.supports_game_version(game_version)) {
        return Err(CatalogError::VersionUnsupported {
            title,
            version: game_version.to_string(),
        });
    }

    let both = catalog.versions(slug, &VersionFilter::both(loader, game_version))?;
    let Some(release) = both
        .into_iter()
        .find(|r| r.supports_loader(loader) && r.supports_game_version(game_version))
    else {
        return Err(CatalogError::NoCompatibleRelease {
            title,
            version: game_version.to_string(),
            loader: loader.to_string(),
        });
    };

    let Some(file) = release.preferred_file().cloned() else {
        return Err(CatalogError::NoFile {
            title,
            version: game_version.to_string(),
        });
    };

    Ok(ResolvedRelease {
        title,
        version_number: release.version_number,
        file,
    })
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn project(slug: &str, client_side: SideSupport) -> Project {
        Project {
            slug: slug.to_string(),
            title: slug.to_uppercase(),
            client_side,
            server_side: SideSupport::Optional,
        }
    }

    pub(crate) fn release(version: &str, loader: &str, files: &[(&str, bool)]) -> Release {
        Release {
            version_number: format!("{version}-{loader}"),
            game_versions: vec![version.to_string()],
            loaders: vec![loader.to_string()],
            files: files
                .iter()
                .map(|(name, primary)| VersionFile {
                    url: format!("https://cdn.example/{name}"),
                    filename: (*name).to_string(),
                    primary: *primary,
                })
                .collect(),
        }
    }

    /// A catalog where `slug` exists and every listing returns `releases`,
    /// filtered the way the real API filters.
    pub(crate) fn catalog_with(slug: &'static str, releases: Vec<Release>) -> MockCatalog {
        let mut catalog = MockCatalog::new();
        catalog
            .expect_project()
            .returning(move |s| Ok((s == slug).then(|| project(slug, SideSupport::Required))));
        catalog.expect_versions().returning(move |_, filter| {
            Ok(releases
                .iter()
                .filter(|r| filter.loader.is_none_or(|l| r.supports_loader(l)))
                .filter(|r| {
                    filter
                        .game_version
                        .as_deref()
                        .is_none_or(|v| r.supports_game_version(v))
                })
                .cloned()
                .collect())
        });
        catalog
    }

    #[test]
    fn picks_primary_file_of_first_matching_release() {
        let catalog = catalog_with(
            "sodium",
            vec![
                release("1.20.1", "fabric", &[("extra.jar", false), ("sodium-new.jar", true)]),
                release("1.20.1", "fabric", &[("sodium-old.jar", true)]),
            ],
        );
        let resolved = resolve_release(&catalog, "sodium", "1.20.1", Loader::Fabric).unwrap();
        assert_eq!(resolved.title, "SODIUM");
        assert_eq!(resolved.file.filename, "sodium-new.jar");
    }

    #[test]
    fn falls_back_to_first_file_without_primary() {
        let catalog = catalog_with(
            "sodium",
            vec![release("1.20.1", "fabric", &[("a.jar", false), ("b.jar", false)])],
        );
        let resolved = resolve_release(&catalog, "sodium", "1.20.1", Loader::Fabric).unwrap();
        assert_eq!(resolved.file.filename, "a.jar");
    }

    #[test]
    fn missing_project_is_not_found() {
        let catalog = catalog_with("sodium", vec![]);
        let err = resolve_release(&catalog, "doesnotexistmod123", "1.20.1", Loader::Fabric)
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::ProjectNotFound {
                slug: "doesnotexistmod123".to_string()
            }
        );
    }

    #[test]
    fn server_only_project_is_client_unsupported() {
        let mut catalog = MockCatalog::new();
        catalog
            .expect_project()
            .returning(|s| Ok(Some(project(s, SideSupport::Unsupported))));
        catalog.expect_versions().never();
        let err = resolve_release(&catalog, "spark", "1.20.1", Loader::Fabric).unwrap_err();
        assert!(matches!(err, CatalogError::ClientUnsupported { .. }));
    }

    #[test]
    fn loader_checked_before_version() {
        let catalog = catalog_with("sodium", vec![release("1.19.2", "fabric", &[("a.jar", true)])]);
        let err = resolve_release(&catalog, "sodium", "1.20.1", Loader::Forge).unwrap_err();
        assert_eq!(
            err,
            CatalogError::LoaderUnsupported {
                title: "SODIUM".to_string(),
                loader: "forge".to_string()
            }
        );
    }

    #[test]
    fn unsupported_game_version() {
        let catalog = catalog_with("sodium", vec![release("1.19.2", "fabric", &[("a.jar", true)])]);
        let err = resolve_release(&catalog, "sodium", "1.20.1", Loader::Fabric).unwrap_err();
        assert!(matches!(err, CatalogError::VersionUnsupported { .. }));
    }

    #[test]
    fn loader_and_version_never_together() {
        let catalog = catalog_with(
            "create",
            vec![
                release("1.20.1", "forge", &[("a.jar", true)]),
                release("1.19.2", "fabric", &[("b.jar", true)]),
            ],
        );
        let err = resolve_release(&catalog, "create", "1.20.1", Loader::Fabric).unwrap_err();
        assert!(matches!(err, CatalogError::NoCompatibleRelease { .. }));
    }

    #[test]
    fn release_without_files() {
        let catalog = catalog_with("sodium", vec![release("1.20.1", "fabric", &[])]);
        let err = resolve_release(&catalog, "sodium", "1.20.1", Loader::Fabric).unwrap_err();
        assert!(matches!(err, CatalogError::NoFile { .. }));
    }

    #[test]
    fn network_errors_propagate() {
        let mut catalog = MockCatalog::new();
        catalog.expect_project().returning(|_| {
            Err(CatalogError::Network {
                url: "https://api.modrinth.com/v2/project/sodium".to_string(),
                message: "connection refused".to_string(),
            })
        });
        let err = resolve_release(&catalog, "sodium", "1.20.1", Loader::Fabric).unwrap_err();
        assert!(matches!(err, CatalogError::Network { .. }));
    }

    #[test]
    fn side_support_decodes_unknown_values() {
        let side: SideSupport = serde_json::from_str("\"required\"").unwrap();
        assert_eq!(side, SideSupport::Required);
        let side: SideSupport = serde_json::from_str("\"something-new\"").unwrap();
        assert_eq!(side, SideSupport::Unknown);
        assert_eq!(SideSupport::Optional.symbol(), "-");
    }
}
