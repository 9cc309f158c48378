// Shared helpers for integration tests.
//
// Provides a temporary root with a separate client mods directory, plus an
// in-memory catalog so the install pipeline can run without the network.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use modder::catalog::{
    Catalog, Project, Release, SearchHit, SideSupport, SpecialArtifactSource, VersionFile,
    VersionFilter,
};
use modder::commands::CommandSetup;
use modder::config::profiles::{Loader, Profile};
use modder::error::CatalogError;
use modder::logging::Logger;
use modder::platform::{Os, Platform};
use modder::resources::artifact::{ArtifactKey, Pool};

/// An isolated root and client directory backed by a [`tempfile::TempDir`].
pub struct IntegrationTestContext {
    /// Temporary directory holding `root/` and `client/mods/`.
    pub tmp: tempfile::TempDir,
    /// Command setup pointed at the temporary root.
    pub setup: CommandSetup,
    /// Logger with no subscriber attached.
    pub log: Logger,
}

impl IntegrationTestContext {
    /// Create a fresh root whose `mods_dir` points into the temp directory.
    pub fn new() -> Self {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let log = Logger::new(None);
        let mut setup = CommandSetup::at(&tmp.path().join("root"), Platform::new(Os::Linux), &log)
            .expect("setup root");
        setup.config.mods_dir = tmp.path().join("client").join("mods");
        setup.config.save(&setup.layout).expect("save config");
        Self { tmp, setup, log }
    }

    /// The client mods directory.
    pub fn client_mods(&self) -> PathBuf {
        self.setup.config.mods_dir.clone()
    }

    /// Save a profile with the given mods.
    pub fn profile(&self, name: &str, version: &str, loader: Loader, mods: &[&str]) -> Profile {
        let mut profile = Profile::new(name, version, loader);
        profile.mods = mods.iter().map(ToString::to_string).collect();
        self.setup.profiles.save(&profile).expect("save profile");
        profile
    }

    /// Select `name` in the config without re-projecting.
    pub fn select(&mut self, name: &str) {
        self.setup.config.selected_profile = Some(name.to_string());
        self.setup.config.save(&self.setup.layout).expect("save config");
    }

    /// Put an archive into a pool.
    pub fn cache(&self, slug: &str, version: &str, loader: Loader, pool: Pool) -> PathBuf {
        let key = ArtifactKey::new(slug, version, loader);
        self.setup
            .artifacts
            .write(&key, pool, slug.as_bytes())
            .expect("write artifact")
    }

    /// Sorted entry names in the client mods directory.
    pub fn linked(&self) -> Vec<String> {
        list_dir(&self.client_mods())
    }
}

/// Sorted entry names in `dir`, or nothing if it does not exist.
pub fn list_dir(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .map(|e| e.expect("read entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// In-memory [`Catalog`]. Downloads return the URL's bytes.
#[derive(Debug, Default)]
pub struct FakeCatalog {
    projects: HashMap<String, Project>,
    releases: HashMap<String, Vec<Release>>,
    hits: Vec<SearchHit>,
}

impl FakeCatalog {
    /// Register a client-side project with one release for `version` and `loader`.
    pub fn with_mod(mut self, slug: &str, version: &str, loader: Loader) -> Self {
        self.projects.insert(
            slug.to_string(),
            Project {
                slug: slug.to_string(),
                title: slug.to_uppercase(),
                client_side: SideSupport::Required,
                server_side: SideSupport::Optional,
            },
        );
        self.releases.entry(slug.to_string()).or_default().push(Release {
            version_number: format!("{slug}-1.0"),
            game_versions: vec![version.to_string()],
            loaders: vec![loader.as_str().to_string()],
            files: vec![VersionFile {
                url: format!("https://cdn.example/{slug}/{version}/{loader}.jar"),
                filename: format!("{slug}.jar"),
                primary: true,
            }],
        });
        self
    }

    /// Register a project the client cannot run.
    pub fn with_server_only(mut self, slug: &str) -> Self {
        self.projects.insert(
            slug.to_string(),
            Project {
                slug: slug.to_string(),
                title: slug.to_uppercase(),
                client_side: SideSupport::Unsupported,
                server_side: SideSupport::Required,
            },
        );
        self
    }
}

impl Catalog for FakeCatalog {
    fn project(&self, slug: &str) -> Result<Option<Project>, CatalogError> {
        Ok(self.projects.get(slug).cloned())
    }

    fn versions(&self, slug: &str, filter: &VersionFilter) -> Result<Vec<Release>, CatalogError> {
        let releases = self.releases.get(slug).cloned().unwrap_or_default();
        Ok(releases
            .into_iter()
            .filter(|r| {
                filter
                    .loader
                    .is_none_or(|l| r.loaders.iter().any(|x| x == l.as_str()))
                    && filter
                        .game_version
                        .as_ref()
                        .is_none_or(|v| r.game_versions.contains(v))
            })
            .collect())
    }

    fn search(&self, _query: &str) -> Result<Vec<SearchHit>, CatalogError> {
        Ok(self.hits.clone())
    }

    fn download(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
        Ok(url.as_bytes().to_vec())
    }
}

/// [`SpecialArtifactSource`] that serves a fixed archive.
#[derive(Debug, Default)]
pub struct FakeSpecial;

impl SpecialArtifactSource for FakeSpecial {
    fn fetch(&self, game_version: &str) -> Result<Vec<u8>, CatalogError> {
        Ok(format!("optifine {game_version}").into_bytes())
    }
}
