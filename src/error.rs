//! Domain-specific error types for the mod manager.
//!
//! Internal modules return typed errors built with [`thiserror`]; command
//! handlers at the CLI boundary carry them inside [`anyhow::Error`] via `?`.
//!
//! # Error classes
//!
//! ```text
//! UserError      : bad selection or naming; reported, command returns cleanly
//! CatalogError   : per-slug resolution failure; recorded, batch continues
//! ReconcileError : link projection cannot complete; reported, pass aborted
//! (anyhow I/O)   : storage failure; fatal, propagated to the process boundary
//! ```

use thiserror::Error;

/// Errors caused by the user's request rather than by the system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UserError {
    /// A command needs an active profile but none is selected.
    #[error("No profile selected. Please select a profile with `modder switch <profile>`.")]
    NoProfileSelected,

    /// The named profile has no file in the profile store.
    #[error("Profile '{0}' does not exist.")]
    ProfileNotFound(String),

    /// `create` was asked for a name that is already taken.
    #[error("Profile '{0}' already exists. Did you mean to switch to it?")]
    ProfileExists(String),

    /// `delete` was asked to remove the active profile.
    #[error("Cannot delete the currently selected profile '{0}'.")]
    ProfileInUse(String),

    /// The profile name cannot be used as a file name.
    #[error("Invalid profile name '{0}': names must be non-empty, must not start with '.', and must not contain path separators")]
    InvalidProfileName(String),
}

/// Reasons a single slug could not be resolved or fetched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog has no project with this slug.
    #[error("{slug} was not found in the catalog")]
    ProjectNotFound {
        /// Requested slug.
        slug: String,
    },

    /// The project exists but is server-only.
    #[error("{title} is not available for the minecraft client")]
    ClientUnsupported {
        /// Project title.
        title: String,
    },

    /// No release of the project supports the loader.
    #[error("{title} does not support {loader}")]
    LoaderUnsupported {
        /// Project title.
        title: String,
        /// Requested loader.
        loader: String,
    },

    /// No release of the project supports the game version.
    #[error("{title} does not support {version}")]
    VersionUnsupported {
        /// Project title.
        title: String,
        /// Requested game version.
        version: String,
    },

    /// Loader and game version are each supported, but never by the same release.
    #[error("{title} has no release for {loader} {version}")]
    NoCompatibleRelease {
        /// Project title.
        title: String,
        /// Requested game version.
        version: String,
        /// Requested loader.
        loader: String,
    },

    /// The matched release lists no files.
    #[error("{title} does not have a file for {version}")]
    NoFile {
        /// Project title.
        title: String,
        /// Requested game version.
        version: String,
    },

    /// OptiFine was requested for a loader other than Forge.
    #[error("Optifine is only compatible with Forge")]
    OptifineRequiresForge,

    /// The download finished but produced zero bytes.
    #[error("download from {url} was empty")]
    EmptyDownload {
        /// Download URL.
        url: String,
    },

    /// The request could not be completed.
    #[error("request to {url} failed: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Transport or status error description.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("unexpected response from {url}: {message}")]
    Decode {
        /// Requested URL.
        url: String,
        /// Decoder error description.
        message: String,
    },

    /// The special-artifact source could not locate the archive.
    #[error("special artifact unavailable: {0}")]
    SpecialArtifact(String),
}

/// Reasons a link projection pass could not complete.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    /// An artifact declared by a profile is not in the store.
    #[error("{kind} {path} does not exist on disk")]
    MissingArtifact {
        /// `Mod` or `Lib`.
        kind: &'static str,
        /// Expected artifact path.
        path: String,
    },

    /// Fork references loop back onto a profile already being projected.
    #[error("fork cycle detected: {chain}")]
    ForkCycle {
        /// The profile chain, joined with ` -> `.
        chain: String,
    },

    /// `mods_dir` is empty in the config file.
    #[error("mods directory is not configured; set \"mods_dir\" in config.json")]
    ModsDirUnset,
}

/// Return the message to print when `err` is an expected, reportable failure.
///
/// User and reconciliation errors are reported and the command returns
/// cleanly; anything else is fatal. Works through `anyhow` context layers.
#[must_use]
pub fn reportable(err: &anyhow::Error) -> Option<String> {
    if let Some(user) = err.downcast_ref::<UserError>() {
        return Some(user.to_string());
    }
    err.downcast_ref::<ReconcileError>().map(ToString::to_string)
}
