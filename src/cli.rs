//! Command-line argument definitions.

use clap::{Parser, Subcommand};

use crate::config::profiles::Loader;

/// Top-level CLI entry point for the mod manager.
#[derive(Parser, Debug)]
#[command(
    name = "modder",
    about = "Profile-based Minecraft mod manager",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Override the working directory (default: $MODDER_HOME or the user data dir)
    #[arg(long, global = true)]
    pub root: Option<std::path::PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Install mods into the cache and add them to the selected profile
    Install(InstallOpts),
    /// Remove mods from the selected profile
    Remove(RemoveOpts),
    /// Re-link the selected profile into the mods directory
    Refresh,
    /// Delete cached mods and libraries no profile uses
    Clean,
    /// List profiles that use a mod
    Using(UsingOpts),
    /// Search the catalog
    Search(SearchOpts),
    /// Show the selected profile and cache statistics
    Status,
    /// Select a profile (or none) and link it
    Switch(SwitchOpts),
    /// Create a profile
    Create(CreateOpts),
    /// Delete a profile
    Delete(DeleteOpts),
    /// Print shell completions
    Completions(CompletionsOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Subcommand name, used to name the log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Install(_) => "install",
            Self::Remove(_) => "remove",
            Self::Refresh => "refresh",
            Self::Clean => "clean",
            Self::Using(_) => "using",
            Self::Search(_) => "search",
            Self::Status => "status",
            Self::Switch(_) => "switch",
            Self::Create(_) => "create",
            Self::Delete(_) => "delete",
            Self::Completions(_) => "completions",
            Self::Version => "version",
        }
    }
}

/// Options for the `install` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct InstallOpts {
    /// Mod slugs; with none, reinstall every mod in the selected profile
    pub slugs: Vec<String>,

    /// Do not add installed mods to the selected profile
    #[arg(short = 'a', long = "no-add", action = clap::ArgAction::SetFalse)]
    pub add: bool,

    /// Re-download mods that are already cached
    #[arg(short, long)]
    pub update: bool,

    /// Install for this game version instead of the profile's
    #[arg(short, long)]
    pub game_version: Option<String>,

    /// Install for this loader instead of the profile's
    #[arg(short, long, value_enum)]
    pub loader: Option<Loader>,
}

/// Options for the `remove` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct RemoveOpts {
    /// Mod or library slugs
    #[arg(required = true)]
    pub slugs: Vec<String>,
}

/// Options for the `using` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct UsingOpts {
    /// Mod or library slug
    pub slug: String,
}

/// Options for the `search` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct SearchOpts {
    /// Search terms
    pub query: String,
}

/// Options for the `switch` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct SwitchOpts {
    /// Profile to select; omit to deselect
    pub profile: Option<String>,
}

/// Options for the `create` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CreateOpts {
    /// Profile name
    pub profile: String,
    /// Game version, e.g. 1.20.1
    pub version: String,
    /// Mod loader
    #[arg(value_enum)]
    pub loader: Loader,
    /// Select the new profile
    #[arg(short, long)]
    pub switch: bool,
}

/// Options for the `delete` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct DeleteOpts {
    /// Profile name
    pub profile: String,
}

/// Options for the `completions` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CompletionsOpts {
    /// Target shell
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
