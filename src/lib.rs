//! Profile-based Minecraft mod manager.
//!
//! Mod archives are downloaded once into a shared cache and the client's
//! `mods` directory is rebuilt as symlinks to whatever the selected profile
//! needs.
//!
//! - **[`config`]**: the root layout, `config.json`, and profile files
//! - **[`catalog`]**: the Modrinth client and the OptiFine mirror scraper
//! - **[`resources`]**: the artifact cache and idempotent link primitives
//! - **[`engine`]**: link projection and install resolution
//! - **[`commands`]**: top-level subcommand orchestration
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod platform;
pub mod resources;
