#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for `create`, `switch`, and `delete`.

mod common;

use common::*;
use modder::commands::{CommandSetup, profile};
use modder::config::profiles::Loader;
use modder::error::UserError;
use modder::platform::{Os, Platform};
use modder::resources::artifact::Pool;

#[test]
fn create_twice_leaves_first_file_untouched() {
    let mut ctx = IntegrationTestContext::new();
    profile::create(&mut ctx.setup, "demo", "1.20.1", Loader::Fabric, false, &ctx.log).unwrap();
    let path = ctx.setup.profiles.dir().join("demo.json");
    let before = std::fs::read_to_string(&path).unwrap();

    let err = profile::create(&mut ctx.setup, "demo", "1.20.1", Loader::Fabric, false, &ctx.log)
        .unwrap_err();

    assert_eq!(
        err.downcast_ref::<UserError>(),
        Some(&UserError::ProfileExists("demo".into()))
    );
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn profile_file_uses_documented_shape() {
    let mut ctx = IntegrationTestContext::new();
    profile::create(&mut ctx.setup, "demo", "1.20.1", Loader::NeoForge, false, &ctx.log).unwrap();
    let raw = std::fs::read_to_string(ctx.setup.profiles.dir().join("demo.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["version"], "1.20.1");
    assert_eq!(value["loader"], "neoforge");
    assert_eq!(value["mods"], serde_json::json!([]));
    assert_eq!(value["libs"], serde_json::json!([]));
    assert!(value.get("fork").is_none());
}

#[test]
fn switch_persists_selection_across_setups() {
    let mut ctx = IntegrationTestContext::new();
    profile::create(&mut ctx.setup, "demo", "1.20.1", Loader::Fabric, false, &ctx.log).unwrap();
    profile::switch(&mut ctx.setup, Some("demo".into()), &ctx.log).unwrap();

    let reloaded = CommandSetup::at(
        ctx.setup.layout.root(),
        Platform::new(Os::Linux),
        &ctx.log,
    )
    .unwrap();
    assert_eq!(reloaded.config.selected_profile.as_deref(), Some("demo"));
    assert_eq!(reloaded.config.mods_dir, ctx.client_mods());
}

#[test]
fn switch_to_nothing_empties_mods_dir() {
    let mut ctx = IntegrationTestContext::new();
    ctx.profile("demo", "1.20.1", Loader::Fabric, &["sodium"]);
    ctx.cache("sodium", "1.20.1", Loader::Fabric, Pool::Mods);
    profile::switch(&mut ctx.setup, Some("demo".into()), &ctx.log).unwrap();
    assert_eq!(ctx.linked(), vec!["sodium-1.20.1-fabric.jar"]);

    profile::switch(&mut ctx.setup, None, &ctx.log).unwrap();
    assert!(ctx.linked().is_empty());
}

#[test]
fn switch_replaces_previous_profile_links() {
    let mut ctx = IntegrationTestContext::new();
    ctx.profile("a", "1.20.1", Loader::Fabric, &["sodium"]);
    ctx.profile("b", "1.20.1", Loader::Fabric, &["lithium"]);
    ctx.cache("sodium", "1.20.1", Loader::Fabric, Pool::Mods);
    ctx.cache("lithium", "1.20.1", Loader::Fabric, Pool::Mods);

    profile::switch(&mut ctx.setup, Some("a".into()), &ctx.log).unwrap();
    profile::switch(&mut ctx.setup, Some("b".into()), &ctx.log).unwrap();

    assert_eq!(ctx.linked(), vec!["lithium-1.20.1-fabric.jar"]);
}

#[test]
fn delete_deselects_and_clears_links() {
    let mut ctx = IntegrationTestContext::new();
    ctx.profile("a", "1.20.1", Loader::Fabric, &["sodium"]);
    ctx.profile("b", "1.20.1", Loader::Fabric, &[]);
    ctx.cache("sodium", "1.20.1", Loader::Fabric, Pool::Mods);
    profile::switch(&mut ctx.setup, Some("a".into()), &ctx.log).unwrap();

    assert_eq!(ctx.linked(), vec!["sodium-1.20.1-fabric.jar"]);

    profile::delete(&mut ctx.setup, "b", &ctx.log).unwrap();

    assert_eq!(ctx.setup.profiles.list_names().unwrap(), vec!["a"]);
    assert!(ctx.linked().is_empty());
    let reloaded = CommandSetup::at(
        ctx.setup.layout.root(),
        Platform::new(Os::Linux),
        &ctx.log,
    )
    .unwrap();
    assert_eq!(reloaded.config.selected_profile, None);
}
