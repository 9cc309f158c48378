//! Build script: embeds the version string (from `MODDER_VERSION` or `git describe`).

use std::process::Command;

fn main() {
    // MODDER_VERSION wins (release builds set it); local builds fall back to git describe.
    if let Ok(version) = std::env::var("MODDER_VERSION") {
        println!("cargo:rustc-env=MODDER_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !version.is_empty() {
            println!("cargo:rustc-env=MODDER_VERSION={version}");
        }
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
    println!("cargo:rerun-if-env-changed=MODDER_VERSION");
}
