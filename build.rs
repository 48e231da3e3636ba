//! Stamps `task-cli --version` and `github-activity --version` with build
//! provenance, e.g. `0.1.0 (3f2a9c1, built 2026-10-18T09:30:00Z)`.
//!
//! Exposed to the crate through `env!`:
//! - `DEVTRACK_GIT_COMMIT`: abbreviated commit, `-dirty` when the work tree
//!   has local changes, `unknown` outside a git checkout
//! - `DEVTRACK_BUILD_TIMESTAMP`: UTC build time, RFC 3339

use std::process::Command;

fn main() {
    for path in [".git/HEAD", ".git/index"] {
        println!("cargo:rerun-if-changed={}", path);
    }

    let commit = git_describe().unwrap_or_else(|| "unknown".to_string());
    let built = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");

    println!("cargo:rustc-env=DEVTRACK_GIT_COMMIT={}", commit);
    println!("cargo:rustc-env=DEVTRACK_BUILD_TIMESTAMP={}", built);
}

fn git_describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--always", "--dirty", "--abbrev=7"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    let described = String::from_utf8(output.stdout).ok()?;
    let described = described.trim();
    (!described.is_empty()).then(|| described.to_string())
}
