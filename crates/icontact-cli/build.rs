//! Build script that stamps the binary with a version string.
//!
//! The result is exported as `ICONTACT_VERSION` and shows up in `--version`
//! and in the User-Agent sent to the API.

use std::path::Path;
use std::process::Command;

/// The repository root, two levels above this crate.
const GIT_DIR: &str = "../../.git";

fn main() {
    // Rebuild when a commit or checkout moves HEAD
    if Path::new(GIT_DIR).exists() {
        println!("cargo:rerun-if-changed={GIT_DIR}/HEAD");
        println!("cargo:rerun-if-changed={GIT_DIR}/refs/");
    }

    // Source tarballs have no git metadata, so fall back to the package version
    let version = describe_checkout().unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=ICONTACT_VERSION={version}");
}

fn describe_checkout() -> Option<String> {
    // --dirty appends "-dirty" when the working tree has local edits
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let described = String::from_utf8(output.stdout).ok()?;
    let described = described.trim();

    if described.is_empty() {
        return None;
    }

    // Release tags are "v1.2.3"; report "1.2.3"
    Some(described.strip_prefix('v').unwrap_or(described).to_string())
}
