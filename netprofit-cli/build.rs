use std::path::{Path, PathBuf};
use std::process::Command;

/// Short commit hash of the workspace checkout, if git can tell us.
fn git_short_sha(workspace: &Path) -> Option<String> {
    let output = Command::new("git")
        .arg("-C")
        .arg(workspace)
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let sha = String::from_utf8(output.stdout).ok()?;
    let sha = sha.trim();
    (!sha.is_empty()).then(|| sha.to_owned())
}

fn main() {
    let crate_dir = std::env::var_os("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let workspace = crate_dir.parent().unwrap_or(crate_dir.as_path());

    let sha = git_short_sha(workspace).unwrap_or_else(|| "unknown".into());
    println!("cargo:rustc-env=NETPROFIT_BUILD_SHA={sha}");
    println!("cargo:rerun-if-changed={}", workspace.join(".git/HEAD").display());
}
