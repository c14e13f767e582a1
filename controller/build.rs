//! Build script for marathonctl
//! Embeds the commit and build time shown by `--version-info`

use chrono::Utc;
use std::process::Command;

fn git_hash() -> Option<String> {
    // Source tarballs have no .git; let packagers pass the commit in
    if let Ok(hash) = std::env::var("MARATHONCTL_GIT_HASH") {
        return Some(hash);
    }

    Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn main() {
    let git_hash = git_hash().unwrap_or_else(|| "unknown".to_string());
    let build_time = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();

    println!("cargo:rustc-env=GIT_HASH={}", git_hash);
    println!("cargo:rustc-env=BUILD_TIME={}", build_time);

    println!("cargo:rerun-if-env-changed=MARATHONCTL_GIT_HASH");
    println!("cargo:rerun-if-changed=../.git/HEAD");
}
