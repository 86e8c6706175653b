use std::env;
use std::path::PathBuf;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=../../.git/HEAD");

    let repo_root = env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .ok()
        .and_then(|dir| dir.parent().and_then(|p| p.parent()).map(PathBuf::from));

    let git_sha = repo_root
        .and_then(|root| {
            Command::new("git")
                .arg("-C")
                .arg(root)
                .args(["rev-parse", "--short", "HEAD"])
                .output()
                .ok()
        })
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".into());

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
    let target = env::var("TARGET").unwrap_or_else(|_| "unknown".into());

    println!("cargo:rustc-env=SPIDEY_BUILD_GIT_SHA={git_sha}");
    println!("cargo:rustc-env=SPIDEY_BUILD_TIMESTAMP={timestamp}");
    println!("cargo:rustc-env=SPIDEY_BUILD_TARGET={target}");
}
