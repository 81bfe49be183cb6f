//! Embeds the commit hash and build date for `flappy --version`.

use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

/// Short commit from `FLAPPY_BUILD_COMMIT` (release builds) or git.
fn commit() -> String {
    env::var("FLAPPY_BUILD_COMMIT").unwrap_or_else(|_| {
        Command::new("git")
            .args(["rev-parse", "--short=7", "HEAD"])
            .output()
            .ok()
            .filter(|o| o.status.success())
            .and_then(|o| String::from_utf8(o.stdout).ok())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "unknown".to_string())
    })
}

fn date() -> String {
    env::var("FLAPPY_BUILD_DATE")
        .unwrap_or_else(|_| chrono::Utc::now().format("%Y-%m-%d").to_string())
}

fn main() {
    let out_dir = env::var("OUT_DIR").expect("cargo sets OUT_DIR");
    let dest_path = Path::new(&out_dir).join("build_info.rs");

    fs::write(
        &dest_path,
        format!(
            "pub const BUILD_COMMIT: &str = {:?};\npub const BUILD_DATE: &str = {:?};\n",
            commit(),
            date()
        ),
    )
    .expect("failed to write build_info.rs");

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=FLAPPY_BUILD_COMMIT");
    println!("cargo:rerun-if-env-changed=FLAPPY_BUILD_DATE");
}
