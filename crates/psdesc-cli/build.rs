use std::env;
use std::process::Command;

// Stamps `--version` with the source revision. Packagers building outside a
// git checkout can set PSDESC_COMMIT / PSDESC_DATE instead.
fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=PSDESC_COMMIT");
    println!("cargo:rerun-if-env-changed=PSDESC_DATE");

    let commit = env_override("PSDESC_COMMIT")
        .or_else(|| git(&["rev-parse", "--short=10", "HEAD"]))
        .unwrap_or_else(|| "unknown".to_string());
    let date = env_override("PSDESC_DATE")
        .or_else(|| git(&["log", "-1", "--format=%cs"]))
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=PSDESC_BUILD_COMMIT={commit}");
    println!("cargo:rustc-env=PSDESC_BUILD_DATE={date}");
}

fn env_override(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!value.is_empty()).then_some(value)
}
