#![allow(dead_code)]

pub mod builder;

use std::path::PathBuf;

pub fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

pub fn golden_dir(case: &str) -> PathBuf {
    repo_root().join("tests").join("golden").join(case)
}
