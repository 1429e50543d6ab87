use std::fs;
use std::path::{Path, PathBuf};

#[path = "../../tests/common/builder.rs"]
mod builder;

fn main() -> Result<(), String> {
    let root = PathBuf::from("tests/golden");
    write_fixture(&root, "all_kinds", builder::all_kinds())?;
    write_fixture(&root, "nested_list", builder::nested_list())?;
    write_fixture(&root, "references", builder::references())?;
    Ok(())
}

fn write_fixture(root: &Path, case: &str, bytes: Vec<u8>) -> Result<(), String> {
    let dir = root.join(case);
    fs::create_dir_all(&dir)
        .map_err(|err| format!("failed to create {}: {}", dir.display(), err))?;
    let path = dir.join("input.bin");
    fs::write(&path, bytes).map_err(|err| format!("failed to write {}: {}", path.display(), err))
}
