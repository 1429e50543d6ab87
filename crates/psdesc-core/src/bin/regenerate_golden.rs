use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use psdesc_core::{decode_descriptor, render_descriptor};

// Rewrites tests/golden/<case>/expected.txt from each case's input.bin.
// Run from the repository root after an intentional rendering change.
fn main() -> ExitCode {
    match run(Path::new("tests/golden")) {
        Ok(count) => {
            eprintln!("regenerated {count} golden file(s)");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
    }
}

fn run(root: &Path) -> Result<usize, String> {
    let mut cases: Vec<PathBuf> = fs::read_dir(root)
        .map_err(|err| format!("failed to read {}: {err}", root.display()))?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.join("input.bin").is_file())
        .collect();
    cases.sort();

    for case in &cases {
        let input = case.join("input.bin");
        let bytes =
            fs::read(&input).map_err(|err| format!("failed to read {}: {err}", input.display()))?;
        let descriptor = decode_descriptor(&bytes)
            .map_err(|err| format!("{} does not decode: {err}", input.display()))?;
        let output = case.join("expected.txt");
        fs::write(&output, render_descriptor(&descriptor, 0))
            .map_err(|err| format!("failed to write {}: {err}", output.display()))?;
    }
    Ok(cases.len())
}
