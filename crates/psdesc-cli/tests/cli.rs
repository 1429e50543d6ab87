use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("psdesc"))
}

fn repo_root() -> std::path::PathBuf {
    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .and_then(|p| p.parent())
        .expect("repo root")
        .to_path_buf()
}

fn golden(case: &str) -> std::path::PathBuf {
    repo_root().join("tests").join("golden").join(case)
}

fn sample_input() -> std::path::PathBuf {
    golden("all_kinds").join("input.bin")
}

#[test]
fn help_supports_render_and_dump() {
    cmd()
        .args(["descriptor", "render", "--help"])
        .assert()
        .success();
    cmd()
        .args(["descriptor", "dump", "--help"])
        .assert()
        .success();
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.bin");

    cmd()
        .args(["descriptor", "render"])
        .arg(missing)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn stdout_text_matches_golden() {
    let expected =
        std::fs::read_to_string(golden("all_kinds").join("expected.txt")).expect("expected.txt");
    cmd()
        .args(["descriptor", "render"])
        .arg(sample_input())
        .arg("--stdout")
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn stdout_json_carries_summary_and_tree() {
    let assert = cmd()
        .args(["descriptor", "render"])
        .arg(sample_input())
        .args(["--stdout", "--format", "json", "--pretty"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let value: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(value["summary"]["items"], 14);
    assert_eq!(value["summary"]["class_id"], "null");
    assert_eq!(value["descriptor"]["items"][0]["type"], "UntF");
    assert_eq!(value["descriptor"]["items"][1]["value"]["value"], 75);
}

#[test]
fn output_file_is_written() {
    let temp = TempDir::new().expect("tempdir");
    let output = temp.path().join("nested").join("all_kinds.txt");

    cmd()
        .args(["descriptor", "render"])
        .arg(sample_input())
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stderr(contains("OK: output written"));

    let written = std::fs::read_to_string(&output).expect("output file");
    assert!(written.starts_with("Descriptor [14]: null\n"));
}

#[test]
fn stdout_and_output_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let output = temp.path().join("out.txt");

    cmd()
        .args(["descriptor", "render"])
        .arg(sample_input())
        .arg("--stdout")
        .arg("-o")
        .arg(output)
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn pretty_requires_json_format() {
    cmd()
        .args(["descriptor", "render"])
        .arg(sample_input())
        .args(["--stdout", "--pretty"])
        .assert()
        .failure()
        .stderr(contains("JSON output only").and(contains("hint:")));
}

#[test]
fn quiet_suppresses_ok_message() {
    let temp = TempDir::new().expect("tempdir");
    let output = temp.path().join("out.txt");

    cmd()
        .args(["descriptor", "render"])
        .arg(sample_input())
        .arg("-o")
        .arg(output)
        .arg("--quiet")
        .assert()
        .success()
        .stderr(contains("OK:").not());
}

#[test]
fn unknown_tag_fails_with_tag_and_key() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("bad.bin");
    let mut bytes = vec![0, 0, 0, 0, 0, 0, 0, 0];
    bytes.extend_from_slice(b"null");
    bytes.extend_from_slice(&[0, 0, 0, 1, 0, 0, 0, 0]);
    bytes.extend_from_slice(b"Opctzzzz");
    std::fs::write(&input, bytes).expect("write input");

    cmd()
        .args(["descriptor", "render"])
        .arg(input)
        .arg("--stdout")
        .assert()
        .failure()
        .code(2)
        .stderr(contains("unknown OSType tag 'zzzz' in entity 'Opct'").and(contains("hint:")));
}

#[test]
fn versioned_flag_checks_version_word() {
    cmd()
        .args(["descriptor", "render"])
        .arg(sample_input())
        .args(["--stdout", "--versioned"])
        .assert()
        .failure()
        .stderr(contains("unsupported descriptor version 7"));
}

#[test]
fn depth_limit_is_reported() {
    cmd()
        .args(["descriptor", "render"])
        .arg(sample_input())
        .args(["--stdout", "--max-depth", "1"])
        .assert()
        .failure()
        .stderr(contains("exceeds limit 1").and(contains("--max-depth")));
}

#[test]
fn offset_past_end_is_rejected() {
    cmd()
        .args(["descriptor", "render"])
        .arg(sample_input())
        .args(["--stdout", "--offset", "100000"])
        .assert()
        .failure()
        .stderr(contains("beyond the end of the input"));
}

#[test]
fn unkeyed_lists_flag_reads_elements_without_keys() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("unkeyed.bin");
    let mut bytes = vec![0, 0, 0, 0, 0, 0, 0, 0];
    bytes.extend_from_slice(b"null");
    bytes.extend_from_slice(&[0, 0, 0, 1, 0, 0, 0, 0]);
    bytes.extend_from_slice(b"LsttVlLs");
    bytes.extend_from_slice(&[0, 0, 0, 1]);
    bytes.extend_from_slice(b"long");
    bytes.extend_from_slice(&7i32.to_be_bytes());
    std::fs::write(&input, bytes).expect("write input");

    cmd()
        .args(["descriptor", "render"])
        .arg(&input)
        .args(["--stdout", "--unkeyed-lists"])
        .assert()
        .success()
        .stdout(contains("    List [1]\n").and(contains("      [long] : 7\n")));

    cmd()
        .args(["descriptor", "render"])
        .arg(&input)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("stream truncated"));
}

#[test]
fn max_bytes_flag_limits_the_decoder() {
    cmd()
        .args(["descriptor", "render"])
        .arg(sample_input())
        .args(["--stdout", "--max-bytes", "20"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("exceeds byte limit 20").and(contains("--max-bytes")));

    cmd()
        .args(["descriptor", "render"])
        .arg(sample_input())
        .args(["--stdout", "--max-bytes", "565"])
        .assert()
        .success();
}
