//! End-to-end tests for the `lfind` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn lfind() -> Command {
    Command::cargo_bin("lfind").unwrap()
}

fn temp_input(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file
}

#[test]
fn test_info_reports_backend() {
    lfind()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("Backend:"))
        .stdout(predicate::str::contains("lfind8 stride:   16"))
        .stdout(predicate::str::contains("lfind32 stride:  16"));
}

#[test]
fn test_find_byte_from_stdin() {
    lfind()
        .args(["find", "--key", "5"])
        .write_stdin(vec![1u8, 3, 5, 7, 9, 11, 13, 15])
        .assert()
        .success()
        .stdout("found\n");

    lfind()
        .args(["find", "--key", "2"])
        .write_stdin(vec![1u8, 3, 5, 7, 9, 11, 13, 15])
        .assert()
        .code(1)
        .stdout("not found\n");
}

#[test]
fn test_find_le_from_file() {
    let file = temp_input(&[10, 30, 50, 70, 90, 110, 130, 150]);
    let path = file.path().to_str().unwrap();

    lfind()
        .args(["find", "--le", "--key", "25", "--input", path])
        .assert()
        .success()
        .stdout("found\n");

    lfind()
        .args(["find", "--le", "--key", "5", "--input", path])
        .assert()
        .code(1)
        .stdout("not found\n");
}

#[test]
fn test_find_words() {
    let mut bytes = Vec::new();
    for word in [0u32, 0xFFFF_FFFF, 1, 0xFFFF_FFFE] {
        bytes.extend_from_slice(&word.to_le_bytes());
    }
    let file = temp_input(&bytes);
    let path = file.path().to_str().unwrap();

    lfind()
        .args(["find", "--width", "32", "--key", "4294967295", "--input", path])
        .assert()
        .success()
        .stdout("found\n");

    lfind()
        .args(["find", "--width", "32", "--key", "2", "--input", path])
        .assert()
        .code(1);
}

#[test]
fn test_find_rejects_bad_input() {
    let file = temp_input(&[1, 2, 3, 4, 5]);
    lfind()
        .args(["find", "--width", "32", "--key", "1"])
        .arg("--input")
        .arg(file.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not a multiple of the 4-byte element width"));

    lfind()
        .args(["find", "--key", "256"])
        .write_stdin(vec![0u8])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("does not fit in 8 bits"));

    lfind()
        .args(["find", "--width", "32", "--le", "--key", "1"])
        .write_stdin(vec![0u8; 4])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--le is only supported"));
}

#[test]
fn test_verify_with_small_config() {
    let config = temp_input(br#"{"verify": {"sampled_len": 4096, "sampled_keys_u32": 20}}"#);
    lfind()
        .arg("--config")
        .arg(config.path())
        .arg("verify")
        .assert()
        .success()
        .stdout(predicate::str::contains("scenarios"))
        .stdout(predicate::str::contains("stride-sweep"))
        .stdout(predicate::str::contains("(100.00%)"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = temp_input(br#"{"bench": {"iterations": 0}}"#);
    lfind()
        .arg("--config")
        .arg(config.path())
        .arg("info")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("iterations"));
}

#[test]
fn test_find_missing_file_is_error_not_miss() {
    lfind()
        .args(["find", "--key", "1", "--input", "/nonexistent/lfind-input.bin"])
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains("Failed to read input file"));
}

#[test]
fn test_bench_config_with_few_iterations() {
    let config = temp_input(br#"{"bench": {"iterations": 50, "sizes": [1000]}}"#);
    lfind()
        .arg("--quiet")
        .arg("--config")
        .arg(config.path())
        .arg("bench")
        .assert()
        .success()
        .stdout(predicate::str::contains("50 keys per size"))
        .stdout(predicate::str::contains("Passed 2/2"));
}

#[test]
fn test_bench_json_to_file() {
    let out = NamedTempFile::new().unwrap();
    lfind()
        .args(["--quiet", "bench", "--json", "--sizes", "256,4096", "--iterations", "20"])
        .arg("--output")
        .arg(out.path())
        .assert()
        .success();

    let text = std::fs::read_to_string(out.path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    let results = json["benchmark"]["results"].as_array().unwrap();
    assert_eq!(results.len(), 4);
    assert_eq!(results[0]["driver"], "lfind8");
    assert_eq!(json["worst_case"]["agreed"], true);
}

#[test]
fn test_bench_table() {
    lfind()
        .args(["--quiet", "bench", "--sizes", "1000", "--iterations", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lfind8_small"))
        .stdout(predicate::str::contains("PASS"))
        .stdout(predicate::str::contains("Worst case"));
}
