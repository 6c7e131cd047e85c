use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::{self, File};
use tempfile::tempdir;

#[test]
fn combine_rejects_copy_and_move_together() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out");

    Command::cargo_bin("combine")
        .unwrap()
        .arg(dir.path())
        .arg(&out)
        .args(["--copy", "--move"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "at most one of [--copy,--move] may be given",
        ));
    assert!(!out.exists());
}

#[test]
fn combine_missing_input_fails_without_output() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out");

    Command::cargo_bin("combine")
        .unwrap()
        .arg(dir.path().join("missing"))
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
    assert!(!out.exists());
}

#[test]
fn divide_dry_run_prints_plan() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in");
    fs::create_dir_all(&input).unwrap();
    for name in ["a", "b", "c"] {
        File::create(input.join(name)).unwrap();
    }
    let out = dir.path().join("out");

    let assert = Command::cargo_bin("divide")
        .unwrap()
        .args(["--size", "2"])
        .arg(&input)
        .arg(&out)
        .args(["-n", "-v"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "DRY RUN");
    assert!(lines[3].ends_with(&format!("{} -> {}", "c", out.join("1").join("c").display())));
    assert!(!out.exists());
}

#[test]
fn divide_requires_size_or_into() {
    let dir = tempdir().unwrap();

    Command::cargo_bin("divide")
        .unwrap()
        .arg(dir.path())
        .arg(dir.path().join("out"))
        .assert()
        .failure();

    Command::cargo_bin("divide")
        .unwrap()
        .args(["--size", "2", "--into", "3"])
        .arg(dir.path())
        .arg(dir.path().join("out"))
        .assert()
        .failure();
}

#[test]
fn divide_zero_size_is_a_usage_error() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out");

    Command::cargo_bin("divide")
        .unwrap()
        .args(["--size", "0"])
        .arg(dir.path())
        .arg(&out)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--size must be greater than zero"));
    assert!(!out.exists());
}

#[cfg(unix)]
#[test]
fn divide_into_links_files() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in");
    fs::create_dir_all(&input).unwrap();
    for name in ["a", "b", "c", "d"] {
        File::create(input.join(name)).unwrap();
    }
    let out = dir.path().join("out");

    Command::cargo_bin("divide")
        .unwrap()
        .args(["--into", "2"])
        .arg(&input)
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(fs::symlink_metadata(out.join("0/a")).unwrap().file_type().is_symlink());
    assert!(fs::symlink_metadata(out.join("1/d")).unwrap().file_type().is_symlink());
}

#[cfg(unix)]
#[test]
fn copy_onto_occupied_destination_reports_failure_and_continues() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in");
    fs::create_dir_all(input.join("a")).unwrap();
    fs::write(input.join("a/good"), "ok").unwrap();
    let out = dir.path().join("out");
    // a directory squatting on the destination name makes the copy fail
    fs::create_dir_all(out.join("bad")).unwrap();
    fs::write(input.join("a/bad"), "x").unwrap();

    Command::cargo_bin("combine")
        .unwrap()
        .arg(&input)
        .arg(&out)
        .arg("--copy")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("1 of 2 transfers failed"));

    assert_eq!(fs::read_to_string(out.join("good")).unwrap(), "ok");
}

#[test]
fn combine_into_own_input_keeps_top_level_files() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in");
    fs::create_dir_all(input.join("a")).unwrap();
    fs::write(input.join("keep.txt"), "precious").unwrap();

    for extra in [None, Some("--copy")] {
        Command::cargo_bin("combine")
            .unwrap()
            .arg(&input)
            .arg(&input)
            .arg("--include-files")
            .args(extra)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("is the input directory"));
        assert_eq!(fs::read_to_string(input.join("keep.txt")).unwrap(), "precious");
    }
}
