mod common;

use assert_cmd::Command;
use common::{scca_v23, write_pf, HOUR, JAN_10_0900};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Evidence directory with A.pf (run 5 times, 2024-01-10 09:00:00) and B.pf (never run)
fn evidence() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write_pf(
        dir.path(),
        "A.pf",
        &scca_v23("A.EXE", JAN_10_0900, 5, &["\\VOLUME{01}\\WINDOWS\\SYSTEM32\\NTDLL.DLL", "C:\\Chrome\\chrome.exe"]),
    );
    write_pf(dir.path(), "B.pf", &scca_v23("B.EXE", 0, 1, &["\\VOLUME{01}\\WINDOWS\\SYSTEM32\\KERNEL32.DLL"]));
    write_pf(dir.path(), "notes.txt", b"not a prefetch file");
    dir
}

fn prefetch() -> Command {
    Command::cargo_bin("prefetch").expect("Failed to find prefetch binary")
}

#[test]
fn test_no_arguments_prints_usage() {
    prefetch()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_timeline_requires_directory() {
    prefetch()
        .arg("--timeline")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("requires -d"));
}

#[test]
fn test_export_requires_output() {
    let dir = evidence();
    prefetch()
        .arg("-d")
        .arg(dir.path())
        .arg("--export")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--output"));
}

#[test]
fn test_single_file_queries() {
    let dir = evidence();
    prefetch()
        .arg("--file")
        .arg(dir.path().join("A.pf"))
        .args(["--last-run", "--run-count", "--open-files"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Executable: A.EXE"))
        .stdout(predicate::str::contains("Last Run:   2024-01-10 09:00:00"))
        .stdout(predicate::str::contains("Run Count:  5"))
        .stdout(predicate::str::contains("  C:\\Chrome\\chrome.exe"));
}

#[test]
fn test_single_file_timezone() {
    let dir = evidence();
    prefetch()
        .arg("--file")
        .arg(dir.path().join("A.pf"))
        .args(["--last-run", "--timezone", "UTC+8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-01-10 17:00:00"));
}

#[test]
fn test_timezone_offset_is_fixed_across_seasons() {
    let dir = evidence();
    // 2024-07-10 09:00:00 UTC, 182 days after A.pf's run
    write_pf(dir.path(), "JULY.pf", &scca_v23("JULY.EXE", JAN_10_0900 + 182 * 24 * HOUR, 1, &[]));

    for (file, tz, expected) in [
        ("A.pf", "UTC+1", "2024-01-10 10:00:00"),
        ("JULY.pf", "UTC+1", "2024-07-10 10:00:00"),
        ("A.pf", "UTC-5", "2024-01-10 04:00:00"),
        ("JULY.pf", "UTC-5", "2024-07-10 04:00:00"),
    ] {
        prefetch()
            .arg("--file")
            .arg(dir.path().join(file))
            .args(["--last-run", "--timezone", tz])
            .assert()
            .success()
            .stdout(predicate::str::contains(format!("Last Run:   {}", expected)));
    }
}

#[test]
fn test_export_options_require_export() {
    let dir = evidence();
    prefetch()
        .arg("-d")
        .arg(dir.path())
        .args(["--timeline", "--format", "csv"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("only used with --export"));

    let target = dir.path().join("out.json");
    prefetch()
        .arg("--file")
        .arg(dir.path().join("A.pf"))
        .arg("--output")
        .arg(&target)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("only used with --export"));
    assert!(!target.exists());
}

#[test]
fn test_timeline_orders_by_recency() {
    let dir = evidence();
    write_pf(dir.path(), "C.pf", &scca_v23("C.EXE", JAN_10_0900 - HOUR, 2, &[]));

    let output = prefetch()
        .arg("-d")
        .arg(dir.path())
        .arg("--timeline")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("File: A.EXE"));
    assert!(lines[0].contains("Last Run: 2024-01-10 09:00:00"));
    assert!(lines[1].starts_with("File: C.EXE"));
    assert!(lines[1].contains("Last Run: 2024-01-10 08:00:00"));
    assert!(lines[2].starts_with("File: B.EXE"));
    assert!(lines[2].contains("Last Run: N/A"));
}

#[test]
fn test_search_is_case_insensitive() {
    let dir = evidence();
    prefetch()
        .arg("-d")
        .arg(dir.path())
        .args(["--search", "CHROME"])
        .assert()
        .success()
        .stdout(predicate::eq("A.EXE (matches: 1)\n  C:\\Chrome\\chrome.exe\n"));
}

#[test]
fn test_export_csv() {
    let dir = evidence();
    let out = dir.path().join("export.csv");
    prefetch()
        .arg("-d")
        .arg(dir.path())
        .args(["--export", "--format", "csv", "--output"])
        .arg(&out)
        .assert()
        .success();

    let text = fs::read_to_string(&out).unwrap();
    let mut lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines.remove(0), "executable,last_run,run_count");
    lines.sort();
    assert_eq!(lines, vec!["A.EXE,2024-01-10 09:00:00,5", "B.EXE,N/A,1"]);
}

#[test]
fn test_export_json_is_default() {
    let dir = evidence();
    let out = dir.path().join("export.json");
    prefetch()
        .arg("-d")
        .arg(dir.path())
        .args(["--export", "--output"])
        .arg(&out)
        .assert()
        .success();

    let rows = prefetch::export::read_json_export(fs::File::open(&out).unwrap()).unwrap();
    assert_eq!(rows.len(), 2);
    let a = rows.iter().find(|r| r.executable == "A.EXE").unwrap();
    assert_eq!(a.run_count, 5);
    assert_eq!(a.last_run, "2024-01-10 09:00:00");
    assert_eq!(a.files, vec!["\\VOLUME{01}\\WINDOWS\\SYSTEM32\\NTDLL.DLL", "C:\\Chrome\\chrome.exe"]);
    let b = rows.iter().find(|r| r.executable == "B.EXE").unwrap();
    assert_eq!(b.last_run, "N/A");
}

#[test]
fn test_bad_artifact_fails_fast_with_path() {
    let dir = evidence();
    write_pf(dir.path(), "BROKEN.pf", b"MAM\x04garbage");

    prefetch()
        .arg("-d")
        .arg(dir.path())
        .arg("--timeline")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("BROKEN.pf"));
}

#[test]
fn test_bad_artifact_skipped_with_continue_on_error() {
    let dir = evidence();
    write_pf(dir.path(), "BROKEN.pf", b"MAM\x04garbage");

    prefetch()
        .arg("-d")
        .arg(dir.path())
        .args(["--timeline", "--continue-on-error"])
        .assert()
        .success()
        .stdout(predicate::str::contains("File: A.EXE"))
        .stdout(predicate::str::contains("File: B.EXE"))
        .stderr(predicate::str::contains("Skipped 1"));
}

#[test]
fn test_missing_directory() {
    prefetch()
        .args(["-d", "/no/such/prefetch/dir", "--timeline"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Directory not found"));
}
