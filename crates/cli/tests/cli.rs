//! Runs the `cronscan` binary against crontab fixtures.

use std::path::Path;
use std::process::{Command, Output};

const CRONTAB: &str = "\
SHELL=/bin/sh
0 9 * * 1-5 /usr/bin/standup
*/30 * * * * /usr/bin/poll; /usr/bin/flush
0 0 L * * /usr/bin/broken
";

fn cronscan(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cronscan"))
        .args(args)
        .current_dir(dir)
        .env("CRONSCAN_CONFIG", dir.join("no-config.toml"))
        .env_remove("CRONSCAN_FORMAT")
        .env_remove("CRONSCAN_USER_COLUMN")
        .env_remove("CRONSCAN_FILE")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn fixture() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("jobs.cron"), CRONTAB).unwrap();
    dir
}

#[test]
fn json_to_stdout() {
    let dir = fixture();
    let out = cronscan(
        dir.path(),
        &["-f", "jobs.cron", "-s", "2025-09-01T08:00", "-t", "2h", "-F", "json", "-o", "-"],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let records: Vec<serde_json::Value> = serde_json::from_slice(&out.stdout).unwrap();
    // 08:00 08:30 09:00 09:30 for poll and flush, plus standup at 09:00
    assert_eq!(records.len(), 9);
    assert_eq!(records[0]["run_at"], "2025-09-01T08:00:00");
    assert_eq!(records[0]["command"], "/usr/bin/poll");
    assert_eq!(records[1]["command"], "/usr/bin/flush");

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Found 9 cron jobs scheduled in the specified time range."));
    assert!(stderr.contains("Skipping crontab line"));
}

#[test]
fn default_output_file_is_named_after_window() {
    let dir = fixture();
    let out = cronscan(
        dir.path(),
        &["-f", "jobs.cron", "-s", "2025-09-01", "-e", "2025-09-02", "--next-only"],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let name = "cron_scan_20250901_0000_to_20250902_0000.csv";
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains(&format!("Output written to: {name}")));

    let csv = std::fs::read_to_string(dir.path().join(name)).unwrap();
    // header plus one row per entry
    assert_eq!(csv.lines().count(), 4);
    assert!(csv.starts_with("schedule,description,command"));
}

#[test]
fn listing_ignores_window() {
    let dir = fixture();
    let out = cronscan(dir.path(), &["-f", "jobs.cron", "--list", "-F", "md", "-o", "-"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.lines().count(), 5);
    assert!(stdout.contains("| 0 9 * * 1-5 | At 09:00 on Monday through Friday | /usr/bin/standup |"));
}

#[test]
fn bad_arguments_fail() {
    let dir = fixture();
    let out = cronscan(dir.path(), &["-f", "jobs.cron", "-t", "30m15"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("invalid time span"));

    let out = cronscan(dir.path(), &["-f", "missing.cron"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("failed to read crontab"));
}

#[test]
fn binary_formats_need_a_file() {
    let dir = fixture();
    let out = cronscan(dir.path(), &["-f", "jobs.cron", "-F", "pdf", "-o", "-"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("pdf output needs a file path"));

    let out = cronscan(
        dir.path(),
        &["-f", "jobs.cron", "-s", "2025-09-01", "-F", "xlsx", "-o", "reports/jobs"],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let bytes = std::fs::read(dir.path().join("reports/jobs.xlsx")).unwrap();
    assert!(bytes.starts_with(b"PK"));
}
