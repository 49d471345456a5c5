//! Unit tests for the local error log.

use super::*;

#[test]
fn appends_timestamped_lines() {
    let dir = tempfile::tempdir().unwrap();
    let log = ErrorLog::new(dir.path().join("error_log.txt"));

    log.append("first failure").unwrap();
    log.append("second failure").unwrap();

    let content = std::fs::read_to_string(log.path()).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with('['));
    assert!(lines[0].ends_with("] first failure"));
    assert!(lines[1].ends_with("] second failure"));
}

#[test]
fn keeps_existing_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("error_log.txt");
    std::fs::write(&path, "[2025-01-01 00:00:00] older entry\n").unwrap();

    ErrorLog::new(&path).append("newer entry").unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("[2025-01-01 00:00:00] older entry\n"));
    assert!(content.trim_end().ends_with("newer entry"));
}

#[test]
fn flattens_multiline_messages() {
    let dir = tempfile::tempdir().unwrap();
    let log = ErrorLog::new(dir.path().join("error_log.txt"));

    log.append("draft failed\n401 Unauthorized").unwrap();

    let content = std::fs::read_to_string(log.path()).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert!(content.contains("draft failed | 401 Unauthorized"));
}

#[test]
fn record_survives_unwritable_path() {
    let dir = tempfile::tempdir().unwrap();
    // a directory cannot be opened for appending
    let log = ErrorLog::new(dir.path());
    log.record("nothing to see");
}
