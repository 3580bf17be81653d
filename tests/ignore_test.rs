mod common;

use common::MemoryLogger;
use ghostwriter::constants::IGNORE_FILE;
use ghostwriter::error::Error;
use ghostwriter::ignore::parse_ignore_file;
use log::Level;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_missing_ignore_file_is_not_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let logger = MemoryLogger::new();

    let ignored = parse_ignore_file(temp_dir.path().join(IGNORE_FILE), &logger).unwrap();

    assert!(ignored.is_match(".gwignore"));
    assert!(!ignored.is_match("a.txt"));
    assert!(logger.contains(Level::Info, "does not exist"));
}

#[test]
fn test_parse_ignore_file() {
    let temp_dir = TempDir::new().unwrap();
    let ignore_path = temp_dir.path().join(IGNORE_FILE);
    fs::write(&ignore_path, "\\.pyc$\n__pycache__\n\n").unwrap();

    let ignored = parse_ignore_file(&ignore_path, &MemoryLogger::new()).unwrap();

    assert!(ignored.is_match("module.pyc"));
    assert!(ignored.is_match("pkg/__pycache__/module.cpython.txt"));
    assert!(ignored.is_match(".gwignore"));
    assert!(!ignored.is_match("module.py"));
}

#[test]
fn test_invalid_pattern_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let ignore_path = temp_dir.path().join(IGNORE_FILE);
    fs::write(&ignore_path, "fine\n[unclosed\n").unwrap();

    match parse_ignore_file(&ignore_path, &MemoryLogger::new()) {
        Err(Error::IgnorePatternError { path, .. }) => assert_eq!(path, ignore_path),
        other => panic!("Expected IgnorePatternError, got {other:?}"),
    }
}
