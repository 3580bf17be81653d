//! Fixtures shared by the integration tests.
#![allow(dead_code)]

use ghostwriter::logger::Logger;
use log::Level;
use std::cell::RefCell;
use std::fs;
use std::path::Path;

/// Logger that keeps every message for later assertions.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: RefCell<Vec<(Level, String)>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<(Level, String)> {
        self.records.borrow().clone()
    }

    /// Whether any message at `level` contains `needle`.
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.records
            .borrow()
            .iter()
            .any(|(l, message)| *l == level && message.contains(needle))
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: Level, message: &str) {
        self.records.borrow_mut().push((level, message.to_string()));
    }
}

/// Writes `content` to `root/relative`, creating parent directories.
pub fn create_file(root: &Path, relative: &str, content: impl AsRef<[u8]>) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}
