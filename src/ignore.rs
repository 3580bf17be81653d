//! Path exclusion for ghostwriter templates.
//! This module processes .gwignore files to exclude specific paths from
//! rendering. Each non-empty line is a regular expression fragment; all
//! fragments are joined into one unanchored alternation, so a path is
//! excluded when any fragment matches anywhere inside it.

use crate::constants::IGNORE_FILE;
use crate::error::{Error, Result};
use crate::logger::Logger;
use regex::Regex;
use std::{fs::read_to_string, io::ErrorKind, path::Path};

/// Compiled set of exclusion patterns.
#[derive(Debug, Clone)]
pub struct IgnoreSet {
    regex: Option<Regex>,
}

impl IgnoreSet {
    /// Compiles the ignore file contents together with the protected names.
    ///
    /// # Arguments
    /// * `contents` - Raw ignore file contents, `None` when there is no file
    /// * `protected` - File names that are always excluded; they are matched
    ///   literally
    ///
    /// # Errors
    /// Returns the `regex::Error` of the first invalid fragment.
    pub fn build(
        contents: Option<&str>,
        protected: &[&str],
    ) -> std::result::Result<Self, regex::Error> {
        let mut fragments: Vec<String> = contents
            .unwrap_or_default()
            .lines()
            .filter(|line| !line.is_empty())
            .map(|line| {
                // Compile alone first so the error points at the bad line
                Regex::new(line).map(|_| format!("(?:{line})"))
            })
            .collect::<std::result::Result<_, _>>()?;

        fragments.extend(protected.iter().map(|name| regex::escape(name)));

        // An empty alternation would match every path
        let regex = if fragments.is_empty() {
            None
        } else {
            Some(Regex::new(&fragments.join("|"))?)
        };

        Ok(Self { regex })
    }

    /// Whether `path` contains a match for any fragment.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.as_ref().is_some_and(|regex| regex.is_match(path))
    }
}

/// Reads the ignore file at `ignore_path` and compiles it.
///
/// The ignore file's own name is always protected. A missing file is not
/// an error; it only means there are no user-defined exclusions.
///
/// # Example
/// ```ignore
/// # Contents of .gwignore:
/// \.md$
/// ^docs/
/// secret
/// ```
pub fn parse_ignore_file<P: AsRef<Path>>(
    ignore_path: P,
    logger: &dyn Logger,
) -> Result<IgnoreSet> {
    let ignore_path = ignore_path.as_ref();
    let file_name = ignore_path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(IGNORE_FILE);

    let contents = match read_to_string(ignore_path) {
        Ok(contents) => Some(contents),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            logger.info(&format!(
                "{} does not exist, no paths are ignored",
                ignore_path.display()
            ));
            None
        }
        Err(source) => {
            return Err(Error::EntryError {
                path: ignore_path.to_path_buf(),
                source,
            })
        }
    };

    IgnoreSet::build(contents.as_deref(), &[file_name]).map_err(|source| {
        Error::IgnorePatternError {
            path: ignore_path.to_path_buf(),
            source,
        }
    })
}
