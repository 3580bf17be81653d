//! Template discovery.
//! Walks the input root depth-first, prunes `.git` and the output root at
//! the directory level, and collects every remaining regular file that is
//! neither the configuration file nor matched by the ignore file.

use crate::constants::GIT_DIR;
use crate::error::{Error, Result};
use crate::ignore::parse_ignore_file;
use crate::logger::Logger;
use std::fs::{self, Metadata};
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// One discovered template file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileEntry {
    /// Path relative to the input root, always `/`-separated
    pub relative_path: String,
    /// Permission bits of the template, e.g. `0o755`
    pub permission_bits: u32,
}

/// Parameters of a discovery run.
#[derive(Debug, Clone)]
pub struct DiscoverOptions<'a> {
    /// Directory to walk
    pub root: &'a Path,
    /// Output root; never descended into when it lives under `root`
    pub output_root: &'a Path,
    /// Configuration file; files with the same base name are skipped
    pub config_file: &'a Path,
    /// Name of the ignore file, read from `root`
    pub ignore_file_name: &'a str,
    /// Whether to descend into subdirectories at all
    pub recursive: bool,
}

/// Discovers the template files under `options.root`.
///
/// # Returns
/// * `Result<Vec<FileEntry>>` - Entries in traversal order (sorted by file
///   name within each directory)
///
/// # Errors
/// * `Error::IgnorePatternError` if the ignore file has an invalid pattern
/// * `Error::DiscoveryError` / `Error::EntryError` if any entry cannot be read
pub fn discover(options: &DiscoverOptions<'_>, logger: &dyn Logger) -> Result<Vec<FileEntry>> {
    let root = options.root;
    let ignored = parse_ignore_file(root.join(options.ignore_file_name), logger)?;
    let config_name = options.config_file.file_name();

    // Only an existing output root can be descended into
    let output_root = options.output_root.canonicalize().ok();
    let is_output_root = |entry: &DirEntry| match &output_root {
        Some(output_root) => entry
            .path()
            .canonicalize()
            .is_ok_and(|path| &path == output_root),
        None => false,
    };

    let mut walker = WalkDir::new(root).sort_by_file_name();
    if !options.recursive {
        walker = walker.max_depth(1);
    }

    let mut entries = Vec::new();
    let walker = walker.into_iter().filter_entry(|entry| {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }
        if entry.file_name() == GIT_DIR || is_output_root(entry) {
            logger.debug(&format!("Pruning directory {}", entry.path().display()));
            return false;
        }
        true
    });

    for entry in walker {
        let entry = entry?;
        if entry.depth() == 0 {
            continue;
        }

        let metadata = fs::metadata(entry.path()).map_err(|source| Error::EntryError {
            path: entry.path().to_path_buf(),
            source,
        })?;
        if metadata.is_dir() {
            continue;
        }

        if Some(entry.file_name()) == config_name {
            logger.debug(&format!(
                "Skipping configuration file {}",
                entry.path().display()
            ));
            continue;
        }

        let relative_path = entry
            .path()
            .strip_prefix(root)
            .map_err(|_| Error::InvalidPathError(entry.path().to_path_buf()))?;

        entries.push(FileEntry {
            relative_path: to_slash_path(relative_path)?,
            permission_bits: permission_bits(&metadata),
        });
    }

    entries.retain(|entry| {
        let is_ignored = ignored.is_match(&entry.relative_path);
        if is_ignored {
            logger.debug(&format!("Skipping file {} from ignore file", entry.relative_path));
        }
        !is_ignored
    });

    Ok(entries)
}

/// Joins the normal components of `path` with `/`.
fn to_slash_path(path: &Path) -> Result<String> {
    let mut parts = Vec::new();
    for component in path.components() {
        if let Component::Normal(part) = component {
            let part = part
                .to_str()
                .ok_or_else(|| Error::InvalidPathError(PathBuf::from(path)))?;
            parts.push(part);
        }
    }
    Ok(parts.join("/"))
}

#[cfg(unix)]
fn permission_bits(metadata: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn permission_bits(metadata: &Metadata) -> u32 {
    if metadata.permissions().readonly() {
        0o444
    } else {
        0o644
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_slash_path() {
        let path: PathBuf = ["sub", "dir", "file.txt"].iter().collect();
        assert_eq!(to_slash_path(&path).unwrap(), "sub/dir/file.txt");
        assert_eq!(to_slash_path(Path::new("./a.txt")).unwrap(), "a.txt");
    }
}
