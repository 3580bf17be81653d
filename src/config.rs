//! Configuration handling for ghostwriter.
//! This module loads the configuration file once per run into an immutable
//! [`ConfigTree`] that every render call borrows.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{path::Path, str::FromStr};

/// Nested key/value configuration used as the rendering context.
///
/// Top-level keys keep the order of the configuration file. Nested values
/// are plain JSON values: strings, numbers, booleans, null, sequences and
/// mappings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigTree {
    root: IndexMap<String, Value>,
}

/// Result of resolving a dotted path against a [`ConfigTree`].
#[derive(Debug, PartialEq)]
pub enum Lookup<'a> {
    /// The path resolves to a non-null value
    Found(&'a Value),
    /// The path exists and holds an explicit null
    Null,
    /// Some segment of the path does not exist
    NotFound,
}

impl Lookup<'_> {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Lookup::NotFound)
    }
}

impl ConfigTree {
    /// Reads and parses the configuration file at `path`.
    ///
    /// # Errors
    /// * `Error::ConfigError` if the path is not a readable file
    /// * `Error::ConfigParseError` if the content is neither JSON nor YAML,
    ///   or its top level is not a mapping
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::ConfigError(format!(
                "Invalid configuration path: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::ConfigError(format!("failed to read '{}': {}", path.display(), e))
        })?;

        content.parse().map_err(|source| Error::ConfigParseError {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolves a dotted path such as `db.port` or `.db.port`.
    ///
    /// Numeric segments index into sequences.
    pub fn lookup(&self, path: &str) -> Lookup<'_> {
        let path = path.strip_prefix('.').unwrap_or(path);
        let mut segments = path.split('.');

        let mut current = match segments.next().and_then(|first| self.root.get(first)) {
            Some(value) => value,
            None => return Lookup::NotFound,
        };

        for segment in segments {
            let next = match current {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            };
            current = match next {
                Some(value) => value,
                None => return Lookup::NotFound,
            };
        }

        match current {
            Value::Null => Lookup::Null,
            value => Lookup::Found(value),
        }
    }

    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

impl FromStr for ConfigTree {
    type Err = serde_yaml::Error;

    /// Parses JSON first and falls back to YAML. An empty document is an
    /// empty tree.
    fn from_str(content: &str) -> std::result::Result<Self, Self::Err> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        if let Ok(root) = serde_json::from_str::<IndexMap<String, Value>>(content) {
            return Ok(Self { root });
        }
        let root: Option<IndexMap<String, Value>> = serde_yaml::from_str(content)?;
        Ok(Self {
            root: root.unwrap_or_default(),
        })
    }
}

impl From<IndexMap<String, Value>> for ConfigTree {
    fn from(root: IndexMap<String, Value>) -> Self {
        Self { root }
    }
}
