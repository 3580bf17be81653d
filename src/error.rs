//! Error handling for the ghostwriter application.
//! Every pipeline stage returns [`Result`]; only `main` turns an error into
//! a process exit through [`default_error_handler`].

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for ghostwriter operations.
///
/// Variants are grouped by the stage that produces them: configuration,
/// discovery, render and write. None of them is retried.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// The configuration file is missing, unreadable or has the wrong shape
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// The configuration file could not be deserialized
    #[error("Configuration error: failed to parse '{}': {source}.", .path.display())]
    ConfigParseError {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A line of the ignore file is not a valid regular expression
    #[error("Ignore file error: invalid pattern in '{}': {source}.", .path.display())]
    IgnorePatternError {
        path: PathBuf,
        #[source]
        source: regex::Error,
    },

    /// A directory entry under the input root could not be read
    #[error("Discovery error: {0}.")]
    DiscoveryError(#[from] walkdir::Error),

    /// A discovered entry could not be inspected
    #[error("Discovery error: cannot read '{}': {source}.", .path.display())]
    EntryError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A discovered path cannot be represented as UTF-8 text
    #[error("Discovery error: path '{}' is not valid UTF-8.", .0.display())]
    InvalidPathError(PathBuf),

    /// A template could not be compiled
    #[error("Template syntax error in '{path}': {source:#}")]
    TemplateSyntaxError {
        path: String,
        #[source]
        source: minijinja::Error,
    },

    /// A template compiled but could not be evaluated against the configuration
    #[error("Render error in '{path}': {}{source:#}", describe_reference(.reference))]
    RenderError {
        path: String,
        reference: Option<String>,
        #[source]
        source: minijinja::Error,
    },

    /// A template could not be read from the input root
    #[error("Read error for '{path}': {source}.")]
    ReadError {
        path: String,
        #[source]
        source: io::Error,
    },

    /// A rendered file or its parent directories could not be written
    #[error("Write error for '{}': {source}.", .path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn describe_reference(reference: &Option<String>) -> String {
    match reference {
        Some(reference) => format!("undefined reference '.{reference}': "),
        None => String::new(),
    }
}

impl Error {
    /// Name of the pipeline stage the error belongs to.
    pub fn stage(&self) -> &'static str {
        match self {
            Error::ConfigError(_) | Error::ConfigParseError { .. } => "configuration",
            Error::IgnorePatternError { .. }
            | Error::DiscoveryError(_)
            | Error::EntryError { .. }
            | Error::InvalidPathError(_) => "discovery",
            Error::TemplateSyntaxError { .. }
            | Error::RenderError { .. }
            | Error::ReadError { .. } => "render",
            Error::WriteError { .. } => "write",
            Error::IoError(_) => "io",
        }
    }
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the stage and error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("ghostwriter: {} failed: {}", err.stage(), err);
    std::process::exit(1);
}
