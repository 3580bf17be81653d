//! Ghostwriter renders a directory tree of templates against a configuration
//! file and writes the results into a mirrored output tree, keeping each
//! file's permission bits.

/// Command-line interface module for the ghostwriter application
pub mod cli;

/// Configuration loading (JSON or YAML) and path lookup
pub mod config;

/// Default file and directory names
pub mod constants;

/// Template discovery under the input root
pub mod discovery;

/// Error types and handling for the ghostwriter application
pub mod error;

/// Path exclusion from .gwignore files
pub mod ignore;

/// Logging capability passed to every stage
pub mod logger;

/// Pipeline orchestration
pub mod processor;

/// Template rendering
pub mod renderer;

/// Rendered file output
pub mod writer;
