//! Command-line interface implementation for ghostwriter.
//! Provides argument parsing using clap.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::constants::{CONFIG_FILE, IGNORE_FILE, OUTPUT_DIR, TEMPLATE_SUFFIX};
use crate::processor::Settings;

/// Command-line arguments structure for ghostwriter.
#[derive(Parser, Debug)]
#[command(author, version, about = "Ghostwriter: render a directory of templates from a configuration file", long_about = None)]
pub struct Args {
    /// Configuration file providing the template values
    #[arg(long, value_name = "PATH", default_value = CONFIG_FILE)]
    pub config_file: PathBuf,

    /// Input directory path
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub input: PathBuf,

    /// Root of output directory
    #[arg(long, value_name = "DIR", default_value = OUTPUT_DIR)]
    pub output: PathBuf,

    /// Suffix used to recognise templates. Currently informational: every
    /// file that is not ignored is rendered.
    #[arg(long, value_name = "SUFFIX", default_value = TEMPLATE_SUFFIX)]
    pub template_suffix: String,

    /// Whether to recurse into directories to find templates
    #[arg(long, value_name = "BOOL", default_value_t = true, action = ArgAction::Set)]
    pub recurse: bool,

    /// Add the output directory to the repository's .gitignore (not implemented)
    #[arg(long)]
    pub gitignore: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Pipeline settings described by these arguments.
    pub fn settings(&self) -> Settings {
        Settings {
            config_file: self.config_file.clone(),
            input_root: self.input.clone(),
            output_root: self.output.clone(),
            ignore_file_name: IGNORE_FILE.to_string(),
            recursive: self.recurse,
        }
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With clap's default error handling for argument errors
pub fn get_args() -> Args {
    Args::parse()
}
