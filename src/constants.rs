//! Common constants used throughout the ghostwriter application.

/// Default configuration file name
pub const CONFIG_FILE: &str = "ghostwriter.yaml";

/// Ghostwriter's ignore file name, looked up at the input root
pub const IGNORE_FILE: &str = ".gwignore";

/// Default root of the output directory
pub const OUTPUT_DIR: &str = "rendered";

/// Default template suffix
pub const TEMPLATE_SUFFIX: &str = ".gw";

/// Version control directory that is never descended into
pub const GIT_DIR: &str = ".git";
