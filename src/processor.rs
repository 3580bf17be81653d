//! Core template processing orchestration.
//! Loads the configuration once, discovers the templates once, then reads,
//! renders and writes each template in discovery order. The first error
//! stops the run.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::{
    config::ConfigTree,
    constants::IGNORE_FILE,
    discovery::{discover, DiscoverOptions, FileEntry},
    error::{Error, Result},
    logger::Logger,
    renderer::TemplateRenderer,
    writer::write_rendered,
};

/// Settings of one run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Configuration file providing the rendering context
    pub config_file: PathBuf,
    /// Root of the template tree
    pub input_root: PathBuf,
    /// Root of the rendered tree
    pub output_root: PathBuf,
    /// Name of the ignore file at the input root
    pub ignore_file_name: String,
    /// Whether templates in subdirectories are discovered
    pub recursive: bool,
}

impl Settings {
    pub fn new<C, I, O>(config_file: C, input_root: I, output_root: O) -> Self
    where
        C: Into<PathBuf>,
        I: Into<PathBuf>,
        O: Into<PathBuf>,
    {
        Self {
            config_file: config_file.into(),
            input_root: input_root.into(),
            output_root: output_root.into(),
            ignore_file_name: IGNORE_FILE.to_string(),
            recursive: true,
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Default)]
pub struct Summary {
    /// Written files, in processing order
    pub rendered: Vec<PathBuf>,
}

/// Renders discovered templates into the output root.
pub struct Processor<'a> {
    engine: &'a dyn TemplateRenderer,
    logger: &'a dyn Logger,
    config: &'a ConfigTree,
    input_root: &'a Path,
    output_root: &'a Path,
}

impl<'a> Processor<'a> {
    pub fn new(
        engine: &'a dyn TemplateRenderer,
        logger: &'a dyn Logger,
        config: &'a ConfigTree,
        input_root: &'a Path,
        output_root: &'a Path,
    ) -> Self {
        Self {
            engine,
            logger,
            config,
            input_root,
            output_root,
        }
    }

    /// Reads, renders and writes a single template.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - Path of the written file
    pub fn process(&self, entry: &FileEntry) -> Result<PathBuf> {
        let source = entry
            .relative_path
            .split('/')
            .fold(self.input_root.to_path_buf(), |path, part| path.join(part));

        let bytes = fs::read(&source).map_err(|source| Error::ReadError {
            path: entry.relative_path.clone(),
            source,
        })?;

        let template = match String::from_utf8(bytes) {
            Ok(template) => template,
            Err(e) => {
                let bytes = e.into_bytes();
                if contains_tag(&bytes) {
                    return Err(Error::ReadError {
                        path: entry.relative_path.clone(),
                        source: io::Error::new(
                            io::ErrorKind::InvalidData,
                            "template tags in a file that is not valid UTF-8",
                        ),
                    });
                }
                self.logger.debug(&format!(
                    "Copying {} verbatim, it is not valid UTF-8",
                    entry.relative_path
                ));
                return write_rendered(&bytes, entry, self.output_root);
            }
        };

        let rendered = self
            .engine
            .render(&template, self.config, &entry.relative_path)?;

        write_rendered(rendered.as_bytes(), entry, self.output_root)
    }

    /// Processes `entries` in order, stopping at the first error.
    pub fn process_all(&self, entries: &[FileEntry]) -> Result<Summary> {
        let mut summary = Summary::default();
        for entry in entries {
            let target = self.process(entry)?;
            self.logger.info(&format!("rendered: '{}'", target.display()));
            summary.rendered.push(target);
        }
        Ok(summary)
    }
}

/// Whether `bytes` contains the opening `{{` of a template tag.
fn contains_tag(bytes: &[u8]) -> bool {
    bytes.windows(2).any(|pair| pair == b"{{")
}

/// Runs the whole pipeline.
///
/// # Flow
/// 1. Loads the configuration
/// 2. Discovers templates under the input root
/// 3. Renders and writes every template
///
/// # Errors
/// Returns the first error of any stage; nothing after it runs.
pub fn run(
    settings: &Settings,
    engine: &dyn TemplateRenderer,
    logger: &dyn Logger,
) -> Result<Summary> {
    let config = ConfigTree::load(&settings.config_file)?;
    logger.debug(&format!(
        "Loaded {} top-level keys from {}",
        config.len(),
        settings.config_file.display()
    ));

    let options = DiscoverOptions {
        root: &settings.input_root,
        output_root: &settings.output_root,
        config_file: &settings.config_file,
        ignore_file_name: &settings.ignore_file_name,
        recursive: settings.recursive,
    };
    let entries = discover(&options, logger)?;
    logger.info(&format!(
        "Discovered {} template(s) in {}",
        entries.len(),
        settings.input_root.display()
    ));

    let processor = Processor::new(
        engine,
        logger,
        &config,
        &settings.input_root,
        &settings.output_root,
    );
    let summary = processor.process_all(&entries)?;

    logger.info(&format!(
        "Rendering completed successfully in {}.",
        settings.output_root.display()
    ));
    Ok(summary)
}
