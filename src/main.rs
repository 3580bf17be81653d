//! Ghostwriter's main application entry point.
//! Parses arguments, sets up logging and runs the render pipeline, turning
//! the first error into a non-zero exit.

use ghostwriter::{
    cli::{get_args, Args},
    error::{default_error_handler, Result},
    logger::{init_logger, FacadeLogger, Logger},
    processor::run,
    renderer::MiniJinjaRenderer,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = execute(&args) {
        default_error_handler(err);
    }
}

fn execute(args: &Args) -> Result<()> {
    let logger = FacadeLogger;
    let engine = MiniJinjaRenderer::new();

    logger.debug(&format!(
        "Template suffix '{}' is not used to filter templates",
        args.template_suffix
    ));
    if args.gitignore {
        logger.warn("--gitignore is not implemented, .gitignore is left unchanged");
    }

    run(&args.settings(), &engine, &logger)?;
    Ok(())
}
