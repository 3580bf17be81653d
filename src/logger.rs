//! Logging capability handed to every pipeline stage.
//!
//! Stages log through a borrowed [`Logger`] instead of reaching for the
//! global `log` macros, so tests can observe what a run reported.

use log::{Level, LevelFilter};

/// Sink for diagnostic messages.
pub trait Logger {
    /// Records a message at the given level.
    fn log(&self, level: Level, message: &str);

    fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }

    fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    fn warn(&self, message: &str) {
        self.log(Level::Warn, message);
    }

    fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }
}

/// Forwards messages to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct FacadeLogger;

impl Logger for FacadeLogger {
    fn log(&self, level: Level, message: &str) {
        log::log!(target: "ghostwriter", level, "{message}");
    }
}

/// Installs `env_logger` as the `log` backend.
///
/// # Arguments
/// * `verbose` - Lowers the level filter from `Info` to `Debug`
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose { LevelFilter::Debug } else { LevelFilter::Info })
        .format_timestamp(None)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder(RefCell<Vec<Level>>);

    impl Logger for Recorder {
        fn log(&self, level: Level, _message: &str) {
            self.0.borrow_mut().push(level);
        }
    }

    #[test]
    fn test_provided_methods_use_matching_level() {
        let recorder = Recorder::default();
        recorder.debug("d");
        recorder.info("i");
        recorder.warn("w");
        recorder.error("e");

        assert_eq!(
            *recorder.0.borrow(),
            vec![Level::Debug, Level::Info, Level::Warn, Level::Error]
        );
    }
}
