// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::io::Write;
use std::sync::Arc;

use crate::FileLogger;
use crate::Severity;
use crate::error::LogSetupError;

/// Routes records from the `log` crate macros into a [`FileLogger`].
///
/// The record's module path becomes the module tag; `Trace` records are
/// mapped to [`Severity::Debug`].
#[derive(Debug)]
pub struct LogBridge {
    logger: Arc<FileLogger>,
}

impl LogBridge {
    /// Creates a bridge over the given logger.
    pub fn new(logger: Arc<FileLogger>) -> Self {
        Self { logger }
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.logger.is_enabled(Severity::from(metadata.level()))
    }

    fn log(&self, record: &log::Record) {
        let severity = Severity::from(record.level());
        let message = record.args().to_string();
        if let Err(err) = self.logger.append(severity, record.module_path(), &message) {
            handle_log_error(record, err);
        }
    }

    fn flush(&self) {
        let _ = self.logger.flush();
    }
}

/// Set up the log crate global logger over `logger`.
///
/// This should be called early in the execution of a Rust program. Any log
/// events that occur before installation will be ignored.
///
/// This function will set the global maximum log level to `Trace`. To
/// override this, call [`log::set_max_level`] after this function.
///
/// # Errors
///
/// Returns an error if the log crate global logger has already been set.
///
/// # Examples
///
/// ```no_run
/// let logger = logkeep::registry::default_logger()?;
/// logkeep::bridge::try_install(logger)?;
///
/// log::info!("routed into latest.log");
/// # Ok::<(), logkeep::LogSetupError>(())
/// ```
pub fn try_install(logger: Arc<FileLogger>) -> Result<(), LogSetupError> {
    log::set_boxed_logger(Box::new(LogBridge::new(logger)))?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}

/// Set up the log crate global logger over `logger`.
///
/// # Panics
///
/// Panics if the log crate global logger has already been set.
pub fn install(logger: Arc<FileLogger>) {
    try_install(logger).expect(
        "logkeep::bridge::install must be called before the log crate global logger initialized",
    );
}

// A logger cannot log its own failure; report to stderr instead.
fn handle_log_error(record: &log::Record, error: anyhow::Error) {
    let Err(fallback_error) = write!(
        std::io::stderr(),
        r###"
Error perform logging.
    Attempted to log: {args}
    Record: {record:?}
    Error: {error}
"###,
        args = record.args(),
        record = record,
        error = error,
    ) else {
        return;
    };

    panic!(
        r###"
Error performing stderr logging after error occurred during regular logging.
    Attempted to log: {args}
    Record: {record:?}
    Error: {error}
    Fallback error: {fallback_error}
"###,
        args = record.args(),
        record = record,
        error = error,
        fallback_error = fallback_error,
    );
}
