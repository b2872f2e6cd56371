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

use std::fs;
use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::MutexGuard;

use anyhow::Context;
use jiff::Zoned;
use jiff::tz::TimeZone;

use crate::clock::Clock;
use crate::error::LogSetupError;
use crate::layout;
use crate::level::LevelMask;
use crate::level::LoggerOption;
use crate::level::Severity;
use crate::retention;

/// A logger writing leveled, timestamped lines to one file, optionally
/// echoing them to stdout.
///
/// Constructing a `FileLogger` over an existing file rotates it away first:
/// the old file is renamed within its directory to `YYYYMMDD_HHMMSS.log`
/// derived from its creation time, and a fresh file is started with a banner
/// line. Rotation is triggered purely by restart, not by size or elapsed
/// time.
///
/// The file and console sinks filter records through independent
/// [`LevelMask`]s, both defaulting to `INFO | WARN | ERROR`. Methods take
/// `&self`; appends from concurrent callers are serialized internally.
///
/// # Examples
///
/// ```no_run
/// use logkeep::Severity;
///
/// let logger = logkeep::builder().name("app").build()?;
/// logger.info("service starting")?;
/// logger.append(Severity::Warn, Some("net"), "listener backlog full")?;
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug)]
pub struct FileLogger {
    path: PathBuf,
    inner: Mutex<Inner>,
}

#[derive(Debug)]
struct Inner {
    file: File,
    file_levels: LevelMask,
    console_levels: LevelMask,
    clock: Clock,
}

impl FileLogger {
    /// Opens a logger at `path` with default masks and no retention sweep,
    /// creating missing parent directories and rotating any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory or the log file cannot be
    /// created, or if an existing file cannot be rotated away.
    pub fn open(path: impl Into<PathBuf>) -> Result<FileLogger, LogSetupError> {
        Self::create(
            path.into(),
            LevelMask::default(),
            LevelMask::default(),
            None,
            Clock::DefaultClock,
        )
    }

    pub(crate) fn create(
        path: PathBuf,
        file_levels: LevelMask,
        console_levels: LevelMask,
        retention_days: Option<u32>,
        clock: Clock,
    ) -> Result<FileLogger, LogSetupError> {
        if let Some(dir) = parent_dir(&path) {
            fs::create_dir_all(dir).map_err(|source| LogSetupError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        if path.exists() {
            rotate(&path)?;
        }

        let now = clock.now();
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;
        file.write_all(layout::format_banner(&now).as_bytes())?;

        if let Some(days) = retention_days {
            if let Some(dir) = parent_dir(&path) {
                retention::sweep(dir, days).map_err(LogSetupError::Retention)?;
            }
        }

        Ok(FileLogger {
            path,
            inner: Mutex::new(Inner {
                file,
                file_levels,
                console_levels,
                clock,
            }),
        })
    }

    /// The path of the active log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The file name of the active log file.
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }

    /// The mask controlling what is appended to the file.
    pub fn file_levels(&self) -> LevelMask {
        self.lock_inner().file_levels
    }

    /// The mask controlling what is echoed to the console.
    pub fn console_levels(&self) -> LevelMask {
        self.lock_inner().console_levels
    }

    /// Whether a record at `severity` would reach at least one sink.
    pub fn is_enabled(&self, severity: Severity) -> bool {
        let inner = self.lock_inner();
        inner.file_levels.contains(severity) || inner.console_levels.contains(severity)
    }

    /// Replaces the addressed mask, returning its previous value.
    ///
    /// Takes effect for subsequent appends only; lines already written are
    /// not re-read.
    pub fn set_option(&self, option: LoggerOption) -> LevelMask {
        let mut inner = self.lock_inner();
        match option {
            LoggerOption::FileLevels(mask) => std::mem::replace(&mut inner.file_levels, mask),
            LoggerOption::ConsoleLevels(mask) => {
                std::mem::replace(&mut inner.console_levels, mask)
            }
        }
    }

    /// Formats one record and delivers it to each sink whose mask contains
    /// `severity`. A `None` or empty module tag is omitted from the line.
    ///
    /// # Errors
    ///
    /// Returns an error if appending to the file or echoing to stdout fails.
    pub fn append(
        &self,
        severity: Severity,
        module: Option<&str>,
        message: &str,
    ) -> anyhow::Result<()> {
        let mut inner = self.lock_inner();
        let to_file = inner.file_levels.contains(severity);
        let to_console = inner.console_levels.contains(severity);
        if !to_file && !to_console {
            return Ok(());
        }

        let now = inner.clock.now();
        if to_file {
            let line = layout::format_record(&now, severity, module, message);
            // records are newline-prefixed; the banner carries no trailing
            // newline, so every line including it stays unterminated
            inner
                .file
                .write_all(b"\n")
                .context("failed to append to log file")?;
            inner
                .file
                .write_all(line.as_bytes())
                .context("failed to append to log file")?;
        }
        if to_console {
            echo(&now, severity, module, message)?;
        }
        Ok(())
    }

    /// Appends a record at [`Severity::Debug`].
    pub fn debug(&self, message: &str) -> anyhow::Result<()> {
        self.append(Severity::Debug, None, message)
    }

    /// Appends a record at [`Severity::Info`].
    pub fn info(&self, message: &str) -> anyhow::Result<()> {
        self.append(Severity::Info, None, message)
    }

    /// Appends a record at [`Severity::Warn`].
    pub fn warn(&self, message: &str) -> anyhow::Result<()> {
        self.append(Severity::Warn, None, message)
    }

    /// Appends a record at [`Severity::Error`].
    pub fn error(&self, message: &str) -> anyhow::Result<()> {
        self.append(Severity::Error, None, message)
    }

    /// Appends a record at [`Severity::Fatal`].
    pub fn fatal(&self, message: &str) -> anyhow::Result<()> {
        self.append(Severity::Fatal, None, message)
    }

    /// Flushes the underlying file.
    pub fn flush(&self) -> anyhow::Result<()> {
        self.lock_inner()
            .file
            .flush()
            .context("failed to flush log file")
    }

    fn lock_inner(&self) -> MutexGuard<'_, Inner> {
        // a poisoned lock still guards a usable file handle
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[cfg(test)]
    fn set_now(&self, now: Zoned) {
        self.lock_inner().clock.set_now(now);
    }
}

fn parent_dir(path: &Path) -> Option<&Path> {
    path.parent().filter(|dir| !dir.as_os_str().is_empty())
}

fn rotate(path: &Path) -> Result<(), LogSetupError> {
    let metadata = fs::metadata(path)?;
    // creation time is not available on every filesystem
    let created = metadata.created().or_else(|_| metadata.modified())?;
    let created = jiff::Timestamp::try_from(created)
        .map_err(io::Error::other)?
        .to_zoned(TimeZone::system());

    let archive = path.with_file_name(layout::archive_file_name(&created));
    fs::rename(path, archive)?;
    Ok(())
}

fn echo(now: &Zoned, severity: Severity, module: Option<&str>, message: &str) -> anyhow::Result<()> {
    #[cfg(feature = "colored")]
    let line = layout::format_record_colored(now, severity, module, message);
    #[cfg(not(feature = "colored"))]
    let line = layout::format_record(now, severity, module, message);

    let mut bytes = line.into_bytes();
    bytes.push(b'\n');
    io::stdout()
        .write_all(&bytes)
        .context("failed to echo to stdout")
}
