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

use std::env;

use jiff::Zoned;

use crate::clock::Clock;
use crate::error::LogSetupError;
use crate::layout;
use crate::level::LevelMask;
use crate::logger::FileLogger;
use crate::path::DirResolver;

/// Create a new empty [builder][LogFileBuilder].
///
/// The base name is required; everything else has a default:
///
/// ```no_run
/// let logger = logkeep::builder().name("app").build()?;
/// # Ok::<(), logkeep::LogSetupError>(())
/// ```
pub fn builder() -> LogFileBuilder {
    LogFileBuilder::new()
}

/// A builder that names and locates a log file, then constructs its
/// [`FileLogger`].
///
/// Without an explicit directory, files land under `<cwd>/log`, which is
/// created if missing. Missing subdirectory segments are always created.
///
/// # Examples
///
/// ```no_run
/// use logkeep::Severity;
///
/// let logger = logkeep::builder()
///     .name("worker")
///     .sub_dir("jobs")
///     .timestamped(true)
///     .file_levels(Severity::Info | Severity::Warn | Severity::Error | Severity::Fatal)
///     .retention_days(10)
///     .build()?;
/// # Ok::<(), logkeep::LogSetupError>(())
/// ```
#[must_use = "call `build` to construct the logger"]
#[derive(Debug)]
pub struct LogFileBuilder {
    base_name: String,
    directory: Option<DirResolver>,
    segments: Option<Vec<String>>,
    timestamped: bool,
    file_levels: LevelMask,
    console_levels: LevelMask,
    retention_days: Option<u32>,
}

impl Default for LogFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LogFileBuilder {
    /// Creates a new empty [`LogFileBuilder`].
    pub fn new() -> Self {
        Self {
            base_name: String::new(),
            directory: None,
            segments: None,
            timestamped: false,
            file_levels: LevelMask::default(),
            console_levels: LevelMask::default(),
            retention_days: None,
        }
    }

    /// Sets the base file name (without extension). Required.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.base_name = name.into();
        self
    }

    /// Sets the directory resolver the log file is placed under, replacing
    /// the default `<cwd>/log` root.
    pub fn directory(mut self, resolver: DirResolver) -> Self {
        self.directory = Some(resolver);
        self
    }

    /// Places the file in a single subdirectory below the root.
    pub fn sub_dir(mut self, name: impl Into<String>) -> Self {
        self.segments = Some(vec![name.into()]);
        self
    }

    /// Places the file below the root under the given subdirectory chain.
    pub fn sub_dirs<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.segments = Some(segments.into_iter().map(Into::into).collect());
        self
    }

    /// Appends a timestamp suffix to the base name before the extension.
    pub fn timestamped(mut self, timestamped: bool) -> Self {
        self.timestamped = timestamped;
        self
    }

    /// Sets the initial mask for the file sink.
    pub fn file_levels(mut self, mask: impl Into<LevelMask>) -> Self {
        self.file_levels = mask.into();
        self
    }

    /// Sets the initial mask for the console echo.
    pub fn console_levels(mut self, mask: impl Into<LevelMask>) -> Self {
        self.console_levels = mask.into();
        self
    }

    /// Deletes log files older than `days` days from the target directory
    /// while constructing the logger. Off by default; see
    /// [`DEFAULT_RETENTION_DAYS`](crate::retention::DEFAULT_RETENTION_DAYS).
    pub fn retention_days(mut self, days: u32) -> Self {
        self.retention_days = Some(days);
        self
    }

    /// Resolves the directory, composes the final file name, and constructs
    /// the [`FileLogger`].
    ///
    /// # Errors
    ///
    /// [`LogSetupError::MissingFileName`] if no base name was set; otherwise
    /// any directory resolution or file creation failure.
    pub fn build(self) -> Result<FileLogger, LogSetupError> {
        let Self {
            base_name,
            directory,
            segments,
            timestamped,
            file_levels,
            console_levels,
            retention_days,
        } = self;

        if base_name.is_empty() {
            return Err(LogSetupError::MissingFileName);
        }

        let mut resolver = match directory {
            Some(resolver) => resolver,
            None => DirResolver::new(env::current_dir()?.join("log")).create_start(true),
        };
        if let Some(segments) = segments {
            resolver.set_segments(segments);
        }
        let dir = resolver.create()?;

        let file_name = if timestamped {
            format!("{base_name}_{}.log", layout::timestamp_suffix(&Zoned::now()))
        } else {
            format!("{base_name}.log")
        };

        FileLogger::create(
            dir.join(file_name),
            file_levels,
            console_levels,
            retention_days,
            Clock::DefaultClock,
        )
    }
}
