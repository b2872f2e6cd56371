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

use std::io;
use std::path::PathBuf;

use log::SetLoggerError;

/// Errors raised while setting up a logger.
///
/// Write-path failures are reported as [`anyhow::Error`] by the append
/// operations instead; see [`FileLogger::append`](crate::FileLogger::append).
#[derive(Debug, thiserror::Error)]
pub enum LogSetupError {
    /// The builder was finished without a base file name.
    #[error("log file name is not set")]
    MissingFileName,
    /// A start path does not exist and was not requested to be created.
    #[error("path does not exist: {}", .0.display())]
    PathNotFound(PathBuf),
    /// A directory segment could not be created under the create strategy.
    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to perform IO action: {0}")]
    Io(#[from] io::Error),
    #[error("failed to set up logger: {0}")]
    SetLogger(SetLoggerError),
    /// The construction-time retention sweep failed.
    #[error("failed to sweep old log files: {0}")]
    Retention(anyhow::Error),
}

impl From<SetLoggerError> for LogSetupError {
    fn from(value: SetLoggerError) -> Self {
        LogSetupError::SetLogger(value)
    }
}
