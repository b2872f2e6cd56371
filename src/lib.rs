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

//! Logkeep is a small leveled file logger: it resolves (and creates) a log
//! directory, rotates the previous file away on restart, filters records
//! through per-sink level masks, and optionally prunes old log files.
//!
//! # Overview
//!
//! A [`FileLogger`] owns one target file. Constructing it over an existing
//! file renames that file to an archival `YYYYMMDD_HHMMSS.log` name and
//! starts fresh with a banner line, so each process run begins a new file.
//! Records pass through two independent [`LevelMask`]s, one for the file and
//! one for a stdout echo. Old files can be swept away by age at
//! construction time.
//!
//! # Examples
//!
//! Build a logger and write a few records:
//!
//! ```no_run
//! use logkeep::Severity;
//!
//! let logger = logkeep::builder()
//!     .name("app")
//!     .sub_dir("server")
//!     .retention_days(10)
//!     .build()?;
//!
//! logger.info("service starting")?;
//! logger.append(Severity::Error, Some("net"), "connection refused")?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! Route the `log` crate macros into a shared logger:
//!
//! ```no_run
//! let logger = logkeep::registry::default_logger()?;
//! logkeep::bridge::try_install(logger)?;
//!
//! log::info!("this lands in log/latest.log");
//! # Ok::<(), logkeep::LogSetupError>(())
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod bridge;
pub mod registry;
pub mod retention;

mod builder;
mod clock;
mod error;
mod layout;
mod level;
mod logger;
mod path;

pub use builder::LogFileBuilder;
pub use builder::builder;
pub use error::LogSetupError;
pub use level::LevelMask;
pub use level::LoggerOption;
pub use level::Severity;
pub use logger::FileLogger;
pub use path::DirResolver;
pub use path::Resolution;
pub use path::Strategy;
