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

//! Rendering of log lines and derived file names.
//!
//! Output format:
//!
//! ```text
//! 2024-08-11 22:44:57:172 [INFO] Logging started!
//! 2024-08-11 22:44:58:009 [ERROR] [net]connection refused
//! 2024-08-11 22:44:58:731 [WARN] slow shutdown
//! ```

use jiff::Zoned;

use crate::Severity;

/// Record timestamps: local time, millisecond precision, all fields
/// zero-padded to fixed width.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S:%3f";

/// Names for archived files, derived from the replaced file's creation time.
const ARCHIVE_FORMAT: &str = "%Y%m%d_%H%M%S";

/// The builder's file name suffix: an ISO-like stamp with `-` and `:`
/// flattened to `_` and no zone marker.
const SUFFIX_FORMAT: &str = "%Y_%m_%dT%H_%M_%S.%3f";

/// Formats one log line. The module tag is bracketed and prefixed onto the
/// message only when present and non-empty.
pub(crate) fn format_record(
    now: &Zoned,
    severity: Severity,
    module: Option<&str>,
    message: &str,
) -> String {
    let time = now.strftime(TIMESTAMP_FORMAT);
    match module {
        Some(module) if !module.is_empty() => {
            format!("{time} [{severity}] [{module}]{message}")
        }
        _ => format!("{time} [{severity}] {message}"),
    }
}

/// The line written when a log file is (re)created.
pub(crate) fn format_banner(now: &Zoned) -> String {
    format_record(now, Severity::Info, None, "Logging started!")
}

/// The archival name an existing file is renamed to on rotation.
pub(crate) fn archive_file_name(created: &Zoned) -> String {
    format!("{}.log", created.strftime(ARCHIVE_FORMAT))
}

/// The suffix appended to a base file name by the builder's timestamp flag.
pub(crate) fn timestamp_suffix(now: &Zoned) -> String {
    now.strftime(SUFFIX_FORMAT).to_string()
}

#[cfg(feature = "colored")]
pub(crate) fn format_record_colored(
    now: &Zoned,
    severity: Severity,
    module: Option<&str>,
    message: &str,
) -> String {
    use colored::Color;
    use colored::ColoredString;
    use colored::Colorize;

    let color = match severity {
        Severity::Error => Color::Red,
        Severity::Warn => Color::Yellow,
        Severity::Info => Color::Green,
        Severity::Debug => Color::Blue,
        Severity::Fatal => Color::Magenta,
    };

    let time = now.strftime(TIMESTAMP_FORMAT);
    let level = ColoredString::from(severity.name()).color(color);
    match module {
        Some(module) if !module.is_empty() => {
            format!("{time} [{level}] [{module}]{message}")
        }
        _ => format!("{time} [{level}] {message}"),
    }
}
