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

//! A process-scoped registry of named loggers.
//!
//! Loggers are constructed at most once per name, even when the first calls
//! race, and every later lookup returns the same shared instance. Prefer
//! passing a [`FileLogger`] explicitly; the registry exists for callers that
//! need one well-known instance per process.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::OnceLock;

use crate::builder;
use crate::error::LogSetupError;
use crate::logger::FileLogger;
use crate::retention::DEFAULT_RETENTION_DAYS;

/// The name [`default_logger`] registers under.
pub const DEFAULT_LOGGER_NAME: &str = "latest";

static REGISTRY: OnceLock<Mutex<HashMap<String, Arc<FileLogger>>>> = OnceLock::new();

fn lock_registry() -> MutexGuard<'static, HashMap<String, Arc<FileLogger>>> {
    let registry = REGISTRY.get_or_init(|| Mutex::new(HashMap::new()));
    match registry.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Returns the logger registered under `name`, constructing it with `init`
/// on the first call.
///
/// `init` runs at most once per name; concurrent first calls are serialized.
/// If `init` fails nothing is registered, and a later call may retry.
pub fn get_or_init<F>(name: &str, init: F) -> Result<Arc<FileLogger>, LogSetupError>
where
    F: FnOnce() -> Result<FileLogger, LogSetupError>,
{
    let mut registry = lock_registry();
    if let Some(logger) = registry.get(name) {
        return Ok(logger.clone());
    }

    let logger = Arc::new(init()?);
    registry.insert(name.to_string(), logger.clone());
    Ok(logger)
}

/// Returns the logger registered under `name`, if any.
pub fn get(name: &str) -> Option<Arc<FileLogger>> {
    lock_registry().get(name).cloned()
}

/// Returns the default per-process logger, constructing it on first call:
/// `latest.log` under `<cwd>/log`, default masks, and a
/// [`DEFAULT_RETENTION_DAYS`]-day retention sweep.
pub fn default_logger() -> Result<Arc<FileLogger>, LogSetupError> {
    get_or_init(DEFAULT_LOGGER_NAME, || {
        builder()
            .name(DEFAULT_LOGGER_NAME)
            .retention_days(DEFAULT_RETENTION_DAYS)
            .build()
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::LevelMask;
    use crate::path::DirResolver;
    use super::*;

    fn temp_logger(temp_dir: &TempDir) -> Result<FileLogger, LogSetupError> {
        builder()
            .name("app")
            .directory(DirResolver::new(temp_dir.path()))
            .console_levels(LevelMask::NONE)
            .build()
    }

    #[test]
    fn test_get_or_init_is_idempotent() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");

        let first = get_or_init("registry-idempotent", || temp_logger(&temp_dir)).unwrap();
        let second =
            get_or_init("registry-idempotent", || panic!("must not re-initialize")).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.path(), second.path());
    }

    #[test]
    fn test_get_returns_registered_loggers_only() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");

        assert!(get("registry-unknown").is_none());

        let registered = get_or_init("registry-known", || temp_logger(&temp_dir)).unwrap();
        let found = get("registry-known").unwrap();
        assert!(Arc::ptr_eq(&registered, &found));
    }

    #[test]
    fn test_failed_init_registers_nothing() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");

        let result = get_or_init("registry-failing", || {
            builder()
                .directory(DirResolver::new(temp_dir.path()))
                .build()
        });
        assert!(matches!(result, Err(LogSetupError::MissingFileName)));
        assert!(get("registry-failing").is_none());

        // a later call may retry with a working initializer
        let retried = get_or_init("registry-failing", || temp_logger(&temp_dir)).unwrap();
        assert_eq!(retried.file_name(), Some("app.log"));
    }
}
