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

//! Deletion of log files past a fixed age threshold.

use std::fs;
use std::path::Path;
use std::time::Duration;
use std::time::SystemTime;

use anyhow::Context;

/// The retention window applied when none is configured explicitly.
pub const DEFAULT_RETENTION_DAYS: u32 = 10;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Deletes every plain `.log` file in `dir` whose modification time is more
/// than `max_age_days` days old. Returns the number of files removed.
///
/// Directories, symlinks, files without the `log` extension, and entries
/// whose metadata cannot be read are left untouched.
pub fn sweep(dir: impl AsRef<Path>, max_age_days: u32) -> anyhow::Result<usize> {
    sweep_at(dir.as_ref(), max_age_days, SystemTime::now())
}

fn sweep_at(dir: &Path, max_age_days: u32, now: SystemTime) -> anyhow::Result<usize> {
    let read_dir = fs::read_dir(dir)
        .with_context(|| format!("failed to read log dir: {}", dir.display()))?;
    let max_age = Duration::from_secs(u64::from(max_age_days) * SECONDS_PER_DAY);

    let mut removed = 0;
    for entry in read_dir {
        let entry = entry
            .with_context(|| format!("failed to read log dir entry: {}", dir.display()))?;

        // The logger only creates files, not directories or symlinks,
        // so we should never delete a dir or symlink.
        let Ok(metadata) = entry.metadata() else {
            continue;
        };
        if !metadata.is_file() {
            continue;
        }

        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("log") {
            continue;
        }

        let Ok(modified) = metadata.modified() else {
            continue;
        };
        // a modification time in the future is not old
        let Ok(age) = now.duration_since(modified) else {
            continue;
        };

        if age > max_age {
            fs::remove_file(&path)
                .with_context(|| format!("failed to remove old log file {}", path.display()))?;
            removed += 1;
        }
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_sweep_removes_only_old_log_files() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        fs::write(temp_dir.path().join("a.log"), "a").unwrap();
        fs::write(temp_dir.path().join("b.log"), "b").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "n").unwrap();
        fs::create_dir(temp_dir.path().join("dir.log")).unwrap();

        // everything was just written, so from 9 days out nothing has aged past
        // a 10 day window yet
        let nine_days = SystemTime::now() + Duration::from_secs(9 * SECONDS_PER_DAY);
        assert_eq!(sweep_at(temp_dir.path(), 10, nine_days).unwrap(), 0);
        assert!(temp_dir.path().join("a.log").exists());

        // from 11 days out both log files exceed the window
        let eleven_days = SystemTime::now() + Duration::from_secs(11 * SECONDS_PER_DAY);
        assert_eq!(sweep_at(temp_dir.path(), 10, eleven_days).unwrap(), 2);
        assert!(!temp_dir.path().join("a.log").exists());
        assert!(!temp_dir.path().join("b.log").exists());
        assert!(temp_dir.path().join("notes.txt").exists());
        assert!(temp_dir.path().join("dir.log").is_dir());
    }

    #[test]
    fn test_sweep_missing_directory_fails() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let missing = temp_dir.path().join("missing");
        assert!(sweep(&missing, DEFAULT_RETENTION_DAYS).is_err());
    }
}
