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
use std::path::Path;

use logkeep::DirResolver;
use logkeep::FileLogger;
use logkeep::LevelMask;
use logkeep::LoggerOption;
use logkeep::Severity;
use tempfile::TempDir;

fn build(root: &Path) -> FileLogger {
    logkeep::builder()
        .name("app")
        .directory(DirResolver::new(root))
        .sub_dir("server")
        .console_levels(LevelMask::NONE)
        .build()
        .unwrap()
}

// one full restart cycle: write, remask, restart, check both files
#[test]
fn test_two_runs_against_one_log_file() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");

    let logger = build(temp_dir.path());
    logger.info("first run").unwrap();

    let previous = logger.set_option(LoggerOption::FileLevels(
        Severity::Error | Severity::Fatal,
    ));
    assert_eq!(previous, LevelMask::default());
    logger.info("silenced").unwrap();
    logger.fatal("going down").unwrap();
    logger.flush().unwrap();
    drop(logger);

    let logger = build(temp_dir.path());

    let dir = temp_dir.path().join("server");
    let names: Vec<String> = fs::read_dir(&dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 2, "expected the active file plus one archive");

    let archive = names.iter().find(|name| *name != "app.log").unwrap();
    let archived = fs::read_to_string(dir.join(archive)).unwrap();
    assert!(archived.contains(" [INFO] first run"));
    assert!(archived.contains(" [FATAL] going down"));
    assert!(!archived.contains("silenced"));

    let active = fs::read_to_string(logger.path()).unwrap();
    assert!(active.ends_with(" [INFO] Logging started!"));
    assert!(!active.contains('\n'));
}
