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

//! Resolution of log directories from a start path and subdirectory segments.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use crate::error::LogSetupError;

/// Policy for handling a missing directory segment during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Create the missing segment (recursively) and continue the walk.
    Create,
    /// Abort the walk and report the deepest existing prefix.
    Stop,
}

/// The outcome of a [`DirResolver::resolve`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Every segment exists (or was created); the full joined path.
    Complete(PathBuf),
    /// A segment was missing under [`Strategy::Stop`]; the deepest existing
    /// prefix of the walk.
    Partial(PathBuf),
}

impl Resolution {
    /// Whether the whole segment chain resolved.
    pub fn is_complete(&self) -> bool {
        matches!(self, Resolution::Complete(_))
    }

    /// The resolved path, complete or not.
    pub fn path(&self) -> &Path {
        match self {
            Resolution::Complete(path) => path,
            Resolution::Partial(path) => path,
        }
    }
}

/// Resolves (and optionally creates) a directory from a start path and an
/// ordered list of subdirectory segments.
///
/// A missing start path is always a hard failure, independent of strategy;
/// only segment handling is strategy-dependent. The resolver caches the last
/// resolved path until the segments are reassigned.
///
/// # Examples
///
/// ```no_run
/// use logkeep::DirResolver;
///
/// let mut resolver = DirResolver::new("/var/tmp").segments(["my-app", "log"]);
/// let dir = resolver.create()?;
/// # Ok::<(), logkeep::LogSetupError>(())
/// ```
#[derive(Debug)]
pub struct DirResolver {
    start: PathBuf,
    segments: Vec<String>,
    create_start: bool,
    resolved: Option<PathBuf>,
}

impl DirResolver {
    /// Creates a resolver rooted at `start` with no segments.
    pub fn new(start: impl Into<PathBuf>) -> Self {
        Self {
            start: start.into(),
            segments: vec![],
            create_start: false,
            resolved: None,
        }
    }

    /// Sets whether a missing start path is created instead of rejected.
    #[must_use]
    pub fn create_start(mut self, create: bool) -> Self {
        self.create_start = create;
        self
    }

    /// Sets the subdirectory segments walked below the start path.
    #[must_use]
    pub fn segments<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_segments(segments);
        self
    }

    /// Reassigns the segment list, invalidating the cached resolution.
    pub fn set_segments<I, S>(&mut self, segments: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.segments = segments.into_iter().map(Into::into).collect();
        self.resolved = None;
    }

    /// The path produced by the most recent resolution, if any.
    pub fn path(&self) -> Option<&Path> {
        self.resolved.as_deref()
    }

    /// Walks the segment chain under the given strategy.
    ///
    /// # Errors
    ///
    /// [`LogSetupError::PathNotFound`] if the start path does not exist (and
    /// was not requested to be created); [`LogSetupError::CreateDir`] if a
    /// directory could not be created under [`Strategy::Create`].
    pub fn resolve(&mut self, strategy: Strategy) -> Result<Resolution, LogSetupError> {
        let mut path = self.start.clone();
        if self.create_start && !path.exists() {
            create_dir(&path)?;
        }
        if !path.exists() {
            return Err(LogSetupError::PathNotFound(path));
        }

        for segment in &self.segments {
            path.push(segment);
            if !path.exists() {
                match strategy {
                    Strategy::Create => create_dir(&path)?,
                    Strategy::Stop => {
                        path.pop();
                        self.resolved = Some(path.clone());
                        return Ok(Resolution::Partial(path));
                    }
                }
            }
        }

        self.resolved = Some(path.clone());
        Ok(Resolution::Complete(path))
    }

    /// Resolves with [`Strategy::Create`] and returns the full path.
    pub fn create(&mut self) -> Result<PathBuf, LogSetupError> {
        match self.resolve(Strategy::Create)? {
            Resolution::Complete(path) => Ok(path),
            Resolution::Partial(_) => unreachable!("create strategy cannot partially resolve"),
        }
    }

    /// Resolves with [`Strategy::Stop`]; true iff the whole chain exists.
    pub fn exists(&mut self) -> Result<bool, LogSetupError> {
        Ok(self.resolve(Strategy::Stop)?.is_complete())
    }
}

fn create_dir(path: &Path) -> Result<(), LogSetupError> {
    fs::create_dir_all(path).map_err(|source| LogSetupError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_create_strategy_creates_all_segments() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");

        let mut resolver =
            DirResolver::new(temp_dir.path()).segments(["alpha", "beta", "gamma"]);
        let path = resolver.create().unwrap();

        assert_eq!(path, temp_dir.path().join("alpha/beta/gamma"));
        assert!(path.is_dir());
        assert_eq!(resolver.path(), Some(path.as_path()));
    }

    #[test]
    fn test_stop_strategy_reports_deepest_existing_prefix() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        fs::create_dir(temp_dir.path().join("alpha")).unwrap();

        let mut resolver = DirResolver::new(temp_dir.path()).segments(["alpha", "beta"]);
        let resolution = resolver.resolve(Strategy::Stop).unwrap();

        assert_eq!(
            resolution,
            Resolution::Partial(temp_dir.path().join("alpha"))
        );
        assert!(!temp_dir.path().join("alpha/beta").exists());
        assert!(!resolver.exists().unwrap());
    }

    #[test]
    fn test_stop_strategy_completes_over_existing_chain() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        fs::create_dir_all(temp_dir.path().join("alpha/beta")).unwrap();

        let mut resolver = DirResolver::new(temp_dir.path()).segments(["alpha", "beta"]);
        assert!(resolver.exists().unwrap());
        assert_eq!(resolver.path(), Some(temp_dir.path().join("alpha/beta").as_path()));
    }

    #[test]
    fn test_missing_start_path_fails_for_both_strategies() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let start = temp_dir.path().join("missing");

        let mut resolver = DirResolver::new(&start);
        assert!(matches!(
            resolver.resolve(Strategy::Create),
            Err(LogSetupError::PathNotFound(path)) if path == start
        ));
        assert!(matches!(
            resolver.resolve(Strategy::Stop),
            Err(LogSetupError::PathNotFound(_))
        ));
    }

    #[test]
    fn test_create_start_creates_missing_start_path() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let start = temp_dir.path().join("fresh");

        let mut resolver = DirResolver::new(&start).create_start(true).segments(["sub"]);
        let path = resolver.create().unwrap();

        assert_eq!(path, start.join("sub"));
        assert!(path.is_dir());
    }

    #[test]
    fn test_reassigning_segments_invalidates_cache() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");

        let mut resolver = DirResolver::new(temp_dir.path()).segments(["one"]);
        resolver.create().unwrap();
        assert!(resolver.path().is_some());

        resolver.set_segments(["two"]);
        assert_eq!(resolver.path(), None);
        assert_eq!(resolver.create().unwrap(), temp_dir.path().join("two"));
    }
}
