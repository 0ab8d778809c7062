//! Per-invocation run context
//!
//! Holds the resolved project directory. It is built once, before any stage
//! runs, and handed to every operation that needs an absolute path.

use crate::error::SetupError;
use std::path::{Path, PathBuf};

/// Resolved project directory for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    base_dir: PathBuf,
}

impl RunContext {
    /// Wrap an already-resolved directory without validating it
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Resolve `path` against `cwd` (defaulting to `cwd` itself) and check
    /// that it names an existing directory
    pub fn resolve(cwd: &Path, path: Option<&Path>) -> Result<Self, SetupError> {
        let base_dir = match path {
            Some(p) if p.is_absolute() => p.to_path_buf(),
            Some(p) if p.as_os_str().is_empty() || p == Path::new(".") => cwd.to_path_buf(),
            Some(p) => cwd.join(p),
            None => cwd.to_path_buf(),
        };

        if !base_dir.is_dir() {
            return Err(SetupError::ProjectDir { path: base_dir });
        }

        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Absolute path of a file inside the project directory
    pub fn join(&self, file_name: impl AsRef<Path>) -> PathBuf {
        self.base_dir.join(file_name)
    }
}
