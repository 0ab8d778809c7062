//! Error taxonomy for a setup run

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while making a project test-ready
#[derive(Debug, Error)]
pub enum SetupError {
    /// No `package.json` in the project directory; nothing else can run
    #[error("{} not found", .path.display())]
    ManifestNotFound { path: PathBuf },

    #[error("failed to parse {}: {source}", .path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    ManifestWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no recognized tech stack (expected react or vue in dependencies)")]
    UnrecognizedStack,

    /// Exit code is -1 when the process was terminated by a signal
    #[error("command `{command}` failed with exit code {exit_code}")]
    CommandFailed { command: String, exit_code: i32 },

    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Non-fatal: the resolver logs it and carries on without a version
    #[error("could not determine installed version of {package}: {reason}")]
    VersionLookup { package: String, reason: String },

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("project directory does not exist: {}", .path.display())]
    ProjectDir { path: PathBuf },
}

impl SetupError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
