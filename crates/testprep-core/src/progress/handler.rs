//! Progress sink trait and events

use std::fmt;

/// One step of the setup pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    ReadManifest,
    InstallDependencies,
    DetectStack,
    DetectPackageManager,
    InstallTestFramework,
    MergeScripts,
    WriteConfig,
}

impl Stage {
    /// Stages in run order
    pub const ALL: [Stage; 7] = [
        Stage::ReadManifest,
        Stage::InstallDependencies,
        Stage::DetectStack,
        Stage::DetectPackageManager,
        Stage::InstallTestFramework,
        Stage::MergeScripts,
        Stage::WriteConfig,
    ];

    /// Status text shown while the stage is running
    pub fn start_message(&self) -> &'static str {
        match self {
            Stage::ReadManifest => "Reading package.json...",
            Stage::InstallDependencies => "Installing dependencies...",
            Stage::DetectStack => "Detecting tech stack...",
            Stage::DetectPackageManager => "Detecting package manager...",
            Stage::InstallTestFramework => "Installing jest...",
            Stage::MergeScripts => "Adding test script to package.json...",
            Stage::WriteConfig => "Writing jest.config.js...",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::ReadManifest => "read manifest",
            Stage::InstallDependencies => "install dependencies",
            Stage::DetectStack => "detect tech stack",
            Stage::DetectPackageManager => "detect package manager",
            Stage::InstallTestFramework => "install test framework",
            Stage::MergeScripts => "merge scripts",
            Stage::WriteConfig => "write config",
        };
        write!(f, "{}", name)
    }
}

/// Events emitted while a run progresses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    StageStarted { stage: Stage },

    /// `detail` is the human-readable outcome, e.g. the detected stack
    StageSucceeded { stage: Stage, detail: String },

    /// Emitted once per run, for the first failing stage
    StageFailed { stage: Stage, message: String },

    /// Terminal signal for operations without stages (update)
    Finished { message: String },
}

/// Receives progress events; rendering is up to the implementation
pub trait ProgressSink: Send + Sync {
    fn on_event(&self, event: &ProgressEvent);
}

/// Sink that drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpProgress;

impl ProgressSink for NoOpProgress {
    fn on_event(&self, _event: &ProgressEvent) {}
}
