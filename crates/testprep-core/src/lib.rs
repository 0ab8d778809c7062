//! testprep Core - make an existing JavaScript project test-ready
//!
//! This library inspects a project's `package.json` and lockfiles to work out
//! its tech stack and package manager, then drives the setup stages that
//! install jest, add a `test` script and write a `jest.config.js`.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Manifest reading/merging, stack and package manager
//!   detection, version lookup, shell command execution
//! - **Layer 2: Orchestration** - `SetupOrchestrator`, which sequences the stages with
//!   fail-fast semantics and reports through a `ProgressSink`
//! - **Layer 3: Terminal Rendering** - Optional cliclack spinners (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based spinner sink
//!
//! # Example Usage
//!
//! ```ignore
//! use testprep_core::{LogProgress, RunContext, SetupOrchestrator, ShellExecutor};
//!
//! let ctx = RunContext::resolve(&std::env::current_dir()?, None)?;
//! let summary = SetupOrchestrator::new(ctx, &ShellExecutor, &LogProgress)
//!     .run()
//!     .await?;
//! println!("{} project ready", summary.stack);
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod progress;
pub mod runtime;
pub mod setup;
pub mod update;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export main types for convenience
pub use context::RunContext;
pub use error::SetupError;
pub use manifest::ProjectManifest;
pub use progress::{LogProgress, NoOpProgress, ProgressEvent, ProgressSink, Stage};
pub use runtime::{
    CommandExecutor, PackageManager, ShellExecutor, StackInfo, TechStack, VersionQuery,
};
pub use setup::{RunState, RunSummary, SetupOrchestrator, StageFailure};

#[cfg(feature = "tui")]
pub use tui::SpinnerProgress;
