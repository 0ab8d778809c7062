//! Setup orchestration: the `init` pipeline
//!
//! Runs the stages in a fixed order, each only after the previous one
//! succeeded:
//!
//! ```text
//! START → MANIFEST_READ → DEPS_INSTALLED → STACK_DETECTED → PKGMGR_DETECTED
//!       → TESTFW_INSTALLED → SCRIPTS_MERGED → CONFIG_WRITTEN → DONE
//! ```
//!
//! The first failing stage reports `operation failed: <reason>` to the
//! progress sink and moves the run to `FAILED`. Completed stages are not
//! rolled back.

use crate::config::{self, TEST_FRAMEWORK_PACKAGE, TEST_SCRIPT};
use crate::context::RunContext;
use crate::error::SetupError;
use crate::manifest;
use crate::progress::{ProgressEvent, ProgressSink, Stage};
use crate::runtime::{self, CommandExecutor, PackageManager, StackInfo, TechStack};
use std::future::Future;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Lifecycle of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Start,
    ManifestRead,
    DepsInstalled,
    StackDetected,
    PkgMgrDetected,
    TestFwInstalled,
    ScriptsMerged,
    ConfigWritten,
    Done,
    Failed,
}

impl Stage {
    /// State entered when this stage succeeds
    pub fn completes(&self) -> RunState {
        match self {
            Stage::ReadManifest => RunState::ManifestRead,
            Stage::InstallDependencies => RunState::DepsInstalled,
            Stage::DetectStack => RunState::StackDetected,
            Stage::DetectPackageManager => RunState::PkgMgrDetected,
            Stage::InstallTestFramework => RunState::TestFwInstalled,
            Stage::MergeScripts => RunState::ScriptsMerged,
            Stage::WriteConfig => RunState::ConfigWritten,
        }
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub stack: StackInfo,
    pub package_manager: PackageManager,
    pub config_path: PathBuf,
}

/// The first stage that failed, and why
#[derive(Debug, Error)]
#[error("{stage} failed: {source}")]
pub struct StageFailure {
    pub stage: Stage,
    /// Last state successfully entered before the failure
    pub reached: RunState,
    #[source]
    pub source: SetupError,
}

/// Drives one `init` run against a project directory
///
/// `run` consumes the orchestrator, so an instance serves exactly one run.
pub struct SetupOrchestrator<'a> {
    ctx: RunContext,
    executor: &'a dyn CommandExecutor,
    progress: &'a dyn ProgressSink,
}

impl<'a> SetupOrchestrator<'a> {
    pub fn new(
        ctx: RunContext,
        executor: &'a dyn CommandExecutor,
        progress: &'a dyn ProgressSink,
    ) -> Self {
        Self {
            ctx,
            executor,
            progress,
        }
    }

    /// Run every stage in order, stopping at the first failure
    pub async fn run(self) -> Result<RunSummary, StageFailure> {
        let mut state = RunState::Start;
        let ctx = &self.ctx;

        let manifest = self
            .step(&mut state, Stage::ReadManifest, manifest::read(ctx), |_| {
                "Found package.json".to_string()
            })
            .await?;

        self.step(
            &mut state,
            Stage::InstallDependencies,
            self.install_dependencies(),
            |_| "Dependencies installed".to_string(),
        )
        .await?;

        let stack = self
            .step(
                &mut state,
                Stage::DetectStack,
                self.detect_stack(&manifest),
                |info| format!("Tech stack: {}", info),
            )
            .await?;

        let package_manager = self
            .step(
                &mut state,
                Stage::DetectPackageManager,
                runtime::detect_package_manager(ctx),
                |manager| format!("Package manager: {}", manager),
            )
            .await?;

        let install_jest = package_manager.add_dev_command(TEST_FRAMEWORK_PACKAGE);
        self.step(
            &mut state,
            Stage::InstallTestFramework,
            self.executor.run(&install_jest, ctx.base_dir()),
            |_| format!("Installed {}", TEST_FRAMEWORK_PACKAGE),
        )
        .await?;

        self.step(
            &mut state,
            Stage::MergeScripts,
            manifest::merge_scripts(ctx, &[TEST_SCRIPT]),
            |_| format!("Added \"{}\": \"{}\" to scripts", TEST_SCRIPT.0, TEST_SCRIPT.1),
        )
        .await?;

        let config_path = self
            .step(
                &mut state,
                Stage::WriteConfig,
                config::write_config(ctx),
                |_| format!("Wrote {}", config::CONFIG_FILE),
            )
            .await?;

        transition(&mut state, RunState::Done);

        Ok(RunSummary {
            stack,
            package_manager,
            config_path,
        })
    }

    async fn install_dependencies(&self) -> Result<String, SetupError> {
        let manager = runtime::detect_package_manager(&self.ctx).await?;
        self.executor
            .run(&manager.install_command(), self.ctx.base_dir())
            .await
    }

    async fn detect_stack(
        &self,
        manifest: &manifest::ProjectManifest,
    ) -> Result<StackInfo, SetupError> {
        let info = runtime::detect_tech_stack(manifest, &self.ctx, self.executor).await?;
        if info.stack == TechStack::Unknown {
            return Err(SetupError::UnrecognizedStack);
        }
        Ok(info)
    }

    /// Run one stage, reporting its start and outcome
    async fn step<T, F>(
        &self,
        state: &mut RunState,
        stage: Stage,
        work: F,
        describe: impl FnOnce(&T) -> String,
    ) -> Result<T, StageFailure>
    where
        F: Future<Output = Result<T, SetupError>>,
    {
        self.progress.on_event(&ProgressEvent::StageStarted { stage });

        match work.await {
            Ok(value) => {
                let detail = describe(&value);
                self.progress
                    .on_event(&ProgressEvent::StageSucceeded { stage, detail });
                transition(state, stage.completes());
                Ok(value)
            }
            Err(source) => {
                self.progress.on_event(&ProgressEvent::StageFailed {
                    stage,
                    message: format!("operation failed: {}", source),
                });
                let reached = *state;
                transition(state, RunState::Failed);
                Err(StageFailure {
                    stage,
                    reached,
                    source,
                })
            }
        }
    }
}

fn transition(state: &mut RunState, next: RunState) {
    debug!(from = ?*state, to = ?next, "Run state transition");
    *state = next;
}
