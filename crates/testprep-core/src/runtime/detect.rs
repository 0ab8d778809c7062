//! Tech stack and package manager detection

use super::exec::CommandExecutor;
use super::version::{self, NpmQuery, PnpmQuery, VersionQuery, YarnQuery};
use crate::context::RunContext;
use crate::error::SetupError;
use crate::manifest::ProjectManifest;
use std::fmt;

/// Package whose installed version is reported for a recognized stack.
/// Vue projects are probed for it too.
pub const VERSION_PROBE_PACKAGE: &str = "react";

/// Package managers, in lockfile precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    Npm,
    Pnpm,
    Yarn,
}

impl PackageManager {
    /// Lockfiles checked during detection; the first one present wins
    const BY_LOCKFILE: [PackageManager; 2] = [PackageManager::Yarn, PackageManager::Pnpm];

    pub fn name(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
        }
    }

    pub fn lockfile(&self) -> &'static str {
        match self {
            PackageManager::Npm => "package-lock.json",
            PackageManager::Pnpm => "pnpm-lock.yaml",
            PackageManager::Yarn => "yarn.lock",
        }
    }

    /// Command that installs everything declared in the manifest
    pub fn install_command(&self) -> String {
        format!("{} install", self.name())
    }

    /// Command that adds `package` as a dev-dependency
    pub fn add_dev_command(&self, package: &str) -> String {
        match self {
            PackageManager::Npm => format!("npm install --save-dev {}", package),
            PackageManager::Yarn => format!("yarn add --dev {}", package),
            PackageManager::Pnpm => format!("pnpm add --save-dev {}", package),
        }
    }

    /// Command that runs a manifest script
    pub fn run_script_command(&self, script: &str) -> String {
        match self {
            PackageManager::Npm if script == "test" => "npm test".to_string(),
            PackageManager::Npm => format!("npm run {}", script),
            PackageManager::Pnpm => format!("pnpm {}", script),
            PackageManager::Yarn => format!("yarn {}", script),
        }
    }

    /// Version listing strategy for this manager's output format
    pub fn version_query(&self) -> &'static dyn VersionQuery {
        match self {
            PackageManager::Npm => &NpmQuery,
            PackageManager::Pnpm => &PnpmQuery,
            PackageManager::Yarn => &YarnQuery,
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Front-end framework family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TechStack {
    React,
    Vue,
    Unknown,
}

impl TechStack {
    pub fn display_name(&self) -> &'static str {
        match self {
            TechStack::React => "react",
            TechStack::Vue => "vue",
            TechStack::Unknown => "unknown",
        }
    }

    /// Infer the stack from declared dependencies; react wins over vue
    pub fn from_manifest(manifest: &ProjectManifest) -> Self {
        if manifest.declares("react") {
            TechStack::React
        } else if manifest.declares("vue") {
            TechStack::Vue
        } else {
            TechStack::Unknown
        }
    }
}

impl fmt::Display for TechStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Detected stack plus the installed version, when it could be resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackInfo {
    pub stack: TechStack,
    pub version: Option<String>,
}

impl fmt::Display for StackInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{} ({})", self.stack, version),
            None => write!(f, "{}", self.stack),
        }
    }
}

/// Detect the package manager from lockfiles in the project directory
///
/// yarn.lock beats pnpm-lock.yaml; with neither present the answer is npm.
pub async fn detect_package_manager(ctx: &RunContext) -> Result<PackageManager, SetupError> {
    for manager in PackageManager::BY_LOCKFILE {
        let lockfile = ctx.join(manager.lockfile());
        let exists = tokio::fs::try_exists(&lockfile)
            .await
            .map_err(|e| SetupError::io(&lockfile, e))?;
        if exists {
            return Ok(manager);
        }
    }

    Ok(PackageManager::Npm)
}

/// Detect the tech stack and, for a recognized one, its installed version
///
/// An unknown stack is returned as-is without running any command; callers
/// decide whether that is fatal.
pub async fn detect_tech_stack(
    manifest: &ProjectManifest,
    ctx: &RunContext,
    executor: &dyn CommandExecutor,
) -> Result<StackInfo, SetupError> {
    let stack = TechStack::from_manifest(manifest);
    if stack == TechStack::Unknown {
        return Ok(StackInfo {
            stack,
            version: None,
        });
    }

    let manager = detect_package_manager(ctx).await?;
    let version = version::resolve_version(executor, ctx, manager, VERSION_PROBE_PACKAGE).await;

    Ok(StackInfo { stack, version })
}
