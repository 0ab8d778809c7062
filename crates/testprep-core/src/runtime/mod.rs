//! Project environment inspection and external commands
//!
//! This module provides:
//! - Package manager detection from lockfiles
//! - Tech stack detection from declared dependencies
//! - Installed-version lookup per package manager
//! - The shell command executor used by every install step

pub mod detect;
pub mod exec;
pub mod version;

pub use detect::{
    detect_package_manager, detect_tech_stack, PackageManager, StackInfo, TechStack,
    VERSION_PROBE_PACKAGE,
};
pub use exec::{CommandExecutor, ShellExecutor};
pub use version::{resolve_version, NpmQuery, PnpmQuery, VersionQuery, YarnQuery};
