//! Installed-version lookup through the active package manager
//!
//! Each manager prints `list --json` output in its own shape, so each gets
//! its own [`VersionQuery`]. A lookup that fails for any reason is logged and
//! reported as "no version"; it never fails the caller.

use super::detect::PackageManager;
use super::exec::CommandExecutor;
use crate::context::RunContext;
use crate::error::SetupError;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

/// How to ask one package manager for an installed version
pub trait VersionQuery: Send + Sync {
    /// Command listing `package` at depth 0 as JSON
    fn list_command(&self, package: &str) -> String;

    /// Extract the version of `package` from the listing output
    fn parse_version(&self, output: &str, package: &str) -> Result<String, String>;
}

#[derive(Debug, Deserialize)]
struct ListedPackage {
    version: String,
}

/// `npm list` / `pnpm list` project entry
#[derive(Debug, Deserialize)]
struct ProjectListing {
    #[serde(default)]
    dependencies: HashMap<String, ListedPackage>,
}

impl ProjectListing {
    fn version_of(mut self, package: &str) -> Result<String, String> {
        self.dependencies
            .remove(package)
            .map(|listed| listed.version)
            .ok_or_else(|| format!("{} is not listed", package))
    }
}

#[derive(Debug, Deserialize)]
struct YarnListing {
    data: YarnListingData,
}

#[derive(Debug, Deserialize)]
struct YarnListingData {
    trees: Vec<YarnTree>,
}

#[derive(Debug, Deserialize)]
struct YarnTree {
    name: String,
}

/// `npm list <pkg> --depth=0 --json` → `{ "dependencies": { pkg: { "version" } } }`
#[derive(Debug, Default, Clone, Copy)]
pub struct NpmQuery;

impl VersionQuery for NpmQuery {
    fn list_command(&self, package: &str) -> String {
        format!("npm list {} --depth=0 --json", package)
    }

    fn parse_version(&self, output: &str, package: &str) -> Result<String, String> {
        let listing: ProjectListing = serde_json::from_str(output).map_err(|e| e.to_string())?;
        listing.version_of(package)
    }
}

/// `pnpm list <pkg> --depth=0 --json` → `[{ "dependencies": { pkg: { "version" } } }]`
#[derive(Debug, Default, Clone, Copy)]
pub struct PnpmQuery;

impl VersionQuery for PnpmQuery {
    fn list_command(&self, package: &str) -> String {
        format!("pnpm list {} --depth=0 --json", package)
    }

    fn parse_version(&self, output: &str, package: &str) -> Result<String, String> {
        let listings: Vec<ProjectListing> =
            serde_json::from_str(output).map_err(|e| e.to_string())?;
        listings
            .into_iter()
            .next()
            .ok_or_else(|| "empty project listing".to_string())?
            .version_of(package)
    }
}

/// `yarn list --pattern <pkg> --depth=0 --json`
///
/// Output shape: `{ "data": { "trees": [{ "name": "pkg@x.y.z" }] } }`
#[derive(Debug, Default, Clone, Copy)]
pub struct YarnQuery;

impl VersionQuery for YarnQuery {
    fn list_command(&self, package: &str) -> String {
        format!("yarn list --pattern {} --depth=0 --json", package)
    }

    fn parse_version(&self, output: &str, _package: &str) -> Result<String, String> {
        let listing: YarnListing = serde_json::from_str(output).map_err(|e| e.to_string())?;
        let tree = listing
            .data
            .trees
            .first()
            .ok_or_else(|| "no matching tree".to_string())?;

        tree.name
            .split('@')
            .nth(1)
            .filter(|version| !version.is_empty())
            .map(str::to_string)
            .ok_or_else(|| format!("no version in tree name `{}`", tree.name))
    }
}

/// Ask `manager` for the installed version of `package`
///
/// Returns `None` (logged at debug level) when the command fails or its
/// output does not have the expected shape.
pub async fn resolve_version(
    executor: &dyn CommandExecutor,
    ctx: &RunContext,
    manager: PackageManager,
    package: &str,
) -> Option<String> {
    match lookup(executor, ctx, manager, package).await {
        Ok(version) => {
            debug!(package, %manager, %version, "Resolved installed version");
            Some(version)
        }
        Err(e) => {
            debug!(package, %manager, error = %e, "Version lookup failed");
            None
        }
    }
}

async fn lookup(
    executor: &dyn CommandExecutor,
    ctx: &RunContext,
    manager: PackageManager,
    package: &str,
) -> Result<String, SetupError> {
    let query = manager.version_query();
    let lookup_error = |reason: String| SetupError::VersionLookup {
        package: package.to_string(),
        reason,
    };

    let output = executor
        .run(&query.list_command(package), ctx.base_dir())
        .await
        .map_err(|e| lookup_error(e.to_string()))?;

    query
        .parse_version(output.trim(), package)
        .map_err(lookup_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubExecutor;

    const NPM_OUTPUT: &str = r#"{
  "version": "0.1.0",
  "name": "app",
  "dependencies": {
    "react": {
      "version": "18.2.0",
      "resolved": "https://registry.npmjs.org/react/-/react-18.2.0.tgz",
      "overridden": false
    }
  }
}"#;

    const PNPM_OUTPUT: &str = r#"[
  {
    "name": "app",
    "version": "0.1.0",
    "path": "/home/dev/app",
    "private": false,
    "dependencies": {
      "react": {
        "from": "react",
        "version": "18.3.1",
        "resolved": "https://registry.npmjs.org/react/-/react-18.3.1.tgz",
        "path": "/home/dev/app/node_modules/.pnpm/react@18.3.1/node_modules/react"
      }
    }
  }
]"#;

    const YARN_OUTPUT: &str = r#"{"type":"tree","data":{"type":"list","trees":[
        {"name":"react@18.2.0","children":[],"hint":null,"color":"bold","depth":0}
    ]}}"#;

    #[test]
    fn test_npm_parse() {
        assert_eq!(
            NpmQuery.parse_version(NPM_OUTPUT, "react").unwrap(),
            "18.2.0"
        );
    }

    #[test]
    fn test_pnpm_parse() {
        assert_eq!(
            PnpmQuery.parse_version(PNPM_OUTPUT, "react").unwrap(),
            "18.3.1"
        );
    }

    #[test]
    fn test_yarn_parse() {
        assert_eq!(
            YarnQuery.parse_version(YARN_OUTPUT, "react").unwrap(),
            "18.2.0"
        );
    }

    #[test]
    fn test_npm_missing_package() {
        let err = NpmQuery
            .parse_version(r#"{ "name": "app" }"#, "react")
            .unwrap_err();
        assert!(err.contains("react"));
    }

    #[test]
    fn test_pnpm_empty_listing() {
        assert!(PnpmQuery.parse_version("[]", "react").is_err());
    }

    #[test]
    fn test_yarn_no_trees() {
        let output = r#"{"type":"tree","data":{"type":"list","trees":[]}}"#;
        assert!(YarnQuery.parse_version(output, "react").is_err());
    }

    #[test]
    fn test_malformed_output() {
        assert!(NpmQuery.parse_version("npm ERR! code ELSPROBLEMS", "react").is_err());
    }

    #[test]
    fn test_list_commands() {
        assert_eq!(
            PackageManager::Npm.version_query().list_command("react"),
            "npm list react --depth=0 --json"
        );
        assert_eq!(
            PackageManager::Pnpm.version_query().list_command("react"),
            "pnpm list react --depth=0 --json"
        );
        assert_eq!(
            PackageManager::Yarn.version_query().list_command("react"),
            "yarn list --pattern react --depth=0 --json"
        );
    }

    #[tokio::test]
    async fn test_resolve_version_through_executor() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = RunContext::new(dir.path());
        let executor = StubExecutor::new().respond("pnpm list react", PNPM_OUTPUT);

        let version = resolve_version(&executor, &ctx, PackageManager::Pnpm, "react").await;
        assert_eq!(version.as_deref(), Some("18.3.1"));
    }

    #[tokio::test]
    async fn test_resolve_version_degrades_on_command_failure() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = RunContext::new(dir.path());
        let executor = StubExecutor::new().fail("npm list", 1);

        let version = resolve_version(&executor, &ctx, PackageManager::Npm, "react").await;
        assert_eq!(version, None);
    }

    #[tokio::test]
    async fn test_resolve_version_degrades_on_bad_output() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = RunContext::new(dir.path());
        let executor = StubExecutor::new().respond("yarn list", "not json");

        let version = resolve_version(&executor, &ctx, PackageManager::Yarn, "react").await;
        assert_eq!(version, None);
    }
}
