//! Jest config materialization

use crate::context::RunContext;
use crate::error::SetupError;
use std::path::PathBuf;
use tokio::fs;

/// Package installed as a dev-dependency
pub const TEST_FRAMEWORK_PACKAGE: &str = "jest";

/// Script merged into the manifest: `scripts.test = "jest"`
pub const TEST_SCRIPT: (&str, &str) = ("test", "jest");

/// Config file written to the project root
pub const CONFIG_FILE: &str = "jest.config.js";

/// Bundled config file contents
pub const CONFIG_TEMPLATE: &str = include_str!("../../templates/jest.config.js");

/// Write the bundled template to `<base_dir>/jest.config.js`
///
/// An existing file is overwritten, never merged.
pub async fn write_config(ctx: &RunContext) -> Result<PathBuf, SetupError> {
    let path = ctx.join(CONFIG_FILE);
    fs::write(&path, CONFIG_TEMPLATE)
        .await
        .map_err(|e| SetupError::io(&path, e))?;
    Ok(path)
}
