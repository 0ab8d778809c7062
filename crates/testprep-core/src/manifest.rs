//! Project manifest (package.json) reading and script merging

use crate::context::RunContext;
use crate::error::SetupError;
use serde::de::Error as _;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;

/// Manifest file name inside the project directory
pub const MANIFEST_FILE: &str = "package.json";

/// The parts of package.json the setup run cares about
///
/// Every field is optional: an absent section is `None`, which is not the
/// same as an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectManifest {
    #[serde(default)]
    pub dependencies: Option<BTreeMap<String, String>>,

    #[serde(default)]
    pub dev_dependencies: Option<BTreeMap<String, String>>,

    #[serde(default)]
    pub scripts: Option<BTreeMap<String, String>>,
}

impl ProjectManifest {
    /// Whether `name` is declared as a dependency or a dev-dependency
    pub fn declares(&self, name: &str) -> bool {
        let declared_in = |section: &Option<BTreeMap<String, String>>| {
            section
                .as_ref()
                .is_some_and(|deps| deps.contains_key(name))
        };

        declared_in(&self.dependencies) || declared_in(&self.dev_dependencies)
    }
}

/// Read and parse `<base_dir>/package.json`
pub async fn read(ctx: &RunContext) -> Result<ProjectManifest, SetupError> {
    let path = ctx.join(MANIFEST_FILE);
    let content = read_manifest_file(&path).await?;
    serde_json::from_str(&content).map_err(|source| SetupError::ManifestParse { path, source })
}

/// Merge `additions` into the manifest's `scripts` and write it back
///
/// Existing scripts keep their position; keys present in `additions` take the
/// new command. All other manifest fields are written back untouched and in
/// their original order.
pub async fn merge_scripts(ctx: &RunContext, additions: &[(&str, &str)]) -> Result<(), SetupError> {
    let path = ctx.join(MANIFEST_FILE);
    let content = read_manifest_file(&path).await?;

    let mut document: Map<String, Value> =
        serde_json::from_str(&content).map_err(|source| SetupError::ManifestParse {
            path: path.clone(),
            source,
        })?;

    let scripts = document
        .entry("scripts")
        .or_insert_with(|| Value::Object(Map::new()));
    if scripts.is_null() {
        *scripts = Value::Object(Map::new());
    }
    let Value::Object(scripts) = scripts else {
        return Err(SetupError::ManifestParse {
            path,
            source: serde_json::Error::custom("`scripts` must be an object"),
        });
    };

    for (name, command) in additions {
        scripts.insert((*name).to_string(), Value::String((*command).to_string()));
    }

    write_manifest_file(&path, &document).await
}

/// Read the manifest text, dropping a leading UTF-8 byte order mark
async fn read_manifest_file(path: &Path) -> Result<String, SetupError> {
    match fs::read_to_string(path).await {
        Ok(content) => Ok(match content.strip_prefix('\u{feff}') {
            Some(stripped) => stripped.to_string(),
            None => content,
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(SetupError::ManifestNotFound {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(SetupError::io(path, e)),
    }
}

async fn write_manifest_file(path: &Path, document: &Map<String, Value>) -> Result<(), SetupError> {
    let mut rendered =
        serde_json::to_string_pretty(document).map_err(|source| SetupError::ManifestWrite {
            path: path.to_path_buf(),
            source,
        })?;
    rendered.push('\n');

    fs::write(path, rendered)
        .await
        .map_err(|e| SetupError::io(path, e))
}
