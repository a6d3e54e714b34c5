//! On-disk plugin descriptors.
//!
//! A plugin directory is eligible for loading when it contains a
//! `manifest.json` that parses and carries a non-empty `id` and `name`.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Parsed `manifest.json` for a single plugin directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginManifest {
    /// Stable identifier, used for route and asset namespaces.
    pub id: String,
    /// Human-readable display name.
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// UI extension points the plugin claims to decorate. Informational
    /// only; the authoritative set is whatever the implementation
    /// registers at load time.
    #[serde(default)]
    pub hooks: Vec<String>,
}

impl PluginManifest {
    pub fn version_label(&self) -> &str {
        self.version.as_deref().unwrap_or("0.0.0")
    }
}

/// Why a plugin directory was passed over during loading.
#[derive(Debug)]
pub enum SkipReason {
    /// The directory has no `manifest.json`.
    MissingManifest,
    /// `manifest.json` exists but is not valid JSON for a manifest.
    InvalidManifest(serde_json::Error),
    /// The manifest parsed but `id` or `name` is empty.
    IncompleteManifest,
    /// No compiled-in implementation is registered for the manifest id.
    UnregisteredId(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingManifest => write!(f, "no manifest.json found"),
            SkipReason::InvalidManifest(err) => write!(f, "manifest.json is invalid: {err}"),
            SkipReason::IncompleteManifest => {
                write!(f, "manifest.json must declare a non-empty id and name")
            }
            SkipReason::UnregisteredId(id) => {
                write!(f, "no server module registered for plugin id '{id}'")
            }
        }
    }
}

/// Reads and validates the descriptor for one plugin directory.
pub fn read_manifest(dir: &Path) -> Result<PluginManifest, SkipReason> {
    let manifest_path = dir.join("manifest.json");
    if !manifest_path.is_file() {
        return Err(SkipReason::MissingManifest);
    }
    let raw = fs::read_to_string(&manifest_path).map_err(|_| SkipReason::MissingManifest)?;
    let manifest: PluginManifest =
        serde_json::from_str(&raw).map_err(SkipReason::InvalidManifest)?;
    if manifest.id.trim().is_empty() || manifest.name.trim().is_empty() {
        return Err(SkipReason::IncompleteManifest);
    }
    Ok(manifest)
}
