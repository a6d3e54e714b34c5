use std::path::PathBuf;

use serde::Serialize;

/// Metadata for a plugin that survived validation and initialization.
#[derive(Debug, Clone, Serialize)]
pub struct LoadedPlugin {
    pub id: String,
    pub name: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub hooks: Vec<String>,
    #[serde(skip)]
    pub path: PathBuf,
    pub enabled: bool,
}

/// All plugins mounted during startup. Built once by the loader and
/// read-only afterwards.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    plugins: Vec<LoadedPlugin>,
}

impl PluginRegistry {
    pub(crate) fn record(&mut self, plugin: LoadedPlugin) {
        self.plugins.push(plugin);
    }

    pub fn list(&self) -> &[LoadedPlugin] {
        &self.plugins
    }

    pub fn get(&self, id: &str) -> Option<&LoadedPlugin> {
        self.plugins.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn count(&self) -> usize {
        self.plugins.len()
    }
}
