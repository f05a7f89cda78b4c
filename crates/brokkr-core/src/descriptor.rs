//! Plugin descriptor (.uplugin) parsing
//!
//! The descriptor is externally produced and read-only to Brokkr. It is
//! re-read from disk on every access so edits between builds are seen.

use crate::error::{Error, Result};
use camino::Utf8Path;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;

/// A module entry inside a `.uplugin` descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginModule {
    #[serde(rename = "Name", default)]
    pub name: String,
}

/// Parsed `.uplugin` descriptor
///
/// Missing keys default to empty values; the upstream format treats every
/// field as optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginDescriptor {
    #[serde(rename = "FriendlyName", default)]
    pub friendly_name: String,

    /// Upstream writes this as either a number or a string
    #[serde(
        rename = "Version",
        default = "default_version",
        deserialize_with = "version_as_string"
    )]
    pub version: String,

    #[serde(rename = "Description", default)]
    pub description: String,

    #[serde(rename = "Category", default)]
    pub category: String,

    #[serde(rename = "Modules", default)]
    pub modules: Vec<PluginModule>,

    /// Pinned engine version; non-empty marks an engine plugin
    #[serde(rename = "EngineVersion", default)]
    pub engine_version: String,

    #[serde(rename = "MarketplaceURL", default)]
    pub marketplace_url: String,

    #[serde(rename = "SupportedTargetPlatforms", default)]
    pub supported_platforms: Vec<String>,
}

fn default_version() -> String {
    "0".to_string()
}

fn version_as_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Null => default_version(),
        other => other.to_string(),
    })
}

impl PluginDescriptor {
    /// Read and parse a descriptor file
    ///
    /// Malformed JSON is an `InvalidDescriptor` error; callers degrade to
    /// "no descriptor" rather than propagating a parse failure.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::descriptor_not_found(path.as_str()));
        }

        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| Error::invalid_descriptor(path.as_str(), e.to_string()))
    }

    /// True iff the descriptor pins an engine version
    pub fn is_engine_plugin(&self) -> bool {
        !self.engine_version.is_empty()
    }

    /// Names of the modules the plugin declares
    pub fn module_names(&self) -> Vec<&str> {
        self.modules.iter().map(|m| m.name.as_str()).collect()
    }

    /// `major.minor` of the pinned engine version, when present
    ///
    /// `"5.3.0"` and `"5.3"` both yield `"5.3"`; used to warn when the
    /// build targets a different engine than the descriptor pins.
    pub fn engine_major_minor(&self) -> Option<String> {
        if self.engine_version.is_empty() {
            return None;
        }
        let mut parts = self.engine_version.split('.');
        match (parts.next(), parts.next()) {
            (Some(major), Some(minor)) => Some(format!("{}.{}", major, minor)),
            _ => Some(self.engine_version.clone()),
        }
    }
}
