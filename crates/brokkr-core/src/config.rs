//! Engine configuration store
//!
//! Persists the version -> installation-path mapping produced by engine
//! discovery. The file is a single JSON object keyed by `unreal_engines`
//! and is always rewritten in full; there are no partial updates.

use crate::error::{Error, Result};
use crate::utils::{dir_is_writable, get_home_dir};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use tracing::{debug, warn};

/// Version -> engine-root mapping, ordered for deterministic output.
pub type EngineMap = BTreeMap<String, Utf8PathBuf>;

const CONFIG_DIR: &str = ".brokkr";
const CONFIG_FILE: &str = "engines.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    unreal_engines: EngineMap,
}

/// On-disk store for discovered engine installations.
///
/// Exclusively owned and written by the discovery engine; manual-entry
/// flows read the current mapping, merge their records, and delegate the
/// save back here.
#[derive(Debug, Clone)]
pub struct EngineStore {
    path: Utf8PathBuf,
}

impl EngineStore {
    /// Create a store backed by an explicit file path
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store at the default location (`~/.brokkr/engines.json`)
    pub fn open_default() -> anyhow::Result<Self> {
        let path = get_home_dir()?.join(CONFIG_DIR).join(CONFIG_FILE);
        Ok(Self::new(path))
    }

    /// Path to the backing file
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Load the persisted mapping
    ///
    /// A missing or malformed file degrades to an empty mapping; both are
    /// logged and neither is an error for callers.
    pub fn load(&self) -> EngineMap {
        if !self.path.exists() {
            debug!("Configuration file not found: {}", self.path);
            return EngineMap::new();
        }

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Error reading configuration file {}: {}", self.path, e);
                return EngineMap::new();
            }
        };

        match serde_json::from_str::<ConfigFile>(&content) {
            Ok(config) => {
                debug!("Configuration file loaded: {}", self.path);
                config.unreal_engines
            }
            Err(e) => {
                warn!("Error parsing configuration file {}: {}", self.path, e);
                EngineMap::new()
            }
        }
    }

    /// Replace the persisted mapping in full
    ///
    /// Creates the parent directory when missing. Fails with
    /// `PermissionDenied` when the directory rejects new files.
    pub fn save(&self, engines: &EngineMap) -> Result<()> {
        let dir = self
            .path
            .parent()
            .ok_or_else(|| Error::invalid_config("config path has no parent directory"))?;

        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
        if !dir_is_writable(dir) {
            return Err(Error::permission_denied(dir.as_str()));
        }

        let config = ConfigFile {
            unreal_engines: engines.clone(),
        };
        let content = serde_json::to_string_pretty(&config)?;
        fs::write(&self.path, content)?;
        debug!("Engine paths saved to {}", self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(temp: &TempDir) -> EngineStore {
        let path = Utf8PathBuf::from_path_buf(temp.path().join("engines.json")).unwrap();
        EngineStore::new(path)
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        let mut engines = EngineMap::new();
        engines.insert("5.3".to_string(), Utf8PathBuf::from("/Engines/UE_5.3"));
        engines.insert("4.27".to_string(), Utf8PathBuf::from("/Engines/UE_4.27"));

        store.save(&engines).unwrap();
        assert_eq!(store.load(), engines);
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let temp = TempDir::new().unwrap();
        let path =
            Utf8PathBuf::from_path_buf(temp.path().join("nested/dir/engines.json")).unwrap();
        let store = EngineStore::new(path);

        let mut engines = EngineMap::new();
        engines.insert("5.3".to_string(), Utf8PathBuf::from("/Engines/UE_5.3"));
        store.save(&engines).unwrap();
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn test_load_malformed_json_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        fs::write(store.path(), "{ not json").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_rewrites_in_full() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        let mut first = EngineMap::new();
        first.insert("5.1".to_string(), Utf8PathBuf::from("/Engines/UE_5.1"));
        first.insert("5.2".to_string(), Utf8PathBuf::from("/Engines/UE_5.2"));
        store.save(&first).unwrap();

        let mut second = EngineMap::new();
        second.insert("5.3".to_string(), Utf8PathBuf::from("/Engines/UE_5.3"));
        store.save(&second).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert!(loaded.contains_key("5.3"));
    }

    #[test]
    fn test_unknown_top_level_keys_ignored() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        fs::write(
            store.path(),
            r#"{"unreal_engines": {"5.3": "/Engines/UE_5.3"}, "other": 1}"#,
        )
        .unwrap();
        let loaded = store.load();
        assert_eq!(
            loaded.get("5.3").map(|p| p.as_str()),
            Some("/Engines/UE_5.3")
        );
    }
}
