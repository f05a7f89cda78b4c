//! Shared command helpers

use anyhow::anyhow;
use brokkr_core::config::{EngineMap, EngineStore};
use brokkr_discovery::EngineFinder;
use camino::{Utf8Path, Utf8PathBuf};

/// Open the engine store at the `--config` override or the default path
pub fn store_from(config: Option<&Utf8Path>) -> anyhow::Result<EngineStore> {
    match config {
        Some(path) => Ok(EngineStore::new(path.to_owned())),
        None => EngineStore::open_default(),
    }
}

/// Load the validated engine mapping on a worker thread
///
/// The scan touches the registry and filesystem; keeping it off the
/// runtime thread keeps the interactive surface responsive.
pub async fn load_engines(store: EngineStore, force_rescan: bool) -> anyhow::Result<EngineMap> {
    let finder = EngineFinder::new(store);
    let engines =
        tokio::task::spawn_blocking(move || finder.find_all(false, force_rescan)).await?;
    Ok(engines)
}

/// Resolve a configured engine version to its installation root
///
/// Accepts the bare version or the `UE_`-prefixed display form.
pub fn resolve_engine(engines: &EngineMap, version: &str) -> anyhow::Result<Utf8PathBuf> {
    let version = version.strip_prefix("UE_").unwrap_or(version);
    engines.get(version).cloned().ok_or_else(|| {
        anyhow!(
            "Engine version {} is not configured. Run `brokkr discover` or add it with `brokkr engine add`.",
            version
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_engine_strips_display_prefix() {
        let mut engines = EngineMap::new();
        engines.insert("5.3".to_string(), Utf8PathBuf::from("/Engines/UE_5.3"));

        assert_eq!(
            resolve_engine(&engines, "UE_5.3").unwrap().as_str(),
            "/Engines/UE_5.3"
        );
        assert_eq!(
            resolve_engine(&engines, "5.3").unwrap().as_str(),
            "/Engines/UE_5.3"
        );
        assert!(resolve_engine(&engines, "5.1").is_err());
    }

    #[test]
    fn test_store_from_override() {
        let store = store_from(Some(Utf8Path::new("/tmp/custom.json"))).unwrap();
        assert_eq!(store.path().as_str(), "/tmp/custom.json");
    }
}
