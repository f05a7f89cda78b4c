//! Engine finder
//!
//! Runs the multi-source discovery pass: config store first (with
//! revalidation of every cached entry), then registry, environment, and
//! conventional roots, deduplicating candidates and persisting whatever
//! survives version extraction.

use crate::events::DiscoveryEvent;
use crate::sources;
use crate::validate::is_valid_installation;
use crate::version::{extract_version, normalize_root};
use brokkr_core::config::{EngineMap, EngineStore};
use brokkr_core::utils::forward_slashes;
use brokkr_core::LogLevel;
use camino::Utf8PathBuf;
use std::collections::BTreeSet;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

/// Finds installed engines and owns the persisted version -> path mapping
pub struct EngineFinder {
    store: EngineStore,
    search_roots: Vec<Utf8PathBuf>,
    events: Option<UnboundedSender<DiscoveryEvent>>,
}

impl EngineFinder {
    /// Create a finder over the given config store
    pub fn new(store: EngineStore) -> Self {
        Self {
            store,
            search_roots: sources::standard_roots(),
            events: None,
        }
    }

    /// Publish discovery events to the given channel
    pub fn with_events(mut self, events: UnboundedSender<DiscoveryEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Replace the conventional installation roots scanned by the
    /// filesystem source
    pub fn with_search_roots(mut self, roots: Vec<Utf8PathBuf>) -> Self {
        self.search_roots = roots;
        self
    }

    /// The config store backing this finder
    pub fn store(&self) -> &EngineStore {
        &self.store
    }

    fn emit(&self, level: LogLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            LogLevel::Error | LogLevel::Warning => warn!("{}", message),
            LogLevel::Success => info!("{}", message),
            LogLevel::Info => debug!("{}", message),
        }
        if let Some(events) = &self.events {
            let _ = events.send(DiscoveryEvent::Log { level, message });
        }
    }

    /// Find all installed engines
    ///
    /// With `force_rescan` unset, a non-empty config store whose entries
    /// still validate is returned as-is without scanning. A fresh scan
    /// queries registry, environment, and conventional roots in that
    /// order; `stop_on_first` short-circuits at the first source that
    /// yields a hit. An empty result is a valid terminal state and leaves
    /// the config store untouched.
    pub fn find_all(&self, stop_on_first: bool, force_rescan: bool) -> EngineMap {
        self.emit(
            LogLevel::Info,
            "Starting search for installed Unreal Engine instances...",
        );

        if force_rescan {
            self.emit(
                LogLevel::Info,
                "Forced rescan requested. Ignoring configuration file.",
            );
        } else {
            let saved = self.store.load();
            if !saved.is_empty() {
                self.emit(
                    LogLevel::Success,
                    "Unreal Engine paths loaded from configuration",
                );

                let mut valid = EngineMap::new();
                for (version, path) in saved {
                    if path.exists() && is_valid_installation(&path) {
                        valid.insert(version, path);
                    } else {
                        self.emit(
                            LogLevel::Warning,
                            format!(
                                "Engine version {} at path {} is no longer valid or complete",
                                version, path
                            ),
                        );
                    }
                }

                if !valid.is_empty() {
                    self.finish(&valid);
                    return valid;
                }
                self.emit(
                    LogLevel::Warning,
                    "Saved paths are invalid, performing new search",
                );
            }
        }

        let mut candidates: BTreeSet<Utf8PathBuf> = BTreeSet::new();

        let registry_hits = self.find_in_registry();
        if stop_on_first && !registry_hits.is_empty() {
            return self.process_candidates([registry_hits[0].clone()].into());
        }
        candidates.extend(registry_hits);

        let env_hits = self.find_in_environment();
        if stop_on_first && !env_hits.is_empty() {
            return self.process_candidates([env_hits[0].clone()].into());
        }
        candidates.extend(env_hits);

        let standard_hits = self.find_in_standard_paths();
        if stop_on_first && !standard_hits.is_empty() {
            return self.process_candidates([standard_hits[0].clone()].into());
        }
        candidates.extend(standard_hits);

        if candidates.is_empty() {
            self.emit(
                LogLevel::Info,
                "Quick search methods failed to find Unreal Engine installations.",
            );
            self.emit(LogLevel::Info, "Manual entry will be required.");
            let empty = EngineMap::new();
            self.finish(&empty);
            return empty;
        }

        self.process_candidates(candidates)
    }

    /// Merge manually supplied records into the persisted mapping
    ///
    /// Manual-entry flows read the current mapping, merge their additions
    /// (last writer wins per version), and delegate the save back here so
    /// the store keeps a single writer.
    pub fn save_merged(&self, additions: EngineMap) -> brokkr_core::Result<EngineMap> {
        let mut merged = self.store.load();
        for (version, path) in additions {
            merged.insert(version, canonical(&path));
        }
        self.store.save(&merged)?;
        Ok(merged)
    }

    fn find_in_registry(&self) -> Vec<Utf8PathBuf> {
        self.emit(LogLevel::Info, "Starting Unreal Engine search in registry...");

        let mut found = Vec::new();
        for path in sources::registry_install_dirs() {
            if path.exists() && is_valid_installation(&path) {
                self.emit(
                    LogLevel::Success,
                    format!("Unreal Engine found in registry: {}", path),
                );
                found.push(path);
            }
        }

        if found.is_empty() {
            self.emit(LogLevel::Info, "Unreal Engine not found in registry.");
        }
        found
    }

    fn find_in_environment(&self) -> Vec<Utf8PathBuf> {
        self.emit(LogLevel::Info, "Checking environment variables...");

        let mut found = Vec::new();
        for path in sources::environment_candidates() {
            if path.exists() && is_valid_installation(&path) {
                self.emit(
                    LogLevel::Success,
                    format!("Unreal Engine found through environment variables: {}", path),
                );
                found.push(path);
            }
        }

        if found.is_empty() {
            self.emit(
                LogLevel::Info,
                "Unreal Engine not found in environment variables.",
            );
        }
        found
    }

    fn find_in_standard_paths(&self) -> Vec<Utf8PathBuf> {
        self.emit(LogLevel::Info, "Searching standard installation paths...");

        let mut found = Vec::new();
        for base in &self.search_roots {
            if !base.exists() {
                continue;
            }
            match base.read_dir_utf8() {
                Ok(entries) => {
                    for entry in entries.flatten() {
                        let path = entry.path().to_owned();
                        if is_valid_installation(&path) {
                            self.emit(
                                LogLevel::Success,
                                format!("Unreal Engine found: {}", path),
                            );
                            found.push(path);
                        }
                    }
                }
                // Permission problems on one root never abort the scan
                Err(e) => self.emit(LogLevel::Warning, format!("Error accessing {}: {}", base, e)),
            }
        }

        if found.is_empty() {
            self.emit(LogLevel::Info, "Unreal Engine not found in standard paths.");
        }
        found
    }

    /// Extract versions, persist survivors, and report
    fn process_candidates(&self, candidates: BTreeSet<Utf8PathBuf>) -> EngineMap {
        let mut result = EngineMap::new();

        for path in candidates {
            match extract_version(&path) {
                Some(version) => {
                    let root = canonical(&normalize_root(&path));
                    self.emit(
                        LogLevel::Success,
                        format!("Found Unreal Engine version {}: {}", version, root),
                    );
                    result.insert(version, root);
                }
                None => {
                    self.emit(
                        LogLevel::Warning,
                        format!("Could not determine engine version for {}, skipping", path),
                    );
                }
            }
        }

        if !result.is_empty() {
            if let Err(e) = self.store.save(&result) {
                self.emit(
                    LogLevel::Error,
                    format!("Error saving engine configuration: {}", e),
                );
            }
        }

        self.finish(&result);
        result
    }

    fn finish(&self, engines: &EngineMap) {
        if let Some(events) = &self.events {
            let _ = events.send(DiscoveryEvent::Finished {
                engines: engines.clone(),
            });
        }
    }
}

/// Canonical stored form: forward slashes throughout
fn canonical(path: &Utf8PathBuf) -> Utf8PathBuf {
    Utf8PathBuf::from(forward_slashes(path.as_str()))
}
