//! # brokkr-discovery
//!
//! Locates installed Unreal Engine SDKs across the platform registry, the
//! process environment, and conventional installation roots; validates each
//! candidate structurally; extracts a version identifier; and persists the
//! resulting version -> path mapping through the engine config store.

pub mod events;
pub mod finder;
pub mod sources;
pub mod validate;
pub mod version;

pub use events::DiscoveryEvent;
pub use finder::EngineFinder;
pub use validate::{is_valid_installation, uat_path};
pub use version::{extract_version, normalize_root};
