//! Shared utility functions for Brokkr crates

use anyhow::anyhow;
use camino::{Utf8Path, Utf8PathBuf};

/// Get the user's home directory
///
/// Prefers the HOME environment variable over dirs::home_dir() so that
/// shell-level overrides (containers, test harnesses) are respected.
pub fn get_home_dir() -> anyhow::Result<Utf8PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        return Ok(Utf8PathBuf::from(home));
    }

    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Utf8PathBuf::from_path_buf(home).map_err(|p| anyhow!("Home directory is not UTF-8: {:?}", p))
}

/// Normalize a path string to forward slashes
///
/// The canonical form for persisted and displayed engine/output paths.
pub fn forward_slashes(path: &str) -> String {
    path.replace('\\', "/")
}

/// Check whether a directory accepts new files
///
/// Probes by creating an unnamed temporary file; a metadata-only check
/// misreports writability on Unix ACLs and on network shares.
pub fn dir_is_writable(dir: &Utf8Path) -> bool {
    dir.is_dir() && tempfile::tempfile_in(dir).is_ok()
}
