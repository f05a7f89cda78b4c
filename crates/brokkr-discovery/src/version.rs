//! Engine version extraction
//!
//! A candidate directory becomes an installation record only when a
//! `major.minor` version can be recovered from it, either from the path
//! itself or from the engine's build metadata file.

use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use tracing::warn;

/// Pre-compiled pattern for version-like tokens embedded in a path
static PATH_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"UE_?(\d+\.\d+)").expect("version regex is valid"));

/// Relative path of the engine build metadata file
const BUILD_VERSION_RELATIVE: &str = "Engine/Build/Build.version";

#[derive(Debug, Deserialize)]
struct BuildVersionFile {
    #[serde(rename = "MajorVersion", default)]
    major_version: u32,

    #[serde(rename = "MinorVersion", default)]
    minor_version: u32,
}

/// Normalize a candidate path to the installation root
///
/// Candidates sometimes point inside the installation (at `Engine` or one
/// of its children). When the `Engine` marker is absent directly under the
/// path but appears as a segment of it, the grandparent is taken as the
/// putative root.
pub fn normalize_root(path: &Utf8Path) -> Utf8PathBuf {
    if !path.join("Engine").exists() && path.as_str().contains("Engine") {
        if let Some(grandparent) = path.parent().and_then(|p| p.parent()) {
            return grandparent.to_owned();
        }
    }
    path.to_owned()
}

/// Extract an engine version from an installation path
///
/// Tries, in order: a version-like token in the (normalized) path string,
/// then the `Engine/Build/Build.version` metadata file. `None` marks the
/// candidate as unusable; it is not an error.
pub fn extract_version(path: &Utf8Path) -> Option<String> {
    let root = normalize_root(path);

    if let Some(captures) = PATH_VERSION_RE.captures(root.as_str()) {
        return Some(captures[1].to_string());
    }

    let version_file = root.join(BUILD_VERSION_RELATIVE);
    if version_file.exists() {
        match std::fs::read_to_string(&version_file) {
            Ok(content) => match serde_json::from_str::<BuildVersionFile>(&content) {
                Ok(meta) => return Some(format!("{}.{}", meta.major_version, meta.minor_version)),
                Err(e) => warn!("Error reading version file {}: {}", version_file, e),
            },
            Err(e) => warn!("Error reading version file {}: {}", version_file, e),
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn utf8_root(temp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap()
    }

    #[test]
    fn test_version_from_path_token() {
        assert_eq!(
            extract_version(Utf8Path::new("/opt/UE_5.3")).as_deref(),
            Some("5.3")
        );
        assert_eq!(
            extract_version(Utf8Path::new("/opt/UE4.27")).as_deref(),
            Some("4.27")
        );
    }

    #[test]
    fn test_version_from_metadata_file() {
        let temp = TempDir::new().unwrap();
        let root = utf8_root(&temp).join("CustomBuild");
        let version_file = root.join("Engine/Build/Build.version");
        fs::create_dir_all(version_file.parent().unwrap()).unwrap();
        fs::write(
            &version_file,
            r#"{"MajorVersion": 5, "MinorVersion": 2, "PatchVersion": 1}"#,
        )
        .unwrap();

        assert_eq!(extract_version(&root).as_deref(), Some("5.2"));
    }

    #[test]
    fn test_no_version_anywhere() {
        let temp = TempDir::new().unwrap();
        let root = utf8_root(&temp).join("SomeFolder");
        fs::create_dir_all(&root).unwrap();
        assert!(extract_version(&root).is_none());
    }

    #[test]
    fn test_normalize_inner_path_to_grandparent() {
        let temp = TempDir::new().unwrap();
        let root = utf8_root(&temp).join("UE_5.3");
        fs::create_dir_all(root.join("Engine/Binaries")).unwrap();

        // A candidate pointing inside the installation resolves to the root
        let inner = root.join("Engine/Binaries");
        assert_eq!(normalize_root(&inner), root);
    }

    #[test]
    fn test_extract_version_idempotent() {
        let temp = TempDir::new().unwrap();
        let root = utf8_root(&temp).join("UE_5.3");
        fs::create_dir_all(root.join("Engine")).unwrap();

        let first = extract_version(&root).unwrap();
        let normalized = normalize_root(&root);
        let second = extract_version(&normalized).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_malformed_metadata_yields_none() {
        let temp = TempDir::new().unwrap();
        let root = utf8_root(&temp).join("Custom");
        let version_file = root.join("Engine/Build/Build.version");
        fs::create_dir_all(version_file.parent().unwrap()).unwrap();
        fs::write(&version_file, "oops").unwrap();

        assert!(extract_version(&root).is_none());
    }
}
