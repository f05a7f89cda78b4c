//! Structural validation of engine installation roots

use camino::{Utf8Path, Utf8PathBuf};

/// Relative path of the packaging-tool entry script
pub const UAT_RELATIVE: &str = "Engine/Build/BatchFiles/RunUAT.bat";

/// Editor executable variants, newest first
pub const EDITOR_RELATIVE: &[&str] = &[
    "Engine/Binaries/Win64/UnrealEditor.exe",
    "Engine/Binaries/Win64/UE4Editor.exe",
];

/// Directories every complete installation carries
pub const REQUIRED_DIRS: &[&str] = &["Engine/Content", "Engine/Plugins", "Engine/Source"];

/// Check whether a path holds a complete engine installation
///
/// Purely structural: the entry script, at least one editor executable,
/// and the three content/plugin/source directories must all exist. File
/// contents are never inspected.
pub fn is_valid_installation(root: &Utf8Path) -> bool {
    if !root.join(UAT_RELATIVE).exists() {
        return false;
    }

    let has_editor = EDITOR_RELATIVE.iter().any(|rel| root.join(rel).exists());
    let dirs_exist = REQUIRED_DIRS.iter().all(|rel| root.join(rel).is_dir());

    has_editor && dirs_exist
}

/// Absolute path of the packaging-tool entry script under a root
pub fn uat_path(root: &Utf8Path) -> Utf8PathBuf {
    root.join(UAT_RELATIVE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Utf8Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn utf8_root(temp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap()
    }

    #[test]
    fn test_validation_is_monotonic_over_required_pieces() {
        let temp = TempDir::new().unwrap();
        let root = utf8_root(&temp);

        // Empty tree fails
        assert!(!is_valid_installation(&root));

        // Entry script alone is not enough
        touch(&root, UAT_RELATIVE);
        assert!(!is_valid_installation(&root));

        // Editor binary, still missing the three directories
        touch(&root, "Engine/Binaries/Win64/UnrealEditor.exe");
        assert!(!is_valid_installation(&root));

        // Adding directories one at a time only flips the result on the last
        fs::create_dir_all(root.join("Engine/Content")).unwrap();
        assert!(!is_valid_installation(&root));
        fs::create_dir_all(root.join("Engine/Plugins")).unwrap();
        assert!(!is_valid_installation(&root));
        fs::create_dir_all(root.join("Engine/Source")).unwrap();
        assert!(is_valid_installation(&root));
    }

    #[test]
    fn test_legacy_editor_variant_accepted() {
        let temp = TempDir::new().unwrap();
        let root = utf8_root(&temp);

        touch(&root, UAT_RELATIVE);
        touch(&root, "Engine/Binaries/Win64/UE4Editor.exe");
        for dir in REQUIRED_DIRS {
            fs::create_dir_all(root.join(dir)).unwrap();
        }

        assert!(is_valid_installation(&root));
    }

    #[test]
    fn test_missing_entry_script_fails() {
        let temp = TempDir::new().unwrap();
        let root = utf8_root(&temp);

        touch(&root, "Engine/Binaries/Win64/UnrealEditor.exe");
        for dir in REQUIRED_DIRS {
            fs::create_dir_all(root.join(dir)).unwrap();
        }

        assert!(!is_valid_installation(&root));
    }

    #[test]
    fn test_uat_path_layout() {
        let path = uat_path(Utf8Path::new("/Engines/UE_5.3"));
        assert_eq!(
            path.as_str(),
            "/Engines/UE_5.3/Engine/Build/BatchFiles/RunUAT.bat"
        );
    }
}
