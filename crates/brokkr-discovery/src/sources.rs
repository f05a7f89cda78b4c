//! Discovery sources
//!
//! Raw candidate enumeration for the three discovery sources. Validation
//! and event reporting stay in the finder; these functions only surface
//! potential installation directories.

use brokkr_core::utils::get_home_dir;
use camino::Utf8PathBuf;

/// Product-name substrings that mark an environment value as a candidate
pub const ENGINE_NAME_MARKERS: &[&str] = &["Unreal", "UE_", "UE5", "UE4"];

/// Registry keys enumerated for installed-engine records
#[cfg(windows)]
const REGISTRY_KEYS: &[&str] = &[r"SOFTWARE\EpicGames\Unreal Engine", r"SOFTWARE\EpicGames"];

/// Conventional installation root directories, in scan order
pub fn standard_roots() -> Vec<Utf8PathBuf> {
    let mut roots = vec![
        Utf8PathBuf::from("C:/Program Files/Epic Games"),
        Utf8PathBuf::from("C:/Epic Games"),
    ];
    if let Ok(home) = get_home_dir() {
        roots.push(home.join("Epic Games"));
    }
    roots.push(Utf8PathBuf::from("D:/Epic Games"));
    roots
}

/// `InstalledDirectory` values recorded in the platform registry
///
/// Platforms without such a registry yield no candidates; an absent or
/// unreadable key is not an error.
#[cfg(windows)]
pub fn registry_install_dirs() -> Vec<Utf8PathBuf> {
    use winreg::enums::HKEY_LOCAL_MACHINE;
    use winreg::RegKey;

    let mut found = Vec::new();
    let hklm = RegKey::predef(HKEY_LOCAL_MACHINE);

    for key_path in REGISTRY_KEYS {
        let Ok(key) = hklm.open_subkey(key_path) else {
            continue;
        };
        for subkey_name in key.enum_keys().flatten() {
            let Ok(subkey) = key.open_subkey(&subkey_name) else {
                continue;
            };
            let Ok(install_dir) = subkey.get_value::<String, _>("InstalledDirectory") else {
                continue;
            };
            found.push(Utf8PathBuf::from(install_dir));
        }
    }

    found
}

#[cfg(not(windows))]
pub fn registry_install_dirs() -> Vec<Utf8PathBuf> {
    Vec::new()
}

/// Environment values that look like engine paths
pub fn environment_candidates() -> Vec<Utf8PathBuf> {
    std::env::vars()
        .map(|(_, value)| value)
        .filter(|value| ENGINE_NAME_MARKERS.iter().any(|m| value.contains(m)))
        .map(Utf8PathBuf::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_standard_roots_include_home() {
        let roots = standard_roots();
        assert!(roots.len() >= 3);
        assert!(roots.iter().any(|r| r.as_str().ends_with("Epic Games")));
    }

    #[test]
    #[serial]
    fn test_environment_candidates_match_markers() {
        std::env::set_var("BROKKR_TEST_ENGINE_DIR", "/tmp/UE_5.3");
        let candidates = environment_candidates();
        assert!(candidates.iter().any(|c| c.as_str() == "/tmp/UE_5.3"));
        std::env::remove_var("BROKKR_TEST_ENGINE_DIR");
    }

    #[cfg(not(windows))]
    #[test]
    fn test_registry_empty_off_windows() {
        assert!(registry_install_dirs().is_empty());
    }
}
