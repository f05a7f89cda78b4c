//! Output directory derivation
//!
//! The packaged plugin lands either next to the plugin folder (default)
//! or under a caller-chosen directory; both carry the target engine
//! version in the directory name so builds for different engines never
//! collide.

use brokkr_core::utils::forward_slashes;
use camino::{Utf8Path, Utf8PathBuf};

/// Where the packaged plugin is written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Sibling of the plugin folder, named `<base>_<version>`
    #[default]
    ParentDir,
    /// A chosen directory receiving `<plugin>_<version>`
    Custom(Utf8PathBuf),
}

/// Derive the output directory for a build
///
/// Parent-directory mode names the output after the plugin folder with
/// the version appended (`/plugins/Foo` + `5.3` -> `/plugins/Foo_5.3`);
/// the folder-name base is truncated at the first `_` so rebuilt outputs
/// replace the version rather than stacking suffixes. When the derived
/// path collides with the plugin folder itself, `_build` is appended.
pub fn derive_output_dir(
    descriptor_path: &Utf8Path,
    target_version: &str,
    mode: &OutputMode,
) -> Utf8PathBuf {
    let plugin_dir = descriptor_path.parent().unwrap_or(Utf8Path::new(""));

    let output = match mode {
        OutputMode::ParentDir => {
            let parent = plugin_dir.parent().unwrap_or(Utf8Path::new(""));
            let folder_name = plugin_dir.file_name().unwrap_or_default();
            let base = folder_name.split('_').next().unwrap_or(folder_name);

            let mut output = parent.join(format!("{}_{}", base, target_version));
            if output == plugin_dir {
                output = Utf8PathBuf::from(format!("{}_build", output));
            }
            output
        }
        OutputMode::Custom(dir) => {
            let stem = descriptor_path.file_stem().unwrap_or_default();
            dir.join(format!("{}_{}", stem, target_version))
        }
    };

    Utf8PathBuf::from(forward_slashes(output.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_dir_mode() {
        let output = derive_output_dir(
            Utf8Path::new("/plugins/Foo/Foo.uplugin"),
            "5.3",
            &OutputMode::ParentDir,
        );
        assert_eq!(output.as_str(), "/plugins/Foo_5.3");
    }

    #[test]
    fn test_parent_dir_mode_strips_old_version_suffix() {
        let output = derive_output_dir(
            Utf8Path::new("/plugins/Foo_5.1/Foo.uplugin"),
            "5.3",
            &OutputMode::ParentDir,
        );
        assert_eq!(output.as_str(), "/plugins/Foo_5.3");
    }

    #[test]
    fn test_collision_with_plugin_dir_gets_build_suffix() {
        let output = derive_output_dir(
            Utf8Path::new("/plugins/Foo_5.3/Foo.uplugin"),
            "5.3",
            &OutputMode::ParentDir,
        );
        assert_eq!(output.as_str(), "/plugins/Foo_5.3_build");
    }

    #[test]
    fn test_custom_mode() {
        let output = derive_output_dir(
            Utf8Path::new("/plugins/Foo/Foo.uplugin"),
            "5.3",
            &OutputMode::Custom(Utf8PathBuf::from("/builds")),
        );
        assert_eq!(output.as_str(), "/builds/Foo_5.3");
    }

    #[test]
    fn test_backslashes_normalized() {
        let output = derive_output_dir(
            Utf8Path::new(r"C:\plugins\Foo\Foo.uplugin"),
            "5.3",
            &OutputMode::Custom(Utf8PathBuf::from(r"C:\builds")),
        );
        // Canonical form uses forward slashes regardless of input style
        assert!(!output.as_str().contains('\\'));
    }
}
