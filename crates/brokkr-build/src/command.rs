//! Packaging-tool command construction

use brokkr_core::options::{BuildOptions, OptionValue};
use brokkr_core::utils::forward_slashes;
use brokkr_core::{Error, Result};
use brokkr_discovery::uat_path;
use camino::{Utf8Path, Utf8PathBuf};

/// Inputs for one packaging run
#[derive(Debug, Clone)]
pub struct BuildRequest {
    /// Path to the `.uplugin` descriptor
    pub descriptor_path: Utf8PathBuf,
    /// Directory receiving the packaged plugin
    pub output_dir: Utf8PathBuf,
    /// Root of the target engine installation
    pub engine_root: Utf8PathBuf,
    /// Additional BuildPlugin options
    pub options: BuildOptions,
}

impl BuildRequest {
    /// Construct the packaging-tool argument vector
    ///
    /// The first element is the entry script path, the rest its
    /// arguments. Fails when a required path is empty or the entry script
    /// is absent at the target installation; identical inputs always
    /// produce the identical sequence.
    pub fn command_line(&self) -> Result<Vec<String>> {
        if self.descriptor_path.as_str().is_empty() {
            return Err(Error::missing_parameter("plugin path"));
        }
        if self.output_dir.as_str().is_empty() {
            return Err(Error::missing_parameter("output directory"));
        }
        if self.engine_root.as_str().is_empty() {
            return Err(Error::missing_parameter("target engine path"));
        }

        let uat = uat_path(&self.engine_root);
        if !uat.exists() {
            return Err(Error::entry_script_missing(uat.as_str()));
        }

        let mut command = vec![
            forward_slashes(uat.as_str()),
            "BuildPlugin".to_string(),
            "-plugin".to_string(),
            forward_slashes(self.descriptor_path.as_str()),
            "-package".to_string(),
            forward_slashes(self.output_dir.as_str()),
        ];

        for (key, value) in self.options.to_pairs() {
            match value {
                OptionValue::Flag(true) => command.push(format!("-{}", key)),
                OptionValue::Value(v) => {
                    command.push(format!("-{}", key));
                    command.push(v);
                }
                OptionValue::Flag(false) => {}
            }
        }

        Ok(command)
    }

    /// Human-readable rendering of the command
    ///
    /// Values whose parent directory exists are treated as paths: quoted
    /// and rendered with forward slashes. Everything else renders as
    /// `key=value` unquoted.
    pub fn command_text(&self) -> Result<String> {
        let command = self.command_line()?;
        let mut formatted = vec![command[0].clone(), command[1].clone()];

        let mut i = 2;
        while i < command.len() {
            let param = &command[i];
            let value = command.get(i + 1).filter(|v| !v.starts_with('-'));
            match value {
                Some(value) => {
                    let parent_exists = Utf8Path::new(value)
                        .parent()
                        .map(|p| p.exists())
                        .unwrap_or(false);
                    if parent_exists {
                        formatted.push(format!("{}=\"{}\"", param, forward_slashes(value)));
                    } else {
                        formatted.push(format!("{}={}", param, value));
                    }
                    i += 2;
                }
                None => {
                    formatted.push(param.clone());
                    i += 1;
                }
            }
        }

        Ok(formatted.join(" "))
    }
}
