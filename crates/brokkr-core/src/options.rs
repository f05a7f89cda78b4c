//! BuildPlugin option set
//!
//! Options reach RunUAT as `-Key` flags or `-Key value` pairs. Encoding
//! rules: `true` becomes a bare flag, a non-empty string becomes a flag
//! with a value, and `false`/empty values are omitted entirely.

use serde::Serialize;

/// Target platforms selectable for a plugin build
pub const KNOWN_PLATFORMS: &[&str] = &["Win64", "Win32", "Mac", "Linux"];

/// Value attached to a single option key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Flag(bool),
    Value(String),
}

impl OptionValue {
    /// True when the encoding rules drop this value from the command line
    pub fn is_omitted(&self) -> bool {
        match self {
            OptionValue::Flag(set) => !set,
            OptionValue::Value(s) => s.is_empty(),
        }
    }
}

/// The option set passed to a plugin build
///
/// Known options are a closed set mirrored from the BuildPlugin surface;
/// `extra` is the escape hatch for anything else, kept in insertion order
/// so command construction stays deterministic.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildOptions {
    /// Joined with `+` into a single `TargetPlatforms` value
    pub target_platforms: Vec<String>,
    /// Create a dated subfolder inside the output directory
    pub create_sub_folder: bool,
    /// Skip building for the host platform
    pub no_host_platform: bool,
    /// Ship debug symbol files alongside binaries
    pub include_debug_files: bool,
    /// Strict compilation
    pub strict: bool,
    /// Do not embed the engine version in the packaged descriptor
    pub unversioned: bool,
    /// Free-form additional options, applied after the known set
    pub extra: Vec<(String, OptionValue)>,
}

impl BuildOptions {
    /// Flatten into `(key, value)` pairs in encoding order
    ///
    /// Known options come first in a fixed order, extras follow in
    /// insertion order. Pairs that encode to nothing are already filtered.
    pub fn to_pairs(&self) -> Vec<(String, OptionValue)> {
        let mut pairs = Vec::new();

        if !self.target_platforms.is_empty() {
            pairs.push((
                "TargetPlatforms".to_string(),
                OptionValue::Value(self.target_platforms.join("+")),
            ));
        }

        let flags = [
            ("CreateSubFolder", self.create_sub_folder),
            ("NoHostPlatform", self.no_host_platform),
            ("IncludeDebugFiles", self.include_debug_files),
            ("Strict", self.strict),
            ("Unversioned", self.unversioned),
        ];
        for (name, set) in flags {
            if set {
                pairs.push((name.to_string(), OptionValue::Flag(true)));
            }
        }

        for (key, value) in &self.extra {
            if !value.is_omitted() {
                pairs.push((key.clone(), value.clone()));
            }
        }

        pairs
    }

    /// Append a free-form option
    pub fn push_extra(&mut self, key: impl Into<String>, value: OptionValue) {
        self.extra.push((key.into(), value));
    }

    /// Parse extra options from `-Param1=Value1 -Param2 ...` text
    ///
    /// Tokens without a leading `-` are ignored; `-Key=Value` becomes a
    /// valued option and a bare `-Flag` becomes a boolean flag.
    pub fn parse_extra(&mut self, text: &str) {
        for token in text.split_whitespace() {
            let Some(stripped) = token.strip_prefix('-') else {
                continue;
            };
            match stripped.split_once('=') {
                Some((key, value)) => {
                    self.push_extra(key, OptionValue::Value(value.to_string()));
                }
                None => {
                    self.push_extra(stripped, OptionValue::Flag(true));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_options_yield_no_pairs() {
        assert!(BuildOptions::default().to_pairs().is_empty());
    }

    #[test]
    fn test_platforms_joined_with_plus() {
        let options = BuildOptions {
            target_platforms: vec!["Win64".to_string(), "Linux".to_string()],
            ..Default::default()
        };
        assert_eq!(
            options.to_pairs(),
            vec![(
                "TargetPlatforms".to_string(),
                OptionValue::Value("Win64+Linux".to_string())
            )]
        );
    }

    #[test]
    fn test_known_flags_in_fixed_order() {
        let options = BuildOptions {
            strict: true,
            create_sub_folder: true,
            ..Default::default()
        };
        let keys: Vec<_> = options.to_pairs().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["CreateSubFolder", "Strict"]);
    }

    #[test]
    fn test_extras_keep_insertion_order() {
        let mut options = BuildOptions::default();
        options.push_extra("Zed", OptionValue::Flag(true));
        options.push_extra("Alpha", OptionValue::Value("1".to_string()));
        let keys: Vec<_> = options.to_pairs().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Zed", "Alpha"]);
    }

    #[test]
    fn test_omitted_values_filtered() {
        let mut options = BuildOptions::default();
        options.push_extra("Off", OptionValue::Flag(false));
        options.push_extra("Empty", OptionValue::Value(String::new()));
        options.push_extra("Kept", OptionValue::Flag(true));
        let keys: Vec<_> = options.to_pairs().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Kept"]);
    }

    #[test]
    fn test_parse_extra() {
        let mut options = BuildOptions::default();
        options.parse_extra("-Param1=Value1 -Flag ignored -Param2=a=b");
        assert_eq!(
            options.extra,
            vec![
                (
                    "Param1".to_string(),
                    OptionValue::Value("Value1".to_string())
                ),
                ("Flag".to_string(), OptionValue::Flag(true)),
                ("Param2".to_string(), OptionValue::Value("a=b".to_string())),
            ]
        );
    }
}
