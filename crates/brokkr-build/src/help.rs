//! BuildPlugin help passthrough
//!
//! The packaging tool documents its own options; `-Help BuildPlugin`
//! output is surfaced verbatim rather than duplicated here.

use brokkr_core::{Error, Result};
use brokkr_discovery::uat_path;
use camino::Utf8Path;
use tokio::process::Command;

/// Run `RunUAT -Help BuildPlugin` at the target installation
///
/// Returns whatever the tool printed; UAT writes help to stdout on some
/// engine versions and stderr on others.
pub async fn fetch_tool_help(engine_root: &Utf8Path) -> Result<String> {
    let uat = uat_path(engine_root);
    if !uat.exists() {
        return Err(Error::entry_script_missing(uat.as_str()));
    }

    let output = Command::new(uat.as_str())
        .args(["-Help", "BuildPlugin"])
        .output()
        .await?;

    let text = if output.stdout.is_empty() {
        String::from_utf8_lossy(&output.stderr)
    } else {
        String::from_utf8_lossy(&output.stdout)
    };

    Ok(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_entry_script() {
        let err = fetch_tool_help(Utf8Path::new("/nonexistent/engine"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::EntryScriptMissing { .. }));
    }
}
