//! Version command

use anyhow::Result;

use crate::cli::VersionArgs;

/// Print version information
pub fn run(args: VersionArgs) -> Result<()> {
    if args.json {
        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("brokkr {}", env!("CARGO_PKG_VERSION"));
    }
    Ok(())
}
