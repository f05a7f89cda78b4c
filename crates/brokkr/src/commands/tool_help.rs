//! Tool-help command - surface the packaging tool's BuildPlugin help

use anyhow::Result;
use brokkr_build::fetch_tool_help;
use camino::Utf8Path;

use crate::cli::ToolHelpArgs;
use crate::output;
use crate::utils::{load_engines, resolve_engine, store_from};

/// Run `RunUAT -Help BuildPlugin` for the selected engine
pub async fn run(args: ToolHelpArgs, config: Option<&Utf8Path>) -> Result<()> {
    let engines = load_engines(store_from(config)?, false).await?;
    let engine_root = resolve_engine(&engines, &args.engine)?;

    output::info("Getting BuildPlugin help...");
    let help = fetch_tool_help(&engine_root).await?;

    output::header("BuildPlugin Help");
    for line in help.lines() {
        if !line.trim().is_empty() {
            println!("{}", line);
        }
    }
    Ok(())
}
