//! Discover command - scan the system for engine installations

use anyhow::Result;
use brokkr_core::LogLevel;
use brokkr_discovery::{DiscoveryEvent, EngineFinder};
use camino::Utf8Path;
use tabled::{Table, Tabled};
use tokio::sync::mpsc;

use crate::cli::DiscoverArgs;
use crate::output;
use crate::utils::store_from;

#[derive(Tabled)]
struct EngineRow {
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Path")]
    path: String,
}

/// Run a discovery pass and report the validated installations
pub async fn run(args: DiscoverArgs, config: Option<&Utf8Path>) -> Result<()> {
    let store = store_from(config)?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let finder = EngineFinder::new(store).with_events(tx);

    let spinner = output::spinner("Scanning for Unreal Engine installations...");

    // The scan runs on a worker thread; events and the result snapshot
    // arrive over the channel
    let scan = tokio::task::spawn_blocking(move || finder.find_all(args.first, args.rescan));

    while let Some(event) = rx.recv().await {
        if let DiscoveryEvent::Log { level, message } = event {
            match level {
                LogLevel::Success => spinner.println(format!("  {}", message)),
                LogLevel::Warning | LogLevel::Error => spinner.println(format!("! {}", message)),
                LogLevel::Info => {}
            }
        }
    }

    let engines = scan.await?;
    spinner.finish_and_clear();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&engines)?);
        return Ok(());
    }

    if engines.is_empty() {
        output::warning("No Unreal Engine installations found.");
        output::info("Add one manually with `brokkr engine add <path>`.");
        return Ok(());
    }

    let rows: Vec<EngineRow> = engines
        .iter()
        .map(|(version, path)| EngineRow {
            version: version.clone(),
            path: path.to_string(),
        })
        .collect();

    println!("{}", Table::new(rows));
    output::success(&format!("{} engine installation(s) available.", engines.len()));
    Ok(())
}
