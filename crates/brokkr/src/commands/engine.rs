//! Engine command - list and manually manage configured installations

use anyhow::{bail, Result};
use brokkr_core::config::EngineMap;
use brokkr_discovery::{extract_version, is_valid_installation, normalize_root, EngineFinder};
use camino::Utf8Path;
use dialoguer::Confirm;
use tabled::{Table, Tabled};

use crate::cli::{EngineAddArgs, EngineCommands, EngineListArgs};
use crate::output;
use crate::utils::store_from;

#[derive(Tabled)]
struct EngineRow {
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Path")]
    path: String,
}

/// Dispatch engine subcommands
pub async fn run(command: EngineCommands, config: Option<&Utf8Path>) -> Result<()> {
    match command {
        EngineCommands::List(args) => list(args, config),
        EngineCommands::Add(args) => add(args, config),
    }
}

/// Print the persisted mapping without rescanning
fn list(args: EngineListArgs, config: Option<&Utf8Path>) -> Result<()> {
    let store = store_from(config)?;
    let engines = store.load();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&engines)?);
        return Ok(());
    }

    if engines.is_empty() {
        output::info("No engines configured. Run `brokkr discover` or `brokkr engine add <path>`.");
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
    Ok(())
}

/// Validate and merge a manually supplied installation
fn add(args: EngineAddArgs, config: Option<&Utf8Path>) -> Result<()> {
    let root = normalize_root(&args.path);

    if !root.exists() {
        bail!("Path does not exist: {}", root);
    }
    if !is_valid_installation(&root) {
        bail!(
            "{} is not a complete Unreal Engine installation (RunUAT, editor binaries, or engine directories missing)",
            root
        );
    }

    let version = match args.version {
        Some(version) => version,
        None => match extract_version(&root) {
            Some(version) => version,
            None => bail!(
                "Could not determine the engine version from {}; pass --version",
                root
            ),
        },
    };

    let finder = EngineFinder::new(store_from(config)?);

    let existing = finder.store().load();
    if let Some(current) = existing.get(&version) {
        if current != &root && !args.yes {
            let replace = Confirm::new()
                .with_prompt(format!(
                    "Engine {} is already mapped to {}. Replace it?",
                    version, current
                ))
                .default(false)
                .interact()?;
            if !replace {
                output::info("Left the existing entry in place.");
                return Ok(());
            }
        }
    }

    let mut additions = EngineMap::new();
    additions.insert(version.clone(), root.clone());
    finder.save_merged(additions)?;

    output::success(&format!("Added Unreal Engine {} at {}", version, root));
    Ok(())
}
