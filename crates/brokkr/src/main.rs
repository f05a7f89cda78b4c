//! Brokkr CLI - Unreal Engine plugin packaging
//!
//! This is the main entry point for the Brokkr command-line interface.

mod cli;
mod commands;
mod output;
mod utils;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Version(args) => commands::version::run(args),
        Commands::Discover(args) => commands::discover::run(args, cli.config.as_deref()).await,
        Commands::Engine(args) => commands::engine::run(args, cli.config.as_deref()).await,
        Commands::Info(args) => commands::info::run(args),
        Commands::Build(args) => commands::build::run(args, cli.config.as_deref()).await,
        Commands::ToolHelp(args) => commands::tool_help::run(args, cli.config.as_deref()).await,
    }
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            // Component events carry the user-facing story; tracing stays
            // at warn unless verbosity is raised
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}
