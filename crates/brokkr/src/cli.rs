//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// Brokkr - package Unreal Engine plugins with the engine's own tooling
#[derive(Parser, Debug)]
#[command(name = "brokkr")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the engines.json config file
    #[arg(short, long, global = true)]
    pub config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    Version(VersionArgs),

    /// Find installed Unreal Engine SDKs
    Discover(DiscoverArgs),

    /// Configured engine management
    #[command(subcommand)]
    Engine(EngineCommands),

    /// Show plugin descriptor information
    Info(InfoArgs),

    /// Build a plugin against a configured engine
    Build(BuildArgs),

    /// Show the packaging tool's own BuildPlugin help
    ToolHelp(ToolHelpArgs),
}

// Version command
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// Discover command
#[derive(Args, Debug)]
pub struct DiscoverArgs {
    /// Ignore the config store and perform a full scan
    #[arg(short, long)]
    pub rescan: bool,

    /// Stop at the first source that yields an installation
    #[arg(long)]
    pub first: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// Engine commands
#[derive(Subcommand, Debug)]
pub enum EngineCommands {
    /// List configured engines
    List(EngineListArgs),

    /// Add an engine installation manually
    Add(EngineAddArgs),
}

#[derive(Args, Debug)]
pub struct EngineListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct EngineAddArgs {
    /// Root directory of the engine installation
    pub path: Utf8PathBuf,

    /// Version key to store (extracted from the path when omitted)
    #[arg(long)]
    pub version: Option<String>,

    /// Replace an existing entry without asking
    #[arg(short, long)]
    pub yes: bool,
}

// Info command
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Path to the .uplugin descriptor
    pub plugin: Utf8PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// Build command
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Path to the .uplugin descriptor
    pub plugin: Utf8PathBuf,

    /// Target engine version, e.g. "5.3"
    #[arg(short, long)]
    pub engine: String,

    /// Write the package under this directory instead of next to the
    /// plugin folder
    #[arg(short, long)]
    pub output_dir: Option<Utf8PathBuf>,

    /// Target platforms (comma separated: Win64, Win32, Mac, Linux)
    #[arg(long, value_delimiter = ',')]
    pub platforms: Vec<String>,

    /// Create a dated subfolder inside the output directory
    #[arg(long)]
    pub create_sub_folder: bool,

    /// Do not build for the host platform
    #[arg(long)]
    pub no_host_platform: bool,

    /// Include debug files in the package
    #[arg(long)]
    pub include_debug_files: bool,

    /// Strict compilation
    #[arg(long)]
    pub strict: bool,

    /// Do not embed the engine version in the packaged descriptor
    #[arg(long)]
    pub unversioned: bool,

    /// Extra RunUAT options, e.g. "-Param1=Value1 -Flag"
    #[arg(long)]
    pub extra: Option<String>,

    /// Print the command line and exit without building
    #[arg(long)]
    pub show_command: bool,
}

// Tool-help command
#[derive(Args, Debug)]
pub struct ToolHelpArgs {
    /// Target engine version, e.g. "5.3"
    #[arg(short, long)]
    pub engine: String,
}
