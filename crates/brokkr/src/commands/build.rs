//! Build command - package a plugin with the engine's tooling

use anyhow::{bail, Result};
use brokkr_build::{derive_output_dir, BuildEvent, BuildRequest, OutputMode, PluginBuilder};
use brokkr_core::options::BuildOptions;
use brokkr_core::{LogLevel, PluginDescriptor};
use camino::Utf8Path;
use indicatif::ProgressBar;
use owo_colors::OwoColorize;
use tokio::sync::mpsc;

use crate::cli::BuildArgs;
use crate::output;
use crate::utils::{load_engines, resolve_engine, store_from};

/// Resolve the request, launch the build, and stream its events
pub async fn run(args: BuildArgs, config: Option<&Utf8Path>) -> Result<()> {
    let engines = load_engines(store_from(config)?, false).await?;
    let engine_root = resolve_engine(&engines, &args.engine)?;
    let version = args.engine.strip_prefix("UE_").unwrap_or(&args.engine);

    let descriptor = PluginDescriptor::load(&args.plugin)?;
    if let Some(pinned) = descriptor.engine_major_minor() {
        if pinned != version {
            output::warning(&format!(
                "Plugin pins engine version {} but this build targets {}",
                pinned, version
            ));
        }
    }

    let mode = match &args.output_dir {
        Some(dir) => OutputMode::Custom(dir.clone()),
        None => OutputMode::ParentDir,
    };
    let output_dir = derive_output_dir(&args.plugin, version, &mode);

    let mut options = BuildOptions {
        target_platforms: args.platforms.clone(),
        create_sub_folder: args.create_sub_folder,
        no_host_platform: args.no_host_platform,
        include_debug_files: args.include_debug_files,
        strict: args.strict,
        unversioned: args.unversioned,
        extra: Vec::new(),
    };
    if let Some(extra) = &args.extra {
        options.parse_extra(extra);
    }

    let request = BuildRequest {
        descriptor_path: args.plugin.clone(),
        output_dir: output_dir.clone(),
        engine_root,
        options,
    };

    if args.show_command {
        println!("{}", request.command_text()?);
        return Ok(());
    }

    let name = if descriptor.friendly_name.is_empty() {
        args.plugin.file_stem().unwrap_or_default().to_string()
    } else {
        descriptor.friendly_name.clone()
    };
    output::info(&format!(
        "Building {} for UE {} -> {}",
        name, version, output_dir
    ));

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut builder = PluginBuilder::new(tx);

    if !builder.start_build(request) {
        drop(builder);
        while let Ok(event) = rx.try_recv() {
            if let BuildEvent::Log { level, message } = event {
                print_line(None, level, &message);
            }
        }
        bail!("Could not start the plugin build. Check the parameters and logs.");
    }

    let progress = output::build_progress();

    let (success, message) = loop {
        tokio::select! {
            event = rx.recv() => match event {
                Some(BuildEvent::Started) => {}
                Some(BuildEvent::Log { level, message }) => {
                    print_line(Some(&progress), level, &message);
                }
                Some(BuildEvent::Progress { percent }) => {
                    progress.set_position(percent as u64);
                }
                Some(BuildEvent::Finished { success, message, .. }) => {
                    break (success, message);
                }
                None => {
                    break (false, "Build event stream closed unexpectedly".to_string());
                }
            },
            _ = tokio::signal::ctrl_c() => {
                progress.println("Cancelling build...");
                builder.cancel_build().await;
                // The cancellation Finished event ends the loop
            }
        }
    };

    progress.finish_and_clear();

    if success {
        output::success(&message);
        output::kv("Output", output_dir.as_str());
        Ok(())
    } else {
        output::error(&message);
        std::process::exit(1);
    }
}

/// Render one classified log line, routing around the progress bar
fn print_line(progress: Option<&ProgressBar>, level: LogLevel, message: &str) {
    let line = match level {
        LogLevel::Error => format!("{} {}", "ERROR".red().bold(), message),
        LogLevel::Warning => format!("{} {}", "WARN ".yellow().bold(), message),
        LogLevel::Success => format!("{} {}", "OK   ".green().bold(), message),
        LogLevel::Info => format!("{} {}", "INFO ".dimmed(), message),
    };
    match progress {
        Some(progress) => progress.println(line),
        None => println!("{}", line),
    }
}
