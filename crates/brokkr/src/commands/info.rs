//! Info command - show plugin descriptor information

use anyhow::Result;
use brokkr_core::PluginDescriptor;

use crate::cli::InfoArgs;
use crate::output;

/// Read and display a plugin descriptor
pub fn run(args: InfoArgs) -> Result<()> {
    let descriptor = match PluginDescriptor::load(&args.plugin) {
        Ok(descriptor) => descriptor,
        Err(e) => {
            output::error(&e.to_string());
            std::process::exit(1);
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&descriptor)?);
        return Ok(());
    }

    output::header("Plugin Information");
    output::kv("Name", &descriptor.friendly_name);
    output::kv("Version", &descriptor.version);
    output::kv("Category", &descriptor.category);
    output::kv("Description", &descriptor.description);
    output::kv("Modules", &descriptor.module_names().join(", "));

    if descriptor.is_engine_plugin() {
        output::kv("Engine Version", &descriptor.engine_version);
    }
    if !descriptor.marketplace_url.is_empty() {
        output::kv("Marketplace URL", &descriptor.marketplace_url);
    }
    if !descriptor.supported_platforms.is_empty() {
        output::kv(
            "Supported Platforms",
            &descriptor.supported_platforms.join(", "),
        );
    }

    Ok(())
}
