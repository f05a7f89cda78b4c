//! # brokkr-core
//!
//! Core library for the Brokkr CLI providing:
//! - Engine configuration store (engines.json)
//! - Plugin descriptor (.uplugin) parsing
//! - Build option encoding rules
//! - Shared error and log-level types

pub mod config;
pub mod descriptor;
pub mod error;
pub mod log;
pub mod options;
pub mod utils;

pub use config::{EngineMap, EngineStore};
pub use descriptor::PluginDescriptor;
pub use error::{Error, Result};
pub use log::LogLevel;
pub use options::{BuildOptions, OptionValue};
pub use utils::get_home_dir;
