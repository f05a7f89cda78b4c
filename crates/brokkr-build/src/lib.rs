//! # brokkr-build
//!
//! Owns the external packaging process for plugin builds: derives the
//! RunUAT command line from a build request, launches and supervises the
//! process, classifies its streamed output into severity levels and
//! progress values, and services forcible cancellation including
//! process-tree termination and partial-output cleanup.

pub mod classify;
pub mod command;
pub mod events;
pub mod help;
pub mod orchestrator;
pub mod output;
pub mod process;

pub use classify::{classify_line, extract_progress};
pub use command::BuildRequest;
pub use events::{BuildEvent, BUILD_CANCELLED_MESSAGE, BUILD_SUCCESS_MESSAGE};
pub use help::fetch_tool_help;
pub use orchestrator::{BuildState, PluginBuilder};
pub use output::{derive_output_dir, OutputMode};
