//! Error types for brokkr-core

use thiserror::Error;

/// Result type alias using brokkr-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for Brokkr
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid configuration format
    #[error("Invalid configuration format: {message}")]
    InvalidConfig { message: String },

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Plugin descriptor file not found
    #[error("Plugin file not found: {path}")]
    DescriptorNotFound { path: String },

    /// Malformed plugin descriptor
    #[error("Error reading plugin information from {path}: {message}")]
    InvalidDescriptor { path: String, message: String },

    /// Missing write permission
    #[error("No write permission for: {path}")]
    PermissionDenied { path: String },

    /// A required build parameter is unset
    #[error("Not all required parameters are set for building: missing {name}")]
    MissingParameter { name: String },

    /// Packaging-tool entry script absent at the target installation
    #[error("RunUAT.bat file not found at path: {path}")]
    EntryScriptMissing { path: String },

    /// Cancellation requested while no build is running
    #[error("No active build process to cancel")]
    NoActiveBuild,
}

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a descriptor not found error
    pub fn descriptor_not_found(path: impl Into<String>) -> Self {
        Self::DescriptorNotFound { path: path.into() }
    }

    /// Create an invalid descriptor error
    pub fn invalid_descriptor(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(path: impl Into<String>) -> Self {
        Self::PermissionDenied { path: path.into() }
    }

    /// Create a missing parameter error
    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::MissingParameter { name: name.into() }
    }

    /// Create an entry script missing error
    pub fn entry_script_missing(path: impl Into<String>) -> Self {
        Self::EntryScriptMissing { path: path.into() }
    }
}
