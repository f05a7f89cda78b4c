//! Log severity levels shared by discovery and build events

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity attached to a log event emitted by the core components.
///
/// Ordered by classification precedence: a line matching both an error and
/// a warning keyword is classified as `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Error,
    Warning,
    Success,
    Info,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
            LogLevel::Success => "SUCCESS",
            LogLevel::Info => "INFO",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(LogLevel::Error.to_string(), "ERROR");
        assert_eq!(LogLevel::Info.to_string(), "INFO");
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&LogLevel::Warning).unwrap();
        assert_eq!(json, r#""warning""#);
        let back: LogLevel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, LogLevel::Warning);
    }
}
