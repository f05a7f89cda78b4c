//! Build lifecycle events
//!
//! The orchestrator publishes a typed event stream; consumers render it
//! (console, GUI) without sharing state with the supervision task.

use brokkr_core::LogLevel;
use serde::Serialize;

/// Fixed message attached to the successful-completion event
pub const BUILD_SUCCESS_MESSAGE: &str = "Plugin build completed successfully";

/// Fixed message attached to the cancellation event
pub const BUILD_CANCELLED_MESSAGE: &str = "Plugin build cancelled by user";

/// Failure message carrying the packaging tool's exit code
pub fn build_failed_message(exit_code: Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("Plugin build failed with error (code: {})", code),
        None => "Plugin build failed (terminated by signal)".to_string(),
    }
}

/// Events published over the lifetime of one build
///
/// Ordering guarantees: `Started` precedes all output events, output
/// events arrive in process order, and `Finished` is always last.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BuildEvent {
    /// Build accepted; emitted before the process spawns
    Started,

    /// One classified line of packaging-tool output
    Log { level: LogLevel, message: String },

    /// A progress percentage extracted from the output stream
    Progress { percent: u8 },

    /// Terminal event: success, failure with exit code, or cancellation
    Finished {
        success: bool,
        exit_code: Option<i32>,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event_serialization() {
        let event = BuildEvent::Log {
            level: LogLevel::Error,
            message: "link failed".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"log"#));
        assert!(json.contains(r#""level":"error"#));
    }

    #[test]
    fn test_finished_event_serialization() {
        let event = BuildEvent::Finished {
            success: false,
            exit_code: Some(5),
            message: build_failed_message(Some(5)),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""exit_code":5"#));
        assert!(json.contains("code: 5"));
    }

    #[test]
    fn test_failed_message_without_code() {
        assert!(build_failed_message(None).contains("signal"));
    }
}
