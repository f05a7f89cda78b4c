//! Discovery lifecycle events
//!
//! Consumers (the CLI, a future GUI) subscribe to a typed event stream
//! rather than sharing state with the scanning thread; the result map
//! crosses the thread boundary as an immutable snapshot.

use brokkr_core::config::EngineMap;
use brokkr_core::LogLevel;
use serde::Serialize;

/// Events published during a discovery pass
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiscoveryEvent {
    /// A log line from the scan
    Log { level: LogLevel, message: String },

    /// The pass completed with the validated mapping
    Finished { engines: EngineMap },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event_serialization() {
        let event = DiscoveryEvent::Log {
            level: LogLevel::Success,
            message: "Unreal Engine found: /Engines/UE_5.3".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"log"#));
        assert!(json.contains(r#""level":"success"#));
    }

    #[test]
    fn test_finished_event_serialization() {
        let mut engines = EngineMap::new();
        engines.insert("5.3".to_string(), "/Engines/UE_5.3".into());
        let event = DiscoveryEvent::Finished { engines };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"finished"#));
        assert!(json.contains(r#""5.3":"/Engines/UE_5.3"#));
    }
}
