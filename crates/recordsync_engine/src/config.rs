//! Configuration for the sync orchestrator.

use crate::checker::CheckMode;
use serde::{Deserialize, Serialize};

/// Default source-of-record endpoint.
pub const DEFAULT_SOURCE_ENDPOINT: &str = "https://dummy-erp.example.com/api/data";

/// Default processing system endpoint.
pub const DEFAULT_PROCESSING_ENDPOINT: &str = "https://automation-engine.example.com/api/sync";

/// Configuration for sync runs.
///
/// Every field has a default, so a partial JSON document is a valid
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Source system endpoint.
    pub source_endpoint: String,
    /// Processing system endpoint.
    pub processing_endpoint: String,
    /// How submitted and returned sets are compared.
    pub check_mode: CheckMode,
    /// Whether a completion notification is sent after a successful run.
    pub notify_on_success: bool,
}

impl SyncConfig {
    /// Creates a new sync configuration.
    pub fn new(source_endpoint: impl Into<String>, processing_endpoint: impl Into<String>) -> Self {
        Self {
            source_endpoint: source_endpoint.into(),
            processing_endpoint: processing_endpoint.into(),
            check_mode: CheckMode::Positional,
            notify_on_success: true,
        }
    }

    /// Sets the consistency check mode.
    pub fn with_check_mode(mut self, mode: CheckMode) -> Self {
        self.check_mode = mode;
        self
    }

    /// Enables or disables the completion notification.
    pub fn with_notifications(mut self, enabled: bool) -> Self {
        self.notify_on_success = enabled;
        self
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE_ENDPOINT, DEFAULT_PROCESSING_ENDPOINT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_config_builder() {
        let config = SyncConfig::new("https://erp.test", "https://engine.test")
            .with_check_mode(CheckMode::Keyed)
            .with_notifications(false);

        assert_eq!(config.source_endpoint, "https://erp.test");
        assert_eq!(config.processing_endpoint, "https://engine.test");
        assert_eq!(config.check_mode, CheckMode::Keyed);
        assert!(!config.notify_on_success);
    }

    #[test]
    fn defaults() {
        let config = SyncConfig::default();
        assert_eq!(config.source_endpoint, DEFAULT_SOURCE_ENDPOINT);
        assert_eq!(config.check_mode, CheckMode::Positional);
        assert!(config.notify_on_success);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: SyncConfig = serde_json::from_str(r#"{"check_mode": "keyed"}"#).unwrap();

        assert_eq!(config.check_mode, CheckMode::Keyed);
        assert_eq!(config.processing_endpoint, DEFAULT_PROCESSING_ENDPOINT);
        assert!(config.notify_on_success);
    }
}
