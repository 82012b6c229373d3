//! Runtime configuration for a state machine.

use crate::machine::error::MachineError;
use serde::{Deserialize, Serialize};

/// Default number of history records a machine keeps.
pub const DEFAULT_HISTORY_LIMIT: usize = 256;

/// Tunables for a [`StateMachine`](crate::machine::StateMachine).
///
/// Every field has a default, so a partial JSON document is a valid config.
///
/// ```rust
/// use tickstate::machine::MachineConfig;
///
/// let config = MachineConfig::from_json(r#"{ "history_limit": 16 }"#).unwrap();
/// assert!(config.record_history);
/// assert_eq!(config.history_limit, Some(16));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Record every change of the active state
    pub record_history: bool,

    /// Keep at most this many history records; `None` keeps everything.
    /// Recording copies the history on every state change, so an unbounded
    /// history makes each change slower as it grows.
    pub history_limit: Option<usize>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            record_history: true,
            history_limit: Some(DEFAULT_HISTORY_LIMIT),
        }
    }
}

impl MachineConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, MachineError> {
        serde_json::from_str(json).map_err(|e| MachineError::InvalidConfig(e.to_string()))
    }

    /// Disable history recording.
    pub fn without_history(mut self) -> Self {
        self.record_history = false;
        self
    }

    pub fn history_limit(mut self, limit: Option<usize>) -> Self {
        self.history_limit = limit;
        self
    }
}
