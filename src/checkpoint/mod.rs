//! Checkpoint and resume for state machines.
//!
//! A checkpoint captures where a machine is (active kind, tick counter and
//! history) so a controller can be restored after a reload. The graph itself
//! is not captured: transitions hold closures and states belong to the
//! owner, so the owner rewires a fresh machine and resumes into it.

use crate::core::{StateHistory, StateKind};
use crate::machine::StateMachine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a machine's position.
/// Does NOT include states or transitions (not serializable).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Checkpoint<K: StateKind> {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Active kind, absent when the machine was never started
    pub current: Option<K>,

    /// Number of `update_state` calls at capture time
    pub tick: u64,

    /// Transition history at capture time
    pub history: StateHistory<K>,
}

impl<K: StateKind> Checkpoint<K> {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()
    }

    fn check_version(self) -> Result<Self, CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(self)
    }
}

impl<K: StateKind> StateMachine<K> {
    /// Capture the machine's current position.
    pub fn checkpoint(&self) -> Checkpoint<K> {
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            current: self.current_kind(),
            tick: self.tick(),
            history: self.history().clone(),
        }
    }

    /// Move the machine to the position captured in `checkpoint`.
    ///
    /// The captured kind must be registered. The active state, if any,
    /// receives `on_exit`; the restored state receives `on_enter`.
    pub fn resume(&mut self, checkpoint: &Checkpoint<K>) -> Result<(), CheckpointError> {
        if checkpoint.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: checkpoint.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        let current = checkpoint.current.ok_or_else(|| {
            CheckpointError::ValidationFailed("checkpoint has no active state".to_string())
        })?;

        if let Some(last) = checkpoint.history.last() {
            if last.to != current {
                return Err(CheckpointError::ValidationFailed(format!(
                    "history ends in '{}' but active state is '{}'",
                    last.to.name(),
                    current.name()
                )));
            }
        }

        self.restore_position(current, checkpoint.tick, checkpoint.history.clone())?;
        Ok(())
    }
}
