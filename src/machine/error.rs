//! Errors raised while driving a state machine.

use thiserror::Error;

/// Errors that can occur when starting or ticking a state machine.
///
/// All of them point at a wiring bug in the owner, so they are reported
/// immediately and never retried.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MachineError {
    #[error("State machine has no active state. Call .set_state(kind) before ticking")]
    NotStarted,

    #[error("State '{state}' is not registered. Add a transition from or to it first")]
    UnknownState { state: String },

    #[error("State '{state}' is already borrowed by its owner")]
    StateBorrowed { state: String },

    #[error("Invalid machine configuration: {0}")]
    InvalidConfig(String),
}
