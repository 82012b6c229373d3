//! Wiring violations and how to react to them.

use thiserror::Error;

/// Problems found in a wired state graph
#[derive(Debug, Clone, Error, PartialEq)]
pub enum WiringViolation {
    #[error("No states registered")]
    EmptyGraph,

    #[error("Initial state '{state}' is not registered")]
    UnknownInitial { state: String },

    #[error("State '{state}' is unreachable from the initial state")]
    Unreachable { state: String },

    #[error("State '{state}' was registered with more than one instance; the first one is used")]
    KindCollision { state: String },

    #[error("Custom check failed: {message}")]
    CustomCheckFailed { message: String },
}

/// Strategy for handling wiring violations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationStrategy {
    /// Refuse to build the machine
    Abort,

    /// Build anyway but log a warning per violation
    IgnoreAndLog,
}
