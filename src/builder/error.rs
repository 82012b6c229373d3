//! Build errors for the state machine builder.

use crate::machine::MachineError;
use crate::validation::WiringViolation;
use thiserror::Error;

/// Errors that can occur when building a state machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(kind) before .build()")]
    MissingInitialState,

    #[error("No transitions defined. Add at least one transition with .at() or .any()")]
    NoTransitions,

    #[error("State graph failed validation with {} violation(s)", .0.len())]
    InvalidWiring(Vec<WiringViolation>),

    #[error(transparent)]
    Machine(#[from] MachineError),
}
