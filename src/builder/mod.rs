//! Builder API for ergonomic state machine wiring.
//!
//! This module provides a fluent builder that mirrors the usual "brain"
//! wiring of a controller (`at` for local transitions, `any` for global
//! ones) and a macro for declaring state kinds.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::StateMachineBuilder;
