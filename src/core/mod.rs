//! Core state machine types.
//!
//! This module contains the building blocks the machine is wired from:
//! - State kinds via the `StateKind` trait
//! - State behavior via the `State` trait and `StateHandle`
//! - Guard predicates via `Predicate` and `Condition`
//! - Immutable history of state changes

mod history;
mod kind;
mod predicate;
mod state;

pub use history::{StateHistory, StateTransition, TransitionCause};
pub use kind::StateKind;
pub use predicate::{Condition, Predicate};
pub use state::{State, StateHandle};
