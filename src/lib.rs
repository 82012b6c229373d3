//! Tickstate: a frame-driven finite state machine.
//!
//! The machine is driven by its owner once per frame and once per physics
//! step. Each frame it evaluates guarded transitions, switches state when a
//! guard holds, and dispatches lifecycle callbacks to the active state.
//!
//! # Core Concepts
//!
//! - **Kinds**: owner-supplied tags identifying states via the `StateKind` trait
//! - **States**: behavior objects implementing the `State` lifecycle
//! - **Predicates**: pure guards deciding whether a transition fires
//! - **Any transitions**: global transitions that preempt local ones
//!
//! # Example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use tickstate::builder::StateMachineBuilder;
//! use tickstate::core::{Predicate, State, StateHandle};
//! use tickstate::state_kind;
//!
//! state_kind! {
//!     enum PlayerKind {
//!         Idle,
//!         Walk,
//!     }
//! }
//!
//! struct Idle;
//! impl State for Idle {}
//!
//! struct Walk;
//! impl State for Walk {}
//!
//! let move_input = Rc::new(Cell::new((0.0_f32, 0.0_f32)));
//! let moving = {
//!     let input = move_input.clone();
//!     Predicate::new(move || input.get() != (0.0, 0.0))
//! };
//!
//! let idle = StateHandle::new(PlayerKind::Idle, Idle);
//! let walk = StateHandle::new(PlayerKind::Walk, Walk);
//!
//! let mut machine = StateMachineBuilder::new()
//!     .at(&idle, &walk, moving.clone())
//!     .at(&walk, &idle, moving.negate())
//!     .initial(PlayerKind::Idle)
//!     .build()
//!     .unwrap();
//!
//! move_input.set((1.0, 0.0));
//! machine.update_state().unwrap();
//! machine.fixed_update_state().unwrap();
//! machine.late_update_state().unwrap();
//!
//! assert_eq!(machine.current_kind(), Some(PlayerKind::Walk));
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod machine;
pub mod validation;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder};
pub use crate::core::{Condition, Predicate, State, StateHandle, StateKind};
pub use machine::{MachineConfig, MachineError, StateMachine, TickResult};
