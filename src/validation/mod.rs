//! Wiring validation for state graphs.
//!
//! Wiring mistakes (an initial state that was never registered, a state no
//! transition leads to, two instances passed for one kind) are owner bugs.
//! Validation uses Stillwater's `Validation` type to report all of them in
//! one pass instead of stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use tickstate::core::{Predicate, State, StateHandle};
//! use tickstate::machine::StateMachine;
//! use tickstate::state_kind;
//! use tickstate::validation::{ValidationBuilder, WiringContext};
//!
//! state_kind! {
//!     enum Kind { Idle, Walk, Swim }
//! }
//!
//! struct Blank;
//! impl State for Blank {}
//!
//! let mut machine = StateMachine::new();
//! machine.add_transition(
//!     &StateHandle::new(Kind::Idle, Blank),
//!     &StateHandle::new(Kind::Walk, Blank),
//!     Predicate::always(),
//! );
//! machine.add_transition(
//!     &StateHandle::new(Kind::Swim, Blank),
//!     &StateHandle::new(Kind::Idle, Blank),
//!     Predicate::always(),
//! );
//!
//! let rules = ValidationBuilder::new().build();
//! let result = rules.validate(&WiringContext::new(&machine, Kind::Idle));
//! assert!(result.is_failure()); // Swim is unreachable
//! ```

pub mod builder;
pub mod context;
pub mod rules;
pub mod violations;

pub use builder::ValidationBuilder;
pub use context::WiringContext;
pub use rules::{ValidationRules, WiringCheck};
pub use violations::{ViolationStrategy, WiringViolation};
