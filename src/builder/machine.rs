//! Builder for wiring and starting state machines.

use crate::builder::error::BuildError;
use crate::core::{Predicate, StateHandle, StateKind};
use crate::machine::{MachineConfig, StateMachine};
use crate::validation::{ValidationRules, ViolationStrategy, WiringContext};
use stillwater::validation::Validation;

enum Wiring<K: StateKind> {
    Local {
        from: StateHandle<K>,
        to: StateHandle<K>,
        predicate: Predicate,
    },
    Any {
        to: StateHandle<K>,
        predicate: Predicate,
    },
}

/// Builder for wiring a state machine with a fluent API.
///
/// Transitions are registered in call order, which is also their priority
/// order. `build` validates the graph and starts the machine in the initial
/// state.
///
/// # Example
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use tickstate::builder::StateMachineBuilder;
/// use tickstate::core::{Predicate, State, StateHandle};
/// use tickstate::state_kind;
///
/// state_kind! {
///     enum Kind { Idle, Walk, Jump }
/// }
///
/// struct Blank;
/// impl State for Blank {}
///
/// let jump_pressed = Rc::new(Cell::new(false));
/// let jumping = {
///     let pressed = jump_pressed.clone();
///     Predicate::new(move || pressed.get())
/// };
///
/// let idle = StateHandle::new(Kind::Idle, Blank);
/// let walk = StateHandle::new(Kind::Walk, Blank);
/// let jump = StateHandle::new(Kind::Jump, Blank);
///
/// let mut machine = StateMachineBuilder::new()
///     .at(&idle, &walk, Predicate::never())
///     .at(&walk, &idle, Predicate::always())
///     .at(&jump, &idle, jumping.negate())
///     .any(&jump, jumping)
///     .initial(Kind::Idle)
///     .build()
///     .unwrap();
///
/// jump_pressed.set(true);
/// assert_eq!(machine.update_state().unwrap().current(), Kind::Jump);
/// ```
pub struct StateMachineBuilder<K: StateKind> {
    initial: Option<K>,
    transitions: Vec<Wiring<K>>,
    config: MachineConfig,
    rules: ValidationRules<K>,
}

impl<K: StateKind> StateMachineBuilder<K> {
    pub fn new() -> Self {
        Self {
            initial: None,
            transitions: Vec::new(),
            config: MachineConfig::default(),
            rules: ValidationRules::default(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, kind: K) -> Self {
        self.initial = Some(kind);
        self
    }

    /// Add a local transition from `from` to `to`.
    pub fn at(mut self, from: &StateHandle<K>, to: &StateHandle<K>, predicate: Predicate) -> Self {
        self.transitions.push(Wiring::Local {
            from: from.clone(),
            to: to.clone(),
            predicate,
        });
        self
    }

    /// Add a global transition to `to`.
    pub fn any(mut self, to: &StateHandle<K>, predicate: Predicate) -> Self {
        self.transitions.push(Wiring::Any {
            to: to.clone(),
            predicate,
        });
        self
    }

    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the default validation rules.
    pub fn rules(mut self, rules: ValidationRules<K>) -> Self {
        self.rules = rules;
        self
    }

    /// Wire, validate and start the machine.
    ///
    /// With the default rules a state unreachable from the initial state
    /// aborts the build; a second instance of a kind does not. Use
    /// [`rules`](Self::rules) to loosen or tighten this.
    pub fn build(self) -> Result<StateMachine<K>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.transitions.is_empty() {
            return Err(BuildError::NoTransitions);
        }

        let mut machine = StateMachine::with_config(self.config);
        for wiring in self.transitions {
            match wiring {
                Wiring::Local {
                    from,
                    to,
                    predicate,
                } => machine.add_transition(&from, &to, predicate),
                Wiring::Any { to, predicate } => machine.add_any_transition(&to, predicate),
            }
        }

        if let Validation::Failure(errors) = self.rules.validate(&WiringContext::new(&machine, initial)) {
            let violations: Vec<_> = errors.iter().cloned().collect();
            match self.rules.violation_strategy() {
                ViolationStrategy::Abort => return Err(BuildError::InvalidWiring(violations)),
                ViolationStrategy::IgnoreAndLog => {
                    for violation in &violations {
                        tracing::warn!(%violation, "ignoring wiring violation");
                    }
                }
            }
        }

        machine.set_state(initial)?;
        Ok(machine)
    }
}

impl<K: StateKind> Default for StateMachineBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}
