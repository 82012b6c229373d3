//! Graph nodes and guarded edges.

use crate::core::{Predicate, StateHandle, StateKind};

/// A guarded edge to a target kind.
///
/// Transitions are immutable. Two transitions are identical when they target
/// the same kind with the same predicate (see [`Predicate::same_as`]).
#[derive(Clone, Debug)]
pub struct Transition<K: StateKind> {
    pub to: K,
    pub predicate: Predicate,
}

impl<K: StateKind> Transition<K> {
    pub fn new(to: K, predicate: Predicate) -> Self {
        Self { to, predicate }
    }

    /// Check whether the guard currently holds.
    pub fn is_satisfied(&self) -> bool {
        self.predicate.evaluate()
    }

    pub fn is_identical(&self, other: &Transition<K>) -> bool {
        self.to == other.to && self.predicate.same_as(&other.predicate)
    }
}

/// Insert into an insertion-ordered transition set. Returns `false` when an
/// identical transition was already present.
pub(crate) fn insert_unique<K: StateKind>(
    transitions: &mut Vec<Transition<K>>,
    transition: Transition<K>,
) -> bool {
    if transitions.iter().any(|t| t.is_identical(&transition)) {
        return false;
    }
    transitions.push(transition);
    true
}

/// One node per distinct kind: the canonical state handle plus its outgoing
/// local transitions in registration order.
#[derive(Debug)]
pub struct StateNode<K: StateKind> {
    pub(crate) state: StateHandle<K>,
    pub(crate) transitions: Vec<Transition<K>>,
}

impl<K: StateKind> StateNode<K> {
    pub(crate) fn new(state: StateHandle<K>) -> Self {
        Self {
            state,
            transitions: Vec::new(),
        }
    }

    pub fn kind(&self) -> K {
        self.state.kind()
    }

    pub fn transitions(&self) -> &[Transition<K>] {
        &self.transitions
    }

    pub(crate) fn add_transition(&mut self, to: K, predicate: Predicate) -> bool {
        insert_unique(&mut self.transitions, Transition::new(to, predicate))
    }

    /// First satisfied transition in registration order.
    pub(crate) fn first_satisfied(&self) -> Option<&Transition<K>> {
        self.transitions.iter().find(|t| t.is_satisfied())
    }
}
