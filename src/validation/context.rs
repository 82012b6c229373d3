//! Context provided to wiring checks.

use crate::core::StateKind;
use crate::machine::StateMachine;
use std::collections::HashSet;

/// A wired machine together with the kind it is about to start in.
pub struct WiringContext<'a, K: StateKind> {
    pub machine: &'a StateMachine<K>,
    pub initial: K,
}

impl<'a, K: StateKind> WiringContext<'a, K> {
    pub fn new(machine: &'a StateMachine<K>, initial: K) -> Self {
        Self { machine, initial }
    }

    /// Kinds the machine can ever be in when started at `initial`.
    ///
    /// Any-transition targets are reachable from every state, so they seed
    /// the search together with the initial kind.
    pub fn reachable(&self) -> HashSet<K> {
        let mut seen = HashSet::new();
        if !self.machine.contains(self.initial) {
            return seen;
        }

        let mut pending = vec![self.initial];
        pending.extend(self.machine.any_targets());

        while let Some(kind) = pending.pop() {
            if seen.insert(kind) {
                pending.extend(self.machine.local_targets(kind));
            }
        }
        seen
    }
}
