//! Wiring rules for state graphs using Validation.

use crate::core::StateKind;
use crate::validation::context::WiringContext;
use crate::validation::violations::{ViolationStrategy, WiringViolation};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Type alias for custom wiring checks
pub type WiringCheck<K> =
    Box<dyn Fn(&WiringContext<'_, K>) -> Validation<(), NonEmptyVec<WiringViolation>>>;

/// Rules a wired machine must satisfy before it starts.
/// Uses Validation to accumulate ALL violations.
pub struct ValidationRules<K: StateKind> {
    pub(crate) check_reachability: bool,
    pub(crate) reject_collisions: bool,
    pub(crate) required_checks: Vec<WiringCheck<K>>,
    pub(crate) on_violation: ViolationStrategy,
}

impl<K: StateKind> ValidationRules<K> {
    /// Validate all rules, accumulating ALL violations.
    pub fn validate(&self, context: &WiringContext<'_, K>) -> Validation<(), NonEmptyVec<WiringViolation>> {
        let machine = context.machine;
        let mut checks: Vec<Validation<(), NonEmptyVec<WiringViolation>>> = Vec::new();

        if machine.kinds().is_empty() {
            checks.push(Validation::fail(WiringViolation::EmptyGraph));
        } else if !machine.contains(context.initial) {
            checks.push(Validation::fail(WiringViolation::UnknownInitial {
                state: context.initial.name().to_string(),
            }));
        } else if self.check_reachability {
            let reachable = context.reachable();
            for kind in machine.kinds() {
                if !reachable.contains(kind) {
                    checks.push(Validation::fail(WiringViolation::Unreachable {
                        state: kind.name().to_string(),
                    }));
                }
            }
        }

        if self.reject_collisions {
            for kind in machine.kind_collisions() {
                checks.push(Validation::fail(WiringViolation::KindCollision {
                    state: kind.name().to_string(),
                }));
            }
        }

        for check_fn in &self.required_checks {
            checks.push(check_fn(context));
        }

        Validation::all_vec(checks).map(|_| ())
    }

    pub fn violation_strategy(&self) -> ViolationStrategy {
        self.on_violation
    }
}

impl<K: StateKind> Default for ValidationRules<K> {
    fn default() -> Self {
        crate::validation::ValidationBuilder::new().build()
    }
}
