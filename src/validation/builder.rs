//! Builder API for creating validation rules.

use crate::core::StateKind;
use crate::validation::context::WiringContext;
use crate::validation::rules::{ValidationRules, WiringCheck};
use crate::validation::violations::{ViolationStrategy, WiringViolation};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for creating validation rules
pub struct ValidationBuilder<K: StateKind> {
    check_reachability: bool,
    reject_collisions: bool,
    required_checks: Vec<WiringCheck<K>>,
    on_violation: ViolationStrategy,
}

impl<K: StateKind> ValidationBuilder<K> {
    pub fn new() -> Self {
        Self {
            check_reachability: true,
            reject_collisions: false,
            required_checks: Vec::new(),
            on_violation: ViolationStrategy::Abort,
        }
    }

    /// Do not report states unreachable from the initial state
    pub fn skip_reachability(mut self) -> Self {
        self.check_reachability = false;
        self
    }

    /// Report kinds registered with more than one instance. Off by default:
    /// later instances collapse onto the first.
    pub fn reject_collisions(mut self) -> Self {
        self.reject_collisions = true;
        self
    }

    /// Add a custom validation check
    pub fn require<F>(mut self, check: F) -> Self
    where
        F: Fn(&WiringContext<'_, K>) -> Validation<(), NonEmptyVec<WiringViolation>> + 'static,
    {
        self.required_checks.push(Box::new(check));
        self
    }

    /// Add a simple predicate check with error message
    pub fn require_pred<F>(mut self, predicate: F, error_msg: String) -> Self
    where
        F: Fn(&WiringContext<'_, K>) -> bool + 'static,
    {
        let check = move |ctx: &WiringContext<'_, K>| {
            if predicate(ctx) {
                Validation::success(())
            } else {
                Validation::fail(WiringViolation::CustomCheckFailed {
                    message: error_msg.clone(),
                })
            }
        };
        self.required_checks.push(Box::new(check));
        self
    }

    /// Set violation handling strategy
    pub fn on_violation(mut self, strategy: ViolationStrategy) -> Self {
        self.on_violation = strategy;
        self
    }

    pub fn build(self) -> ValidationRules<K> {
        ValidationRules {
            check_reachability: self.check_reachability,
            reject_collisions: self.reject_collisions,
            required_checks: self.required_checks,
            on_violation: self.on_violation,
        }
    }
}

impl<K: StateKind> Default for ValidationBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}
