//! Predicates guarding state transitions.
//!
//! A predicate answers one question, "may this transition fire now?", by
//! reading whatever external state it captured (input, physics flags,
//! timers). It never mutates the machine.

use std::fmt;
use std::rc::Rc;

/// Capability with a single boolean evaluation.
///
/// Implemented for every `Fn() -> bool` closure, so most guards are written
/// inline. Implement it directly for reusable, named conditions.
///
/// # Example
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use tickstate::core::{Condition, Predicate};
///
/// struct Grounded(Rc<Cell<bool>>);
///
/// impl Condition for Grounded {
///     fn evaluate(&self) -> bool {
///         self.0.get()
///     }
/// }
///
/// let flag = Rc::new(Cell::new(false));
/// let grounded = Predicate::new(Grounded(flag.clone()));
///
/// assert!(!grounded.evaluate());
/// flag.set(true);
/// assert!(grounded.evaluate());
/// ```
pub trait Condition {
    fn evaluate(&self) -> bool;
}

impl<F> Condition for F
where
    F: Fn() -> bool,
{
    fn evaluate(&self) -> bool {
        self()
    }
}

/// Shared handle to a transition guard.
///
/// Cloning a predicate shares the underlying condition, and clones compare
/// equal under [`Predicate::same_as`]. Two transitions are identical when
/// they target the same kind with the same predicate.
///
/// # Example
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use tickstate::core::Predicate;
///
/// let input = Rc::new(Cell::new((0.0_f32, 0.0_f32)));
/// let moving = {
///     let input = input.clone();
///     Predicate::new(move || input.get() != (0.0, 0.0))
/// };
///
/// assert!(!moving.evaluate());
/// input.set((1.0, 0.0));
/// assert!(moving.evaluate());
/// assert!(!moving.negate().evaluate());
/// ```
#[derive(Clone)]
pub struct Predicate {
    condition: Rc<dyn Condition>,
}

impl Predicate {
    /// Create a predicate from a condition or closure.
    pub fn new<C>(condition: C) -> Self
    where
        C: Condition + 'static,
    {
        Predicate {
            condition: Rc::new(condition),
        }
    }

    /// A predicate that always holds.
    pub fn always() -> Self {
        Self::new(|| true)
    }

    /// A predicate that never holds.
    pub fn never() -> Self {
        Self::new(|| false)
    }

    /// Evaluate the guard.
    pub fn evaluate(&self) -> bool {
        self.condition.evaluate()
    }

    /// Both predicates hold. Short-circuits on `self`.
    pub fn and(&self, other: &Predicate) -> Predicate {
        let (left, right) = (self.clone(), other.clone());
        Predicate::new(move || left.evaluate() && right.evaluate())
    }

    /// Either predicate holds. Short-circuits on `self`.
    pub fn or(&self, other: &Predicate) -> Predicate {
        let (left, right) = (self.clone(), other.clone());
        Predicate::new(move || left.evaluate() || right.evaluate())
    }

    pub fn negate(&self) -> Predicate {
        let inner = self.clone();
        Predicate::new(move || !inner.evaluate())
    }

    /// True when both handles share the same underlying condition.
    pub fn same_as(&self, other: &Predicate) -> bool {
        std::ptr::eq(
            Rc::as_ptr(&self.condition) as *const (),
            Rc::as_ptr(&other.condition) as *const (),
        )
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Predicate({:p})", Rc::as_ptr(&self.condition) as *const ())
    }
}
