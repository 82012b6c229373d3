//! Lifecycle trait for state behavior and the shared handle the machine
//! holds for each state.

use super::kind::StateKind;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Behavior attached to a state.
///
/// Every callback defaults to a no-op so a state only overrides the phases it
/// cares about. The machine calls `on_enter`/`on_exit` when the state becomes
/// active or inactive, and one of the three tick callbacks for each phase the
/// owner drives.
///
/// # Example
///
/// ```rust
/// use tickstate::core::State;
///
/// struct Walk {
///     steps: u32,
/// }
///
/// impl State for Walk {
///     fn fixed_update(&mut self) {
///         self.steps += 1;
///     }
/// }
/// ```
pub trait State {
    /// Called when the state becomes active.
    fn on_enter(&mut self) {}

    /// Called when the state stops being active.
    fn on_exit(&mut self) {}

    /// Called once per frame, after transitions were evaluated.
    fn update(&mut self) {}

    /// Called once per physics step.
    fn fixed_update(&mut self) {}

    /// Called once per frame after `update`.
    fn late_update(&mut self) {}
}

/// A state object paired with the kind that identifies it.
///
/// The owner creates the state and keeps it; the handle is a shared,
/// non-owning view the machine uses for dispatch. Cloning a handle clones
/// the reference, not the state.
pub struct StateHandle<K: StateKind> {
    kind: K,
    state: Rc<RefCell<dyn State>>,
}

impl<K: StateKind> StateHandle<K> {
    /// Wrap a state the owner does not need typed access to afterwards.
    pub fn new<S: State + 'static>(kind: K, state: S) -> Self {
        Self {
            kind,
            state: Rc::new(RefCell::new(state)),
        }
    }

    /// Wrap a state the owner keeps its own typed reference to.
    ///
    /// ```rust
    /// use std::cell::RefCell;
    /// use std::rc::Rc;
    /// use tickstate::core::{State, StateHandle};
    /// use tickstate::state_kind;
    ///
    /// state_kind! {
    ///     enum Kind { Idle }
    /// }
    ///
    /// #[derive(Default)]
    /// struct Idle { entered: u32 }
    ///
    /// impl State for Idle {
    ///     fn on_enter(&mut self) { self.entered += 1; }
    /// }
    ///
    /// let idle = Rc::new(RefCell::new(Idle::default()));
    /// let handle = StateHandle::shared(Kind::Idle, idle.clone());
    /// assert_eq!(handle.kind(), Kind::Idle);
    /// ```
    pub fn shared<S: State + 'static>(kind: K, state: Rc<RefCell<S>>) -> Self {
        Self { kind, state }
    }

    pub fn kind(&self) -> K {
        self.kind
    }

    /// True when both handles point at the same state object.
    pub fn same_instance(&self, other: &Self) -> bool {
        std::ptr::eq(
            Rc::as_ptr(&self.state) as *const (),
            Rc::as_ptr(&other.state) as *const (),
        )
    }

    pub(crate) fn cell(&self) -> &RefCell<dyn State> {
        &self.state
    }
}

impl<K: StateKind> Clone for StateHandle<K> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            state: Rc::clone(&self.state),
        }
    }
}

impl<K: StateKind> fmt::Debug for StateHandle<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateHandle")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
