//! State change history.
//!
//! Every change of the active state is recorded as an immutable
//! [`StateTransition`]. The log is what checkpoints carry and what owners
//! inspect when debugging a controller.

use super::kind::StateKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Why the active state changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionCause {
    /// First `set_state` on a machine with no active state
    Initial,
    /// `set_state` or `resume` replacing an active state
    Forced,
    /// A global (any-state) transition fired
    Any,
    /// A transition attached to the previous state fired
    Local,
}

/// Record of a single state change.
///
/// # Example
///
/// ```rust
/// use tickstate::core::{StateTransition, TransitionCause};
/// use tickstate::state_kind;
/// use chrono::Utc;
///
/// state_kind! {
///     enum Kind { Idle, Walk }
/// }
///
/// let transition = StateTransition {
///     from: Some(Kind::Idle),
///     to: Kind::Walk,
///     timestamp: Utc::now(),
///     tick: 12,
///     cause: TransitionCause::Local,
/// };
/// assert_eq!(transition.to, Kind::Walk);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<K: StateKind> {
    /// The previously active kind, absent for the initial `set_state`
    pub from: Option<K>,
    /// The newly active kind
    pub to: K,
    /// When the change happened
    pub timestamp: DateTime<Utc>,
    /// The machine's tick counter at the time of the change
    pub tick: u64,
    pub cause: TransitionCause,
}

/// Ordered history of state changes.
///
/// History is immutable - `record` returns a new history with the change
/// appended.
///
/// # Example
///
/// ```rust
/// use tickstate::core::{StateHistory, StateTransition, TransitionCause};
/// use tickstate::state_kind;
/// use chrono::Utc;
///
/// state_kind! {
///     enum Kind { Idle, Walk, Jump }
/// }
///
/// let history = StateHistory::new()
///     .record(StateTransition {
///         from: None,
///         to: Kind::Idle,
///         timestamp: Utc::now(),
///         tick: 0,
///         cause: TransitionCause::Initial,
///     })
///     .record(StateTransition {
///         from: Some(Kind::Idle),
///         to: Kind::Walk,
///         timestamp: Utc::now(),
///         tick: 3,
///         cause: TransitionCause::Local,
///     });
///
/// assert_eq!(history.get_path(), vec![&Kind::Idle, &Kind::Walk]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<K: StateKind> {
    transitions: Vec<StateTransition<K>>,
}

impl<K: StateKind> Default for StateHistory<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: StateKind> StateHistory<K> {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Return a new history with `transition` appended.
    pub fn record(&self, transition: StateTransition<K>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Return a new history holding only the `limit` most recent records.
    pub fn retain_last(&self, limit: usize) -> Self {
        let skip = self.transitions.len().saturating_sub(limit);
        Self {
            transitions: self.transitions[skip..].to_vec(),
        }
    }

    /// Sequence of kinds visited, starting with the first record's source
    /// when it has one.
    pub fn get_path(&self) -> Vec<&K> {
        let mut path = Vec::new();
        if let Some(from) = self.transitions.first().and_then(|t| t.from.as_ref()) {
            path.push(from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Wall-clock time between the first and last record.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    pub fn transitions(&self) -> &[StateTransition<K>] {
        &self.transitions
    }

    pub fn last(&self) -> Option<&StateTransition<K>> {
        self.transitions.last()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
