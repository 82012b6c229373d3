//! State kinds: the keys that identify nodes in a state machine.
//!
//! A kind is the logical identity of a state ("Idle", "Walk"), independent
//! of the object that implements its behavior. The machine looks nodes up by
//! kind, so two handles carrying the same kind refer to the same node.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state kind tags.
///
/// Kinds are small copyable values, usually fieldless enums. They are used as
/// map keys, recorded in transition history and written into checkpoints.
///
/// # Required Traits
///
/// - `Copy` + `Eq` + `Hash`: kinds key the node table
/// - `Debug`: kinds appear in diagnostics
/// - `Serialize` + `Deserialize`: kinds are persisted in checkpoints
///
/// # Example
///
/// ```rust
/// use tickstate::core::StateKind;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum PlayerKind {
///     Idle,
///     Walk,
///     Jump,
/// }
///
/// impl StateKind for PlayerKind {
///     fn name(&self) -> &str {
///         match self {
///             Self::Idle => "Idle",
///             Self::Walk => "Walk",
///             Self::Jump => "Jump",
///         }
///     }
/// }
///
/// assert_eq!(PlayerKind::Walk.name(), "Walk");
/// ```
///
/// The [`state_kind!`](crate::state_kind) macro generates all of the above.
pub trait StateKind:
    Copy + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + 'static
{
    /// Get the kind's name for display/logging.
    fn name(&self) -> &str;
}
