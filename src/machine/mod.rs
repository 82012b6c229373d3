//! The state machine engine.
//!
//! # Key Concepts
//!
//! - **Nodes**: one per state kind, holding the canonical state handle and
//!   its local transitions
//! - **Any transitions**: global edges evaluated before local ones
//! - **Ticks**: `update_state` evaluates at most one transition, then
//!   `fixed_update_state` and `late_update_state` forward to the active state

mod config;
mod error;
mod node;
mod state_machine;

pub use config::{MachineConfig, DEFAULT_HISTORY_LIMIT};
pub use error::MachineError;
pub use node::{StateNode, Transition};
pub use state_machine::{StateMachine, TickResult};
