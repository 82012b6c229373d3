//! Frame-driven state machine with local and global guarded transitions.

use crate::core::{Predicate, StateHandle, StateHistory, StateKind, StateTransition, TransitionCause};
use crate::machine::config::MachineConfig;
use crate::machine::error::MachineError;
use crate::machine::node::{insert_unique, StateNode, Transition};
use chrono::Utc;
use std::collections::HashMap;

/// Outcome of one [`StateMachine::update_state`] tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickResult<K: StateKind> {
    /// No guard held; the active state is unchanged
    Stayed(K),

    /// The chosen transition targeted the active state; nothing was re-entered
    SelfTransition(K),

    /// The active state changed
    Transitioned {
        from: K,
        to: K,
        cause: TransitionCause,
    },
}

impl<K: StateKind> TickResult<K> {
    /// The active kind after the tick.
    pub fn current(&self) -> K {
        match *self {
            Self::Stayed(kind) | Self::SelfTransition(kind) => kind,
            Self::Transitioned { to, .. } => to,
        }
    }

    pub fn changed(&self) -> bool {
        matches!(self, Self::Transitioned { .. })
    }
}

#[derive(Clone, Copy, Debug)]
enum Phase {
    Enter,
    Exit,
    Update,
    FixedUpdate,
    LateUpdate,
}

/// State machine holding a graph of kind-keyed nodes and guarded transitions.
///
/// The owner wires the graph, picks the initial state with
/// [`set_state`](Self::set_state) and then drives the three tick phases:
/// [`update_state`](Self::update_state) once per frame (the only phase that
/// evaluates transitions), [`fixed_update_state`](Self::fixed_update_state)
/// once per physics step and [`late_update_state`](Self::late_update_state)
/// after update.
///
/// # Example
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use tickstate::core::{Predicate, State, StateHandle};
/// use tickstate::machine::StateMachine;
/// use tickstate::state_kind;
///
/// state_kind! {
///     enum Kind { Idle, Walk }
/// }
///
/// struct Idle;
/// impl State for Idle {}
/// struct Walk;
/// impl State for Walk {}
///
/// let input = Rc::new(Cell::new(0.0_f32));
/// let moving = {
///     let input = input.clone();
///     Predicate::new(move || input.get() != 0.0)
/// };
///
/// let idle = StateHandle::new(Kind::Idle, Idle);
/// let walk = StateHandle::new(Kind::Walk, Walk);
///
/// let mut machine = StateMachine::new();
/// machine.add_transition(&idle, &walk, moving.clone());
/// machine.add_transition(&walk, &idle, moving.negate());
/// machine.set_state(Kind::Idle).unwrap();
///
/// input.set(1.0);
/// let result = machine.update_state().unwrap();
/// assert_eq!(result.current(), Kind::Walk);
/// ```
pub struct StateMachine<K: StateKind> {
    current: Option<K>,
    nodes: HashMap<K, StateNode<K>>,
    order: Vec<K>,
    any_transitions: Vec<Transition<K>>,
    collisions: Vec<K>,
    history: StateHistory<K>,
    config: MachineConfig,
    tick: u64,
}

impl<K: StateKind> StateMachine<K> {
    /// Create an empty machine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(MachineConfig::default())
    }

    pub fn with_config(config: MachineConfig) -> Self {
        Self {
            current: None,
            nodes: HashMap::new(),
            order: Vec::new(),
            any_transitions: Vec::new(),
            collisions: Vec::new(),
            history: StateHistory::new(),
            config,
            tick: 0,
        }
    }

    /// Register a transition from `from` to `to`, guarded by `predicate`.
    ///
    /// Nodes for both kinds are created on first sight. The first handle
    /// seen for a kind stays canonical; a later, distinct handle of the same
    /// kind collapses onto it. Registering an identical transition again has
    /// no effect.
    pub fn add_transition(
        &mut self,
        from: &StateHandle<K>,
        to: &StateHandle<K>,
        predicate: Predicate,
    ) {
        let from_kind = self.get_or_add_node(from);
        let to_kind = self.get_or_add_node(to);

        if let Some(node) = self.nodes.get_mut(&from_kind) {
            if !node.add_transition(to_kind, predicate) {
                tracing::trace!(
                    from = from_kind.name(),
                    to = to_kind.name(),
                    "duplicate transition ignored"
                );
            }
        }
    }

    /// Register a global transition to `to`, eligible from every state and
    /// evaluated before any local transition.
    pub fn add_any_transition(&mut self, to: &StateHandle<K>, predicate: Predicate) {
        let to_kind = self.get_or_add_node(to);

        if !insert_unique(&mut self.any_transitions, Transition::new(to_kind, predicate)) {
            tracing::trace!(to = to_kind.name(), "duplicate any transition ignored");
        }
    }

    /// Make the node of `kind` the active state.
    ///
    /// When a state is already active it receives `on_exit` first, even when
    /// `kind` is the active kind. The new state then receives `on_enter`.
    pub fn set_state(&mut self, kind: K) -> Result<(), MachineError> {
        self.node(kind)?;
        self.ensure_dispatchable(self.current.into_iter().chain([kind]))?;

        let previous = self.current;
        if let Some(previous) = previous {
            self.dispatch(previous, Phase::Exit)?;
        }
        self.dispatch(kind, Phase::Enter)?;
        self.current = Some(kind);

        let cause = if previous.is_some() {
            TransitionCause::Forced
        } else {
            TransitionCause::Initial
        };
        tracing::debug!(
            from = previous.as_ref().map(|k| k.name()),
            to = kind.name(),
            ?cause,
            "state set"
        );
        self.record(previous, kind, cause);
        Ok(())
    }

    /// Per-frame tick: evaluate transitions, change state if one fired, then
    /// run `update` on the active state.
    ///
    /// Any transitions are scanned first, in registration order; the current
    /// node's local transitions are scanned only when none of them holds. At
    /// most one transition fires per tick.
    pub fn update_state(&mut self) -> Result<TickResult<K>, MachineError> {
        let current = self.current.ok_or(MachineError::NotStarted)?;
        self.tick += 1;

        let result = match self.find_transition(current)? {
            None => TickResult::Stayed(current),
            Some((to, _)) if to == current => TickResult::SelfTransition(current),
            Some((to, cause)) => {
                self.change_state(current, to, cause)?;
                TickResult::Transitioned {
                    from: current,
                    to,
                    cause,
                }
            }
        };

        self.dispatch(result.current(), Phase::Update)?;
        Ok(result)
    }

    /// Physics-step tick. Does not evaluate transitions.
    pub fn fixed_update_state(&mut self) -> Result<(), MachineError> {
        let current = self.current.ok_or(MachineError::NotStarted)?;
        self.dispatch(current, Phase::FixedUpdate)
    }

    /// Late-frame tick. Does not evaluate transitions.
    pub fn late_update_state(&mut self) -> Result<(), MachineError> {
        let current = self.current.ok_or(MachineError::NotStarted)?;
        self.dispatch(current, Phase::LateUpdate)
    }

    pub fn current_kind(&self) -> Option<K> {
        self.current
    }

    pub fn is_started(&self) -> bool {
        self.current.is_some()
    }

    pub fn contains(&self, kind: K) -> bool {
        self.nodes.contains_key(&kind)
    }

    /// Registered kinds in first-seen order.
    pub fn kinds(&self) -> &[K] {
        &self.order
    }

    pub fn get_node(&self, kind: K) -> Option<&StateNode<K>> {
        self.nodes.get(&kind)
    }

    /// Targets of the local transitions of `kind`, in registration order.
    pub fn local_targets(&self, kind: K) -> Vec<K> {
        self.nodes
            .get(&kind)
            .map(|node| node.transitions().iter().map(|t| t.to).collect())
            .unwrap_or_default()
    }

    /// Targets of the any transitions, in registration order.
    pub fn any_targets(&self) -> Vec<K> {
        self.any_transitions.iter().map(|t| t.to).collect()
    }

    pub fn transition_count(&self, kind: K) -> usize {
        self.nodes
            .get(&kind)
            .map_or(0, |node| node.transitions().len())
    }

    pub fn any_transition_count(&self) -> usize {
        self.any_transitions.len()
    }

    /// Kinds for which a second, distinct state instance was registered and
    /// collapsed onto the first.
    pub fn kind_collisions(&self) -> &[K] {
        &self.collisions
    }

    pub fn history(&self) -> &StateHistory<K> {
        &self.history
    }

    /// Number of `update_state` calls so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Put the machine at a previously captured position. Exits the active
    /// state if there is one and enters `kind`; history is replaced, not
    /// appended to, and trimmed to this machine's configuration.
    pub(crate) fn restore_position(
        &mut self,
        kind: K,
        tick: u64,
        history: StateHistory<K>,
    ) -> Result<(), MachineError> {
        self.node(kind)?;
        self.ensure_dispatchable(self.current.into_iter().chain([kind]))?;

        if let Some(previous) = self.current {
            self.dispatch(previous, Phase::Exit)?;
        }
        self.dispatch(kind, Phase::Enter)?;
        self.current = Some(kind);
        self.tick = tick;
        self.history = match (self.config.record_history, self.config.history_limit) {
            (false, _) => StateHistory::new(),
            (true, Some(limit)) => history.retain_last(limit),
            (true, None) => history,
        };

        tracing::debug!(state = kind.name(), tick, "position restored");
        Ok(())
    }

    fn get_or_add_node(&mut self, state: &StateHandle<K>) -> K {
        let kind = state.kind();
        match self.nodes.get(&kind) {
            Some(node) => {
                if !node.state.same_instance(state) && !self.collisions.contains(&kind) {
                    tracing::debug!(
                        state = kind.name(),
                        "distinct instance collapsed onto registered state"
                    );
                    self.collisions.push(kind);
                }
            }
            None => {
                self.nodes.insert(kind, StateNode::new(state.clone()));
                self.order.push(kind);
            }
        }
        kind
    }

    fn node(&self, kind: K) -> Result<&StateNode<K>, MachineError> {
        self.nodes.get(&kind).ok_or_else(|| MachineError::UnknownState {
            state: kind.name().to_string(),
        })
    }

    fn find_transition(
        &self,
        current: K,
    ) -> Result<Option<(K, TransitionCause)>, MachineError> {
        if let Some(transition) = self.any_transitions.iter().find(|t| t.is_satisfied()) {
            return Ok(Some((transition.to, TransitionCause::Any)));
        }

        let node = self.node(current)?;
        Ok(node
            .first_satisfied()
            .map(|transition| (transition.to, TransitionCause::Local)))
    }

    fn change_state(&mut self, from: K, to: K, cause: TransitionCause) -> Result<(), MachineError> {
        self.ensure_dispatchable([from, to])?;
        self.dispatch(from, Phase::Exit)?;
        self.dispatch(to, Phase::Enter)?;
        self.current = Some(to);

        tracing::debug!(
            from = from.name(),
            to = to.name(),
            ?cause,
            tick = self.tick,
            "state changed"
        );
        self.record(Some(from), to, cause);
        Ok(())
    }

    /// Fail before any callback runs if one of `kinds` is borrowed by the
    /// owner, so a change of state is never left half done.
    fn ensure_dispatchable(&self, kinds: impl IntoIterator<Item = K>) -> Result<(), MachineError> {
        for kind in kinds {
            let node = self.node(kind)?;
            if node.state.cell().try_borrow_mut().is_err() {
                return Err(MachineError::StateBorrowed {
                    state: kind.name().to_string(),
                });
            }
        }
        Ok(())
    }

    fn dispatch(&self, kind: K, phase: Phase) -> Result<(), MachineError> {
        let node = self.node(kind)?;
        let mut state =
            node.state
                .cell()
                .try_borrow_mut()
                .map_err(|_| MachineError::StateBorrowed {
                    state: kind.name().to_string(),
                })?;

        tracing::trace!(state = kind.name(), ?phase, "dispatch");
        match phase {
            Phase::Enter => state.on_enter(),
            Phase::Exit => state.on_exit(),
            Phase::Update => state.update(),
            Phase::FixedUpdate => state.fixed_update(),
            Phase::LateUpdate => state.late_update(),
        }
        Ok(())
    }

    fn record(&mut self, from: Option<K>, to: K, cause: TransitionCause) {
        if !self.config.record_history {
            return;
        }

        self.history = self.history.record(StateTransition {
            from,
            to,
            timestamp: Utc::now(),
            tick: self.tick,
            cause,
        });

        if let Some(limit) = self.config.history_limit {
            if self.history.len() > limit {
                self.history = self.history.retain_last(limit);
            }
        }
    }
}

impl<K: StateKind> Default for StateMachine<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::State;
    use serde::{Deserialize, Serialize};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestKind {
        Idle,
        Walk,
        Jump,
    }

    impl StateKind for TestKind {
        fn name(&self) -> &str {
            match self {
                Self::Idle => "Idle",
                Self::Walk => "Walk",
                Self::Jump => "Jump",
            }
        }
    }

    type Log = Rc<RefCell<Vec<String>>>;

    struct Recorder {
        name: &'static str,
        log: Log,
    }

    impl Recorder {
        fn handle(kind: TestKind, log: &Log) -> StateHandle<TestKind> {
            StateHandle::new(
                kind,
                Recorder {
                    name: kind_name(kind),
                    log: log.clone(),
                },
            )
        }

        fn push(&self, event: &str) {
            self.log.borrow_mut().push(format!("{}.{}", self.name, event));
        }
    }

    fn kind_name(kind: TestKind) -> &'static str {
        match kind {
            TestKind::Idle => "Idle",
            TestKind::Walk => "Walk",
            TestKind::Jump => "Jump",
        }
    }

    impl State for Recorder {
        fn on_enter(&mut self) {
            self.push("enter");
        }

        fn on_exit(&mut self) {
            self.push("exit");
        }

        fn update(&mut self) {
            self.push("update");
        }

        fn fixed_update(&mut self) {
            self.push("fixed");
        }

        fn late_update(&mut self) {
            self.push("late");
        }
    }

    struct Fixture {
        log: Log,
        idle: StateHandle<TestKind>,
        walk: StateHandle<TestKind>,
        jump: StateHandle<TestKind>,
    }

    impl Fixture {
        fn new() -> Self {
            let log: Log = Rc::new(RefCell::new(Vec::new()));
            Self {
                idle: Recorder::handle(TestKind::Idle, &log),
                walk: Recorder::handle(TestKind::Walk, &log),
                jump: Recorder::handle(TestKind::Jump, &log),
                log,
            }
        }

        fn take(&self) -> Vec<String> {
            std::mem::take(&mut *self.log.borrow_mut())
        }
    }

    fn flag(initial: bool) -> (Rc<Cell<bool>>, Predicate) {
        let cell = Rc::new(Cell::new(initial));
        let predicate = {
            let cell = cell.clone();
            Predicate::new(move || cell.get())
        };
        (cell, predicate)
    }

    #[test]
    fn ticking_before_set_state_fails() {
        let mut machine: StateMachine<TestKind> = StateMachine::new();

        assert_eq!(machine.update_state(), Err(MachineError::NotStarted));
        assert_eq!(machine.fixed_update_state(), Err(MachineError::NotStarted));
        assert_eq!(machine.late_update_state(), Err(MachineError::NotStarted));
        assert_eq!(machine.tick(), 0);
    }

    #[test]
    fn set_state_rejects_unknown_kind() {
        let fx = Fixture::new();
        let mut machine = StateMachine::new();
        machine.add_transition(&fx.idle, &fx.walk, Predicate::never());

        let result = machine.set_state(TestKind::Jump);

        assert_eq!(
            result,
            Err(MachineError::UnknownState {
                state: "Jump".to_string()
            })
        );
        assert!(!machine.is_started());
        assert!(fx.take().is_empty());
    }

    #[test]
    fn set_state_enters_once() {
        let fx = Fixture::new();
        let mut machine = StateMachine::new();
        machine.add_transition(&fx.idle, &fx.walk, Predicate::never());

        machine.set_state(TestKind::Idle).unwrap();

        assert_eq!(machine.current_kind(), Some(TestKind::Idle));
        assert_eq!(fx.take(), vec!["Idle.enter"]);
        assert_eq!(machine.history().len(), 1);
        assert_eq!(
            machine.history().transitions()[0].cause,
            TransitionCause::Initial
        );
    }

    #[test]
    fn set_state_exits_active_state_first() {
        let fx = Fixture::new();
        let mut machine = StateMachine::new();
        machine.add_transition(&fx.idle, &fx.walk, Predicate::never());
        machine.set_state(TestKind::Idle).unwrap();
        fx.take();

        machine.set_state(TestKind::Walk).unwrap();
        assert_eq!(fx.take(), vec!["Idle.exit", "Walk.enter"]);

        machine.set_state(TestKind::Walk).unwrap();
        assert_eq!(fx.take(), vec!["Walk.exit", "Walk.enter"]);
        assert_eq!(
            machine.history().last().map(|t| t.cause),
            Some(TransitionCause::Forced)
        );
    }

    #[test]
    fn tick_without_satisfied_guard_only_updates() {
        let fx = Fixture::new();
        let mut machine = StateMachine::new();
        machine.add_transition(&fx.idle, &fx.walk, Predicate::never());
        machine.add_any_transition(&fx.jump, Predicate::never());
        machine.set_state(TestKind::Idle).unwrap();
        fx.take();

        let result = machine.update_state().unwrap();

        assert_eq!(result, TickResult::Stayed(TestKind::Idle));
        assert_eq!(fx.take(), vec!["Idle.update"]);
        assert_eq!(machine.tick(), 1);
    }

    #[test]
    fn local_transition_exits_enters_then_updates() {
        let fx = Fixture::new();
        let (moving, predicate) = flag(false);
        let mut machine = StateMachine::new();
        machine.add_transition(&fx.idle, &fx.walk, predicate.clone());
        machine.add_transition(&fx.walk, &fx.idle, predicate.negate());
        machine.set_state(TestKind::Idle).unwrap();
        fx.take();

        moving.set(true);
        let result = machine.update_state().unwrap();

        assert_eq!(
            result,
            TickResult::Transitioned {
                from: TestKind::Idle,
                to: TestKind::Walk,
                cause: TransitionCause::Local,
            }
        );
        assert_eq!(fx.take(), vec!["Idle.exit", "Walk.enter", "Walk.update"]);

        moving.set(false);
        let result = machine.update_state().unwrap();
        assert_eq!(result.current(), TestKind::Idle);
        assert_eq!(fx.take(), vec!["Walk.exit", "Idle.enter", "Idle.update"]);
    }

    #[test]
    fn any_transition_preempts_local() {
        let fx = Fixture::new();
        let mut machine = StateMachine::new();
        machine.add_transition(&fx.idle, &fx.walk, Predicate::always());
        machine.add_any_transition(&fx.jump, Predicate::always());
        machine.set_state(TestKind::Idle).unwrap();
        fx.take();

        let result = machine.update_state().unwrap();

        assert_eq!(
            result,
            TickResult::Transitioned {
                from: TestKind::Idle,
                to: TestKind::Jump,
                cause: TransitionCause::Any,
            }
        );
        assert_eq!(fx.take(), vec!["Idle.exit", "Jump.enter", "Jump.update"]);
    }

    #[test]
    fn local_predicates_not_evaluated_when_any_fires() {
        let fx = Fixture::new();
        let calls = Rc::new(Cell::new(0));
        let counted = {
            let calls = calls.clone();
            Predicate::new(move || {
                calls.set(calls.get() + 1);
                true
            })
        };
        let mut machine = StateMachine::new();
        machine.add_transition(&fx.idle, &fx.walk, counted);
        machine.add_any_transition(&fx.jump, Predicate::always());
        machine.set_state(TestKind::Idle).unwrap();

        machine.update_state().unwrap();

        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn first_registered_local_transition_wins() {
        let fx = Fixture::new();
        let mut machine = StateMachine::new();
        machine.add_transition(&fx.idle, &fx.jump, Predicate::always());
        machine.add_transition(&fx.idle, &fx.walk, Predicate::always());
        machine.set_state(TestKind::Idle).unwrap();

        let result = machine.update_state().unwrap();

        assert_eq!(result.current(), TestKind::Jump);
    }

    #[test]
    fn first_registered_any_transition_wins() {
        let fx = Fixture::new();
        let mut machine = StateMachine::new();
        machine.add_transition(&fx.idle, &fx.walk, Predicate::never());
        machine.add_any_transition(&fx.walk, Predicate::always());
        machine.add_any_transition(&fx.jump, Predicate::always());
        machine.set_state(TestKind::Idle).unwrap();

        let result = machine.update_state().unwrap();

        assert_eq!(result.current(), TestKind::Walk);
    }

    #[test]
    fn self_transition_is_a_no_op() {
        let fx = Fixture::new();
        let mut machine = StateMachine::new();
        machine.add_any_transition(&fx.jump, Predicate::always());
        machine.add_transition(&fx.idle, &fx.walk, Predicate::never());
        machine.set_state(TestKind::Jump).unwrap();
        fx.take();

        let result = machine.update_state().unwrap();

        assert_eq!(result, TickResult::SelfTransition(TestKind::Jump));
        assert!(!result.changed());
        assert_eq!(fx.take(), vec!["Jump.update"]);
        assert_eq!(machine.history().len(), 1);
    }

    #[test]
    fn satisfied_self_targeting_any_blocks_locals() {
        let fx = Fixture::new();
        let mut machine = StateMachine::new();
        machine.add_any_transition(&fx.jump, Predicate::always());
        machine.add_transition(&fx.jump, &fx.idle, Predicate::always());
        machine.set_state(TestKind::Jump).unwrap();

        let result = machine.update_state().unwrap();

        assert_eq!(result, TickResult::SelfTransition(TestKind::Jump));
    }

    #[test]
    fn only_one_transition_per_tick() {
        let fx = Fixture::new();
        let mut machine = StateMachine::new();
        machine.add_transition(&fx.idle, &fx.walk, Predicate::always());
        machine.add_transition(&fx.walk, &fx.jump, Predicate::always());
        machine.set_state(TestKind::Idle).unwrap();

        assert_eq!(machine.update_state().unwrap().current(), TestKind::Walk);
        assert_eq!(machine.update_state().unwrap().current(), TestKind::Jump);
    }

    #[test]
    fn fixed_and_late_updates_do_not_evaluate_transitions() {
        let fx = Fixture::new();
        let mut machine = StateMachine::new();
        machine.add_transition(&fx.idle, &fx.walk, Predicate::always());
        machine.set_state(TestKind::Idle).unwrap();
        fx.take();

        machine.fixed_update_state().unwrap();
        machine.late_update_state().unwrap();

        assert_eq!(machine.current_kind(), Some(TestKind::Idle));
        assert_eq!(fx.take(), vec!["Idle.fixed", "Idle.late"]);
    }

    #[test]
    fn duplicate_registration_is_idempotent() {
        let fx = Fixture::new();
        let predicate = Predicate::always();
        let mut machine = StateMachine::new();

        machine.add_transition(&fx.idle, &fx.walk, predicate.clone());
        machine.add_transition(&fx.idle, &fx.walk, predicate.clone());
        machine.add_any_transition(&fx.jump, predicate.clone());
        machine.add_any_transition(&fx.jump, predicate);

        assert_eq!(machine.transition_count(TestKind::Idle), 1);
        assert_eq!(machine.any_transition_count(), 1);
        assert_eq!(machine.kinds(), &[TestKind::Idle, TestKind::Walk, TestKind::Jump]);
    }

    #[test]
    fn different_predicate_adds_transition() {
        let fx = Fixture::new();
        let mut machine = StateMachine::new();

        machine.add_transition(&fx.idle, &fx.walk, Predicate::always());
        machine.add_transition(&fx.idle, &fx.walk, Predicate::always());
        machine.add_transition(&fx.idle, &fx.jump, Predicate::never());

        assert_eq!(
            machine.local_targets(TestKind::Idle),
            vec![TestKind::Walk, TestKind::Walk, TestKind::Jump]
        );
        assert!(machine.local_targets(TestKind::Walk).is_empty());
    }

    #[test]
    fn first_instance_of_a_kind_is_canonical() {
        let fx = Fixture::new();
        let other_log: Log = Rc::new(RefCell::new(Vec::new()));
        let impostor = Recorder::handle(TestKind::Walk, &other_log);
        let mut machine = StateMachine::new();

        machine.add_transition(&fx.idle, &fx.walk, Predicate::never());
        machine.add_transition(&impostor, &fx.idle, Predicate::never());
        machine.set_state(TestKind::Walk).unwrap();

        assert_eq!(fx.take(), vec!["Walk.enter"]);
        assert!(other_log.borrow().is_empty());
        assert_eq!(machine.kind_collisions(), &[TestKind::Walk]);
        assert_eq!(machine.transition_count(TestKind::Walk), 1);
    }

    #[test]
    fn borrowed_state_fails_instead_of_panicking() {
        #[derive(Default)]
        struct Plain;
        impl State for Plain {}

        let idle = Rc::new(RefCell::new(Plain));
        let idle_handle = StateHandle::shared(TestKind::Idle, idle.clone());
        let walk_handle = StateHandle::new(TestKind::Walk, Plain);
        let mut machine = StateMachine::new();
        machine.add_transition(&idle_handle, &walk_handle, Predicate::never());
        machine.set_state(TestKind::Idle).unwrap();

        let guard = idle.borrow_mut();
        let result = machine.update_state();
        drop(guard);

        assert_eq!(
            result,
            Err(MachineError::StateBorrowed {
                state: "Idle".to_string()
            })
        );
        assert!(machine.update_state().is_ok());
    }

    #[test]
    fn borrowed_target_leaves_active_state_untouched() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let idle = Recorder::handle(TestKind::Idle, &log);
        let walk = Rc::new(RefCell::new(Recorder {
            name: "Walk",
            log: log.clone(),
        }));
        let walk_handle = StateHandle::shared(TestKind::Walk, walk.clone());
        let mut machine = StateMachine::new();
        machine.add_transition(&idle, &walk_handle, Predicate::always());
        machine.set_state(TestKind::Idle).unwrap();
        log.borrow_mut().clear();

        let guard = walk.borrow_mut();
        let result = machine.update_state();
        drop(guard);

        assert_eq!(
            result,
            Err(MachineError::StateBorrowed {
                state: "Walk".to_string()
            })
        );
        assert_eq!(machine.current_kind(), Some(TestKind::Idle));
        assert!(log.borrow().is_empty());

        assert_eq!(machine.update_state().unwrap().current(), TestKind::Walk);
        assert_eq!(
            *log.borrow(),
            vec!["Idle.exit", "Walk.enter", "Walk.update"]
        );
    }

    #[test]
    fn set_state_with_borrowed_target_does_not_exit() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let idle = Recorder::handle(TestKind::Idle, &log);
        let walk = Rc::new(RefCell::new(Recorder {
            name: "Walk",
            log: log.clone(),
        }));
        let walk_handle = StateHandle::shared(TestKind::Walk, walk.clone());
        let mut machine = StateMachine::new();
        machine.add_transition(&idle, &walk_handle, Predicate::never());
        machine.set_state(TestKind::Idle).unwrap();
        log.borrow_mut().clear();

        let guard = walk.borrow_mut();
        let result = machine.set_state(TestKind::Walk);
        drop(guard);

        assert!(matches!(result, Err(MachineError::StateBorrowed { .. })));
        assert_eq!(machine.current_kind(), Some(TestKind::Idle));
        assert!(log.borrow().is_empty());
        assert_eq!(machine.history().len(), 1);
    }

    #[test]
    fn history_respects_limit() {
        let fx = Fixture::new();
        let (_, toggle) = flag(true);
        let config = MachineConfig::default().history_limit(Some(3));
        let mut machine = StateMachine::with_config(config);
        machine.add_transition(&fx.idle, &fx.walk, toggle.clone());
        machine.add_transition(&fx.walk, &fx.idle, toggle);
        machine.set_state(TestKind::Idle).unwrap();

        for _ in 0..10 {
            machine.update_state().unwrap();
        }

        assert_eq!(machine.history().len(), 3);
        assert_eq!(machine.history().last().map(|t| t.tick), Some(10));
    }

    #[test]
    fn history_can_be_disabled() {
        let fx = Fixture::new();
        let mut machine = StateMachine::with_config(MachineConfig::default().without_history());
        machine.add_transition(&fx.idle, &fx.walk, Predicate::always());
        machine.set_state(TestKind::Idle).unwrap();
        machine.update_state().unwrap();

        assert!(machine.history().is_empty());
        assert_eq!(machine.current_kind(), Some(TestKind::Walk));
    }

    #[test]
    fn history_records_path_and_ticks() {
        let fx = Fixture::new();
        let mut machine = StateMachine::new();
        machine.add_transition(&fx.idle, &fx.walk, Predicate::always());
        machine.add_transition(&fx.walk, &fx.jump, Predicate::always());
        machine.set_state(TestKind::Idle).unwrap();
        machine.update_state().unwrap();
        machine.update_state().unwrap();

        let path = machine.history().get_path();
        assert_eq!(path, vec![&TestKind::Idle, &TestKind::Walk, &TestKind::Jump]);

        let ticks: Vec<u64> = machine.history().transitions().iter().map(|t| t.tick).collect();
        assert_eq!(ticks, vec![0, 1, 2]);
    }
}
