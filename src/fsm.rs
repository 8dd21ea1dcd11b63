//! Generic finite-state-machine driver for physics-driven actors.
//!
//! The machine itself only tracks *where* an actor is: the current state, the
//! previous state, and how long it has been there. **What** happens lives on
//! the actor, split into three hooks the driver calls in a fixed order:
//!
//! 1. [`Actor::decide`]: pure, picks the next state from a snapshot.
//! 2. [`Actor::on_enter`]: one-shot side effects, once per actual change.
//! 3. [`Actor::tick`]: continuous per-step effects for the settled state.
//!
//! # Usage
//! ```ignore
//! let mut player = Player::new(&config.player, &config.physics, level, spawn);
//! fsm::activate(&mut player)?;
//! // Each simulation step:
//! player.advance_timers(dt);
//! fsm::step(&mut player, dt)?;
//! ```

use std::fmt;

use strum::{EnumCount, IntoEnumIterator};

use crate::error::FsmError;

// ---------------------------------------------------------------------------
// State sets
// ---------------------------------------------------------------------------

/// A closed, ordered set of state tags.
///
/// Implemented automatically for any enum deriving `Clone, Copy, PartialEq,
/// Eq, PartialOrd, Ord, Debug` plus strum's `EnumIter`, `EnumCount` and
/// `IntoStaticStr`. Declaration order is the canonical order; the first
/// variant is the initial state.
pub trait StateSet:
    Copy + Eq + Ord + fmt::Debug + IntoEnumIterator + EnumCount + Into<&'static str> + 'static
{
    /// The first declared state, or `None` for an uninhabited enum.
    fn initial() -> Option<Self> {
        Self::iter().next()
    }

    /// Variant name, for logs.
    fn name(self) -> &'static str {
        self.into()
    }
}

impl<T> StateSet for T where
    T: Copy + Eq + Ord + fmt::Debug + IntoEnumIterator + EnumCount + Into<&'static str> + 'static
{
}

/// Result of one decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition<S> {
    /// Nothing else to check: stay where we are.
    Keep,
    /// Move to `S`. Proposing the current state again is also terminal and
    /// does not re-run `on_enter`.
    To(S),
}

// ---------------------------------------------------------------------------
// Actor contract
// ---------------------------------------------------------------------------

/// The three-hook contract every driven actor implements.
pub trait Actor {
    type State: StateSet;
    /// Read-only view of everything `decide` may look at.
    type Snapshot;

    fn machine(&self) -> &StateMachine<Self::State>;
    fn machine_mut(&mut self) -> &mut StateMachine<Self::State>;

    /// Capture the world as this actor sees it right now. Rebuilt before every
    /// decision so chained decisions observe the previous `on_enter`.
    fn snapshot(&self) -> Self::Snapshot;

    /// Transition graph. Must not mutate anything.
    fn decide(state: Self::State, snapshot: &Self::Snapshot) -> Transition<Self::State>;

    /// Entry side effects for `to`. Called exactly once per actual change,
    /// while `machine().state()` still reports `from`.
    fn on_enter(&mut self, from: Self::State, to: Self::State);

    /// Continuous effects for the settled state. Called once per step.
    fn tick(&mut self, state: Self::State, dt: f32);
}

// ---------------------------------------------------------------------------
// Machine
// ---------------------------------------------------------------------------

/// Per-actor state record. Only the driver functions in this module mutate it.
#[derive(Debug, Clone)]
pub struct StateMachine<S> {
    state: Option<S>,
    previous: Option<S>,
    /// Seconds spent in the current state. Reset to 0.0 on each transition.
    elapsed: f32,
    entered_this_step: bool,
}

impl<S: StateSet> StateMachine<S> {
    /// An inactive machine. It has no state until [`activate`] runs.
    pub fn new() -> Self {
        Self {
            state: None,
            previous: None,
            elapsed: 0.0,
            entered_this_step: false,
        }
    }

    pub fn state(&self) -> Option<S> {
        self.state
    }

    pub fn previous(&self) -> Option<S> {
        self.previous
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    /// `true` from the moment a transition fires until the end of the tick
    /// that follows it.
    pub fn just_entered(&self) -> bool {
        self.entered_this_step
    }

    fn go(&mut self, next: S) {
        self.previous = self.state.replace(next);
        self.elapsed = 0.0;
        self.entered_this_step = true;
    }

    fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
        self.entered_this_step = false;
    }
}

impl<S: StateSet> Default for StateMachine<S> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// What a single [`step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport<S> {
    /// The state `tick` ran for.
    pub state: S,
    /// Number of `on_enter` calls made this step.
    pub transitions: usize,
}

/// Second phase of construction: assign the initial state.
///
/// Call once the actor and every collaborator it reads are in place. Does not
/// invoke `on_enter`, since there is no state to come from.
pub fn activate<A: Actor>(actor: &mut A) -> Result<A::State, FsmError> {
    if actor.machine().is_active() {
        return Err(FsmError::AlreadyActive {
            actor: std::any::type_name::<A>(),
        });
    }
    let initial = A::State::initial().ok_or(FsmError::EmptyStateSet {
        actor: std::any::type_name::<A>(),
    })?;

    let machine = actor.machine_mut();
    machine.state = Some(initial);
    machine.previous = None;
    machine.elapsed = 0.0;
    machine.entered_this_step = false;

    tracing::debug!(
        actor = std::any::type_name::<A>(),
        state = initial.name(),
        "state machine activated"
    );
    Ok(initial)
}

/// Run one fixed simulation step.
///
/// Resolves the transition chain until `decide` settles, then ticks the final
/// state once and advances its elapsed time by `dt`. A chain longer than the
/// number of declared states is a defect in the transition graph and fails
/// with [`FsmError::Unstable`].
pub fn step<A: Actor>(actor: &mut A, dt: f32) -> Result<StepReport<A::State>, FsmError> {
    let mut current = actor.machine().state().ok_or(FsmError::Inactive {
        actor: std::any::type_name::<A>(),
    })?;
    let limit = A::State::COUNT;
    let mut transitions = 0;

    loop {
        let snapshot = actor.snapshot();
        let next = match A::decide(current, &snapshot) {
            Transition::Keep => break,
            Transition::To(next) if next == current => break,
            Transition::To(next) => next,
        };

        if transitions == limit {
            return Err(FsmError::Unstable {
                actor: std::any::type_name::<A>(),
                from: current.name(),
                to: next.name(),
                limit,
            });
        }

        tracing::debug!(
            actor = std::any::type_name::<A>(),
            from = current.name(),
            to = next.name(),
            "state transition"
        );
        actor.on_enter(current, next);
        actor.machine_mut().go(next);
        current = next;
        transitions += 1;
    }

    actor.tick(current, dt);
    actor.machine_mut().advance(dt);

    Ok(StepReport {
        state: current,
        transitions,
    })
}
