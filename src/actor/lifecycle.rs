//! Actor lifecycle state machine (§4.10).

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc}; // §3.2

// Layer 3: Internal module imports
// (none)

/// Where an actor sits in its run.
///
/// ```text
/// Created -> Started -> Draining -> Stopped
/// ```
///
/// There is no restart state: this crate has no supervisor tree, so a
/// failed `Behavior::receive` is handled entirely by `on_error` (stop or
/// resume), never by tearing the actor down and building a fresh one.
///
/// # Example
///
/// ```rust
/// use conclave_rt::actor::ActorState;
///
/// assert_eq!(ActorState::default(), ActorState::Created);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorState {
    /// Spawned, `pre_start` not yet run.
    Created,
    /// `pre_start` completed; the actor loop is draining its mailbox.
    Started,
    /// A stop has been requested; the actor finishes in-flight work and
    /// its mailbox is no longer accepting new envelopes.
    Draining,
    /// `post_stop` has run and the actor's task has exited.
    Stopped,
}

impl Default for ActorState {
    fn default() -> Self {
        Self::Created
    }
}

impl ActorState {
    /// Whether this state is the terminal one.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Stopped)
    }
}

/// Tracks an actor's current state and when it last changed.
///
/// # Example
///
/// ```rust
/// use conclave_rt::actor::{ActorLifecycle, ActorState};
///
/// let mut lifecycle = ActorLifecycle::new();
/// assert_eq!(lifecycle.state(), ActorState::Created);
///
/// lifecycle.transition_to(ActorState::Started);
/// assert_eq!(lifecycle.state(), ActorState::Started);
/// assert!(!lifecycle.is_terminal());
/// ```
#[derive(Debug, Clone)]
pub struct ActorLifecycle {
    state: ActorState,
    last_state_change: DateTime<Utc>,
}

impl ActorLifecycle {
    /// A fresh lifecycle in [`ActorState::Created`].
    pub fn new() -> Self {
        Self {
            state: ActorState::Created,
            last_state_change: Utc::now(), // §3.2
        }
    }

    /// Move to `new_state`, stamping the transition time.
    pub fn transition_to(&mut self, new_state: ActorState) {
        self.state = new_state;
        self.last_state_change = Utc::now();
    }

    /// The current state.
    pub fn state(&self) -> ActorState {
        self.state
    }

    /// When the state last changed.
    pub fn last_state_change(&self) -> DateTime<Utc> {
        self.last_state_change
    }

    /// Whether the actor has fully stopped.
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Whether the actor is accepting and processing messages.
    pub fn is_active(&self) -> bool {
        self.state == ActorState::Started
    }
}

impl Default for ActorLifecycle {
    fn default() -> Self {
        Self::new()
    }
}
