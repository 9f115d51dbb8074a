//! Single-actor building blocks: the [`Behavior`] trait, its context, its
//! lifecycle state machine, and the task loop that drives one of them.
//!
//! # Components
//!
//! - [`Behavior`] - what an actor does with its messages
//! - [`ActorContext`] - the metadata and shutdown signal visible while
//!   handling one
//! - [`ActorLifecycle`] / [`ActorState`] - Created → Started → Draining →
//!   Stopped (§4.10)
//! - [`ErrorAction`] - what the runtime does after `receive` fails
//! - [`ActorRuntime`] - owns the mailbox and the spawned task (§4.3)
//!
//! # Actor Model Basics
//!
//! Actors here:
//! - keep isolated state (no shared memory between behaviors)
//! - communicate only via `Tell`/`Ask` through a mailbox
//! - process one message at a time, in delivery order
//! - follow `pre_start → receive* → post_stop`
//!
//! Dispatching to more than one actor, or handing out capability-scoped
//! handles to them, is out of this module's scope — see
//! [`crate::refs`] and [`crate::system`].
//!
//! # Module Organization
//!
//! - `traits.rs` - `Behavior` trait and `ErrorAction` enum
//! - `context.rs` - `ActorContext`
//! - `lifecycle.rs` - `ActorLifecycle` and `ActorState`
//! - `runtime.rs` - `ActorRuntime`, the spawn/shutdown task loop

pub mod context;
pub mod lifecycle;
pub mod runtime;
pub mod traits;

pub use context::ActorContext;
pub use lifecycle::{ActorLifecycle, ActorState};
pub use runtime::{ActorRuntime, SpawnOptions};
pub use traits::{Behavior, ErrorAction};
