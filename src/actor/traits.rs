//! The `Behavior` trait: the one deliberate generalization this crate makes
//! over a Tell-only actor trait.
//!
//! An `Actor::handle_message` that always returns `Result<(), Error>` can
//! never give an `Ask` caller a typed reply — the caller would have to
//! smuggle a reply channel through the message itself. `Behavior::receive`
//! returns `Result<Self::Response, Error>` instead, so `ActorRef::ask`
//! (§4.1) can hand back a [`crate::reply::ReplyFuture<R>`] without the
//! message type needing to know anything about reply plumbing. Everything
//! else below — the associated `Message` type, the `pre_start`/`post_stop`/
//! `on_error` lifecycle hooks, `ErrorAction` — mirrors how actors are
//! defined elsewhere in this crate's lineage.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use async_trait::async_trait;

// Layer 3: Internal module imports
use super::context::ActorContext;
use crate::error::Error;
use crate::message::Message;

/// What an actor does with its messages.
///
/// # Associated Types
///
/// - `Message`: the sum type this actor accepts
/// - `Response`: what `receive` returns on success; `Tell`-only actors use
///   `()` and their callers never observe it
///
/// # Example
///
/// ```rust
/// use conclave_rt::actor::{ActorContext, Behavior, ErrorAction};
/// use conclave_rt::error::Error;
/// use conclave_rt::message::Message;
/// use async_trait::async_trait;
///
/// #[derive(Debug, Clone)]
/// enum CounterMsg {
///     Increment,
///     Get,
/// }
///
/// impl Message for CounterMsg {
///     const MESSAGE_TYPE: &'static str = "counter";
/// }
///
/// struct Counter {
///     value: i64,
/// }
///
/// #[async_trait]
/// impl Behavior for Counter {
///     type Message = CounterMsg;
///     type Response = i64;
///
///     async fn receive(
///         &mut self,
///         message: Self::Message,
///         _ctx: &mut ActorContext<Self::Message>,
///     ) -> Result<Self::Response, Error> {
///         match message {
///             CounterMsg::Increment => self.value += 1,
///             CounterMsg::Get => {}
///         }
///         Ok(self.value)
///     }
/// }
/// ```
#[async_trait]
pub trait Behavior: Send + Sync + 'static {
    /// The message sum type this actor accepts.
    type Message: Message;

    /// The type returned to an `Ask` caller.
    type Response: Send + 'static;

    /// Process one message. Called at most once at a time, in the order
    /// the mailbox delivered them (§4, per-actor sequentiality).
    async fn receive(
        &mut self,
        message: Self::Message,
        ctx: &mut ActorContext<Self::Message>,
    ) -> Result<Self::Response, Error>;

    /// Run once before the actor's first `receive`. Failure here prevents
    /// the actor from starting.
    async fn pre_start(&mut self, _ctx: &mut ActorContext<Self::Message>) -> Result<(), Error> {
        Ok(())
    }

    /// Run once the actor has stopped accepting new messages, after its
    /// mailbox has been drained (or a `Stop` was requested).
    async fn post_stop(&mut self, _ctx: &mut ActorContext<Self::Message>) -> Result<(), Error> {
        Ok(())
    }

    /// Called when `receive` returns `Err`, to decide what happens next.
    /// Default is to stop — recovering from an error is something a
    /// behavior opts into, not something assumed safe.
    async fn on_error(&mut self, _error: &Error, _ctx: &mut ActorContext<Self::Message>) -> ErrorAction {
        ErrorAction::Stop
    }
}

/// What the actor runtime does after `Behavior::on_error` runs.
///
/// This crate has no supervisor tree, so `Restart` and `Escalate` are
/// handled entirely by the actor's own runtime loop rather than by a
/// parent: `Restart` re-runs `pre_start` on the same behavior instance and
/// keeps the actor's mailbox alive; `Escalate` stops the actor exactly like
/// `Stop` but is reported to the system's monitor under a distinct event so
/// an operator (not a parent actor) can see that nothing downstream
/// absorbed the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorAction {
    /// Stop the actor. `post_stop` still runs.
    Stop,
    /// Ignore the error and keep processing the next message.
    Resume,
    /// Re-run `pre_start` and keep the actor alive.
    Restart,
    /// Stop the actor, flagged as an unhandled failure.
    Escalate,
}

impl Default for ErrorAction {
    fn default() -> Self {
        Self::Stop
    }
}
