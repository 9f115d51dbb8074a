//! Per-actor context handed to every [`Behavior`](super::traits::Behavior)
//! call.

// Layer 1: Standard library imports
use std::marker::PhantomData;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc}; // §3.2

// Layer 3: Internal module imports
use crate::message::Message;
use crate::reply::CancellationToken;
use crate::util::{ActorAddress, ActorId};

/// Metadata and cooperative-shutdown signal visible to a running actor.
///
/// `ActorContext` does not give a behavior a way to send messages to other
/// actors — that capability lives on [`crate::refs::ActorRef`], handed out
/// separately by whatever spawned the actor. The context only exposes facts
/// about the actor itself: its address, when it started, and whether it has
/// been asked to shut down.
pub struct ActorContext<M: Message> {
    address: ActorAddress,
    id: ActorId,
    started_at: DateTime<Utc>,
    shutdown: CancellationToken,
    ask_cancellation: CancellationToken,
    _marker: PhantomData<M>,
}

impl<M: Message> ActorContext<M> {
    /// Construct a context for a freshly spawned actor.
    pub fn new(address: ActorAddress, shutdown: CancellationToken) -> Self {
        Self {
            id: *address.id(),
            address,
            started_at: Utc::now(), // §3.2
            shutdown,
            ask_cancellation: CancellationToken::new(),
            _marker: PhantomData,
        }
    }

    /// The actor's address (name, if any, plus its [`ActorId`]).
    pub fn address(&self) -> &ActorAddress {
        &self.address
    }

    /// The actor's unique id.
    pub fn id(&self) -> &ActorId {
        &self.id
    }

    /// When this run of the actor started.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Signal observed by the runtime when the system (or a direct `Stop`)
    /// asks this actor to wind down. A behavior with a long-running
    /// `receive` can race it with `tokio::select!` to return early.
    pub fn shutdown_signal(&self) -> &CancellationToken {
        &self.shutdown
    }

    /// Whether shutdown has already been requested.
    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Swap in the cancellation token for the Ask currently being handled.
    /// Called by the runtime loop just before each `Behavior::receive`, so
    /// a behavior's ctx always reflects the envelope it was handed (§4.3
    /// ctx propagates "the Ask-side cancellation").
    pub(crate) fn set_ask_cancellation(&mut self, token: CancellationToken) {
        self.ask_cancellation = token;
    }

    /// Whether the actor is shutting down, or the Ask currently being
    /// handled has been cancelled by its caller.
    pub fn is_cancelled(&self) -> bool {
        self.shutdown.is_cancelled() || self.ask_cancellation.is_cancelled()
    }

    /// Resolves as soon as either the actor-wide shutdown signal or the
    /// current message's Ask-side cancellation fires, whichever is first.
    /// A behavior with a long-running `receive` races this with
    /// `tokio::select!` to short-circuit (§4.11, §5).
    pub async fn cancelled(&self) {
        tokio::select! {
            () = self.shutdown.cancelled() => {}
            () = self.ask_cancellation.cancelled() => {}
        }
    }
}
