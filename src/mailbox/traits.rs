//! Core mailbox traits and the dead-letter sink seam.
//!
//! - [`MailboxReceiver`] / [`MailboxSender`]: the actor-owned and
//!   cloneable-handle halves of a mailbox, generic over message and
//!   response type for zero-cost dispatch (§6.2).
//! - [`DeadLetterSink`]: where a sender reports an envelope it could not
//!   deliver within its enqueue budget. The sink only ever receives a
//!   [`DeadLetter`] record, never the original payload — a dropped Ask's
//!   reply is completed with an error directly by the sender, so the DLO
//!   itself stays generic over every message type in the system.

// Layer 1: Standard library imports
use std::error::Error as StdError;
use std::fmt;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use chrono::{DateTime, Utc}; // §3.2

// Layer 3: Internal module imports
use crate::error::Error;
use crate::message::{Envelope, Message};

/// Mailbox receiver trait, generic over message and response type.
///
/// Owned exclusively by the actor whose loop drains it; unlike
/// [`MailboxSender`], this half is never cloned.
#[async_trait]
pub trait MailboxReceiver<M: Message, R>: Send + Sync {
    /// Receive the next envelope, or `None` once the mailbox is closed and
    /// drained.
    async fn recv(&mut self) -> Option<Envelope<M, R>>;

    /// Receive without waiting.
    fn try_recv(&mut self) -> Result<Envelope<M, R>, TryRecvError>;

    /// The mailbox's fixed capacity.
    fn capacity(&self) -> usize;

    /// Approximate occupancy, derived from sent/received counters.
    fn len(&self) -> usize;

    /// Whether the mailbox currently holds no envelopes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cloneable sender half of a mailbox.
#[async_trait]
pub trait MailboxSender<M: Message, R>: Send + Sync + Clone {
    /// Enqueue an envelope, waiting up to the sender's configured budget
    /// for space. On timeout, the envelope is routed to the dead-letter
    /// sink and this returns `Err(Error::MailboxFull)`.
    async fn send(&self, envelope: Envelope<M, R>) -> Result<(), Error>;

    /// Enqueue without waiting for space.
    fn try_send(&self, envelope: Envelope<M, R>) -> Result<(), Error>;
}

/// Non-blocking receive failure.
#[derive(Debug, thiserror::Error)]
pub enum TryRecvError {
    /// No envelope currently queued.
    #[error("mailbox is empty")]
    Empty,
    /// Sender half dropped and the queue is drained.
    #[error("mailbox is closed")]
    Closed,
}

/// Why a sender gave up on an envelope before it reached the mailbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// `send`'s enqueue budget elapsed while the mailbox stayed full.
    EnqueueTimeout,
    /// The receiver half was already dropped.
    ActorStopped,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::EnqueueTimeout => "enqueue_timeout",
            Self::ActorStopped => "actor_stopped",
        };
        f.write_str(s)
    }
}

/// A record of one envelope that never reached its actor.
///
/// Carries only the message's type tag, never the payload: the dead-letter
/// office is shared by every mailbox in a system and therefore cannot be
/// generic over any one message type.
#[derive(Debug, Clone)]
pub struct DeadLetter {
    /// Name of the actor whose mailbox rejected the envelope.
    pub actor: String,
    /// `M::MESSAGE_TYPE` of the dropped envelope.
    pub message_type: &'static str,
    /// Why it was dropped.
    pub reason: DropReason,
    /// When the drop was observed (§3.2).
    pub at: DateTime<Utc>,
}

/// Sink a [`BoundedMailboxSender`](super::bounded::BoundedMailboxSender)
/// reports drops to.
///
/// Implemented by the system's dead-letter office so that every mailbox in
/// an [`crate::system::ActorSystem`] shares one destination without the
/// mailbox module depending on the system module.
pub trait DeadLetterSink: Send + Sync {
    /// Record a dropped envelope. Must not block; implementations that
    /// forward to their own mailbox should use a non-blocking send and
    /// silently discard on failure rather than risk a drop cascade.
    fn offer(&self, letter: DeadLetter);
}

/// A sink that discards every letter, for mailboxes that opt out of DLO
/// reporting (tests, benchmarks).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDeadLetterSink;

impl DeadLetterSink for NoopDeadLetterSink {
    fn offer(&self, _letter: DeadLetter) {}
}

#[allow(dead_code)]
fn assert_std_error<E: StdError>() {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_recv_error_messages() {
        assert_eq!(TryRecvError::Empty.to_string(), "mailbox is empty");
        assert_eq!(TryRecvError::Closed.to_string(), "mailbox is closed");
    }

    #[test]
    fn drop_reason_display_is_snake_case() {
        assert_eq!(DropReason::EnqueueTimeout.to_string(), "enqueue_timeout");
        assert_eq!(DropReason::ActorStopped.to_string(), "actor_stopped");
    }

    #[test]
    fn noop_sink_accepts_without_panicking() {
        let sink = NoopDeadLetterSink;
        sink.offer(DeadLetter {
            actor: "worker-1".to_string(),
            message_type: "ping",
            reason: DropReason::EnqueueTimeout,
            at: Utc::now(),
        });
    }
}
