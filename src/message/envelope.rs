// Layer 1: Standard library imports
use std::fmt;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc}; // §3.2
use tokio::sync::oneshot;
use uuid::Uuid;

// Layer 3: Internal module imports
use super::traits::{Message, MessagePriority};
use crate::error::Error;
use crate::reply::CancellationToken;

/// Internal record carrying a message plus its reply sink and cancellation
/// token (§3 `Envelope<M,R>`, GLOSSARY).
///
/// `R` is the response type for Ask; Tell envelopes carry `reply: None`
/// and their `R` is never observed. Unlike `airssys-rt`'s
/// `MessageEnvelope<M>`, which only ever notifies a `reply_to` address,
/// this envelope owns the one-shot reply sink directly — that's what lets
/// `ActorRef::ask` hand the caller a [`crate::reply::ReplyFuture`] without
/// a second round trip through the registry.
pub struct Envelope<M: Message, R> {
    /// The actual message payload.
    pub payload: M,
    /// Reply sink for Ask; `None` for Tell.
    pub reply: Option<oneshot::Sender<Result<R, Error>>>,
    /// Cancellation token propagated from the caller's Ask, if any.
    pub cancellation: CancellationToken,
    /// Enqueue timestamp (§3.2 `chrono::DateTime<Utc>`).
    pub enqueued_at: DateTime<Utc>,
    /// Correlation id, useful for tracing a single Ask through logs.
    pub correlation_id: Uuid,
    /// Message priority, surfaced for monitoring only (§4.2 mailboxes are
    /// plain FIFO).
    pub priority: MessagePriority,
}

impl<M: Message, R> Envelope<M, R> {
    /// Build a Tell envelope: no reply sink, a fresh (non-cancellable in
    /// practice, since nobody holds the other end) cancellation token.
    pub fn tell(payload: M) -> Self {
        let priority = payload.priority();
        Self {
            payload,
            reply: None,
            cancellation: CancellationToken::new(),
            enqueued_at: Utc::now(),
            correlation_id: Uuid::new_v4(),
            priority,
        }
    }

    /// Build an Ask envelope, returning the envelope and the receiver half
    /// the caller awaits — ownership of the sender moves into the
    /// envelope so exactly one side can ever complete the reply.
    pub fn ask(
        payload: M,
        cancellation: CancellationToken,
    ) -> (Self, oneshot::Receiver<Result<R, Error>>) {
        let priority = payload.priority();
        let (tx, rx) = oneshot::channel();
        (
            Self {
                payload,
                reply: Some(tx),
                cancellation,
                enqueued_at: Utc::now(),
                correlation_id: Uuid::new_v4(),
                priority,
            },
            rx,
        )
    }

    /// Whether this envelope expects a reply.
    pub fn is_ask(&self) -> bool {
        self.reply.is_some()
    }

    /// Complete the reply sink exactly once. A second call (or a call on a
    /// Tell envelope) is a silent no-op, matching the "exactly once"
    /// invariant (§3, §8 property 1) without panicking on misuse.
    pub fn complete(&mut self, result: Result<R, Error>) {
        if let Some(tx) = self.reply.take() {
            let _ = tx.send(result);
        }
    }

    /// Message type tag from the payload's const.
    pub fn message_type(&self) -> &'static str {
        M::MESSAGE_TYPE
    }
}

impl<M: Message + fmt::Debug, R> fmt::Debug for Envelope<M, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Envelope")
            .field("payload", &self.payload)
            .field("is_ask", &self.is_ask())
            .field("enqueued_at", &self.enqueued_at)
            .field("correlation_id", &self.correlation_id)
            .field("priority", &self.priority)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Ping;

    impl Message for Ping {
        const MESSAGE_TYPE: &'static str = "ping";
    }

    #[test]
    fn tell_envelope_has_no_reply_sink() {
        let env = Envelope::<Ping, ()>::tell(Ping);
        assert!(!env.is_ask());
    }

    #[tokio::test]
    async fn ask_envelope_completes_exactly_once() {
        let (mut env, rx) = Envelope::<Ping, u32>::ask(Ping, CancellationToken::new());
        assert!(env.is_ask());
        env.complete(Ok(7));
        env.complete(Ok(99)); // second call is a no-op, not a panic
        assert_eq!(rx.await.unwrap().unwrap(), 7);
    }

    #[test]
    fn message_type_reflects_payload_const() {
        let env = Envelope::<Ping, ()>::tell(Ping);
        assert_eq!(env.message_type(), "ping");
    }
}
