// Layer 1: Standard library imports
use std::sync::Arc;
use std::time::Duration;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::mpsc;

// Layer 3: Internal module imports
use super::metrics::{AtomicMetrics, MetricsRecorder};
use super::traits::{
    DeadLetter, DeadLetterSink, DropReason, MailboxReceiver, MailboxSender, NoopDeadLetterSink,
    TryRecvError,
};
use crate::error::Error;
use crate::message::{Envelope, Message};

/// Bounded mailbox backed by a `tokio::sync::mpsc` channel (§4.2).
///
/// Every mailbox in this crate is bounded — there is no unbounded variant,
/// since an unbounded queue would let a stalled actor grow memory without
/// limit, exactly what the enqueue budget below exists to prevent.
///
/// # Type Parameters
///
/// * `M` - the message type implementing [`Message`]
/// * `R` - the response type for the mailbox's messages, observed only as
///   a type parameter on `Envelope<M, R>`
///
/// # Example
///
/// ```
/// use conclave_rt::mailbox::BoundedMailbox;
/// use conclave_rt::message::Message;
///
/// #[derive(Debug, Clone)]
/// struct Ping;
/// impl Message for Ping {
///     const MESSAGE_TYPE: &'static str = "ping";
/// }
///
/// let (mailbox, _sender) = BoundedMailbox::<Ping, ()>::new("pinger", 100);
/// assert_eq!(mailbox.capacity(), 100);
/// ```
pub struct BoundedMailbox<M: Message, R> {
    receiver: mpsc::Receiver<Envelope<M, R>>,
    capacity: usize,
    pub metrics: Arc<AtomicMetrics>,
    actor_name: Arc<str>,
    dead_letters: Arc<dyn DeadLetterSink>,
}

/// Cloneable sender half of a [`BoundedMailbox`].
///
/// `send` enforces the enqueue-budget policy (§4.2): wait up to
/// `enqueue_budget` for space, and if the mailbox is still full when the
/// budget elapses, route the envelope to the configured
/// [`DeadLetterSink`] and fail the caller with
/// [`Error::MailboxFull`](crate::error::Error::MailboxFull) rather than
/// wait indefinitely.
#[derive(Clone)]
pub struct BoundedMailboxSender<M: Message, R> {
    sender: mpsc::Sender<Envelope<M, R>>,
    capacity: usize,
    enqueue_budget: Duration,
    actor_name: Arc<str>,
    dead_letters: Arc<dyn DeadLetterSink>,
    pub metrics: Arc<AtomicMetrics>,
}

impl<M: Message, R> BoundedMailbox<M, R> {
    /// Create a bounded mailbox with the default enqueue budget (50ms) and
    /// no dead-letter reporting.
    pub fn new(actor_name: impl Into<Arc<str>>, capacity: usize) -> (Self, BoundedMailboxSender<M, R>) {
        Self::with_budget(actor_name, capacity, Duration::from_millis(50))
    }

    /// Create a bounded mailbox with an explicit enqueue budget.
    pub fn with_budget(
        actor_name: impl Into<Arc<str>>,
        capacity: usize,
        enqueue_budget: Duration,
    ) -> (Self, BoundedMailboxSender<M, R>) {
        Self::with_dead_letters(
            actor_name,
            capacity,
            enqueue_budget,
            Arc::new(NoopDeadLetterSink),
        )
    }

    /// Create a bounded mailbox that reports drops to `dead_letters`, the
    /// constructor a [`crate::system::ActorSystem`] uses to wire every
    /// actor's mailbox to its shared dead-letter office.
    pub fn with_dead_letters(
        actor_name: impl Into<Arc<str>>,
        capacity: usize,
        enqueue_budget: Duration,
        dead_letters: Arc<dyn DeadLetterSink>,
    ) -> (Self, BoundedMailboxSender<M, R>) {
        let (sender, receiver) = mpsc::channel(capacity);
        let metrics = Arc::new(AtomicMetrics::new());
        let actor_name = actor_name.into();

        let mailbox = Self {
            receiver,
            capacity,
            metrics: Arc::clone(&metrics),
            actor_name: Arc::clone(&actor_name),
            dead_letters: Arc::clone(&dead_letters),
        };
        let sender = BoundedMailboxSender {
            sender,
            capacity,
            enqueue_budget,
            actor_name,
            dead_letters,
            metrics,
        };
        (mailbox, sender)
    }

    /// Stop accepting new sends and drain whatever is already queued,
    /// within `deadline` (§4.3 "Stop closes the mailbox and waits for
    /// drain").
    ///
    /// Every envelope drained this way completes its reply, if any, with
    /// `Error::actor_stopped` rather than being dropped silently (§4.11
    /// property 4), and is reported to the dead-letter sink as
    /// [`DropReason::ActorStopped`] — a Tell has no reply to complete, but
    /// it still reaches the DLO instead of vanishing. Envelopes still
    /// unclaimed once `deadline` elapses are abandoned along with the
    /// mailbox.
    pub async fn close_and_drain(&mut self, deadline: Duration) {
        self.receiver.close();
        let deadline = tokio::time::Instant::now() + deadline;

        loop {
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if remaining.is_zero() {
                return;
            }
            let mut envelope = match tokio::time::timeout(remaining, self.receiver.recv()).await {
                Ok(Some(envelope)) => envelope,
                _ => return,
            };
            self.metrics.record_received();
            let message_type = envelope.message_type();
            envelope.complete(Err(Error::actor_stopped(&*self.actor_name)));
            self.dead_letters.offer(DeadLetter {
                actor: self.actor_name.to_string(),
                message_type,
                reason: DropReason::ActorStopped,
                at: Utc::now(),
            });
        }
    }
}

#[async_trait]
impl<M: Message, R: Send + 'static> MailboxReceiver<M, R> for BoundedMailbox<M, R> {
    async fn recv(&mut self) -> Option<Envelope<M, R>> {
        let envelope = self.receiver.recv().await?;
        self.metrics.record_received();
        self.metrics.update_last_message(Utc::now());
        Some(envelope)
    }

    fn try_recv(&mut self) -> Result<Envelope<M, R>, TryRecvError> {
        match self.receiver.try_recv() {
            Ok(envelope) => {
                self.metrics.record_received();
                self.metrics.update_last_message(Utc::now());
                Ok(envelope)
            }
            Err(mpsc::error::TryRecvError::Empty) => Err(TryRecvError::Empty),
            Err(mpsc::error::TryRecvError::Disconnected) => Err(TryRecvError::Closed),
        }
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn len(&self) -> usize {
        self.metrics.in_flight() as usize
    }
}

impl<M: Message, R> BoundedMailboxSender<M, R> {
    fn report_drop(&self, message_type: &'static str, reason: DropReason) {
        self.dead_letters.offer(DeadLetter {
            actor: self.actor_name.to_string(),
            message_type,
            reason,
            at: Utc::now(),
        });
    }
}

#[async_trait]
impl<M: Message, R: Send + 'static> MailboxSender<M, R> for BoundedMailboxSender<M, R> {
    async fn send(&self, mut envelope: Envelope<M, R>) -> Result<(), Error> {
        match tokio::time::timeout(self.enqueue_budget, self.sender.reserve()).await {
            Ok(Ok(permit)) => {
                permit.send(envelope);
                self.metrics.record_sent();
                Ok(())
            }
            Ok(Err(_)) => {
                let err = Error::actor_stopped(&*self.actor_name);
                envelope.complete(Err(err.clone()));
                Err(err)
            }
            Err(_) => {
                self.metrics.record_dropped();
                let message_type = envelope.message_type();
                let err = Error::mailbox_full(&*self.actor_name);
                envelope.complete(Err(err.clone()));
                self.report_drop(message_type, DropReason::EnqueueTimeout);
                Err(err)
            }
        }
    }

    fn try_send(&self, envelope: Envelope<M, R>) -> Result<(), Error> {
        match self.sender.try_send(envelope) {
            Ok(()) => {
                self.metrics.record_sent();
                Ok(())
            }
            Err(mpsc::error::TrySendError::Full(mut envelope)) => {
                self.metrics.record_dropped();
                let message_type = envelope.message_type();
                let err = Error::mailbox_full(&*self.actor_name);
                envelope.complete(Err(err.clone()));
                self.report_drop(message_type, DropReason::EnqueueTimeout);
                Err(err)
            }
            Err(mpsc::error::TrySendError::Closed(mut envelope)) => {
                let err = Error::actor_stopped(&*self.actor_name);
                envelope.complete(Err(err.clone()));
                Err(err)
            }
        }
    }
}

impl<M: Message, R> BoundedMailboxSender<M, R> {
    /// Best-effort, non-blocking enqueue attempt: succeeds synchronously
    /// when the mailbox has a free slot right now, without consuming
    /// `envelope` on failure so the caller can fall back to the
    /// blocking-budget path.
    ///
    /// [`crate::refs::ActorRef::ask`] uses this to keep Ask synchronous
    /// while still enqueueing in the caller's own call order whenever the
    /// mailbox isn't full (§3 FIFO-within-sender) — a plain `try_send`
    /// won't do, since on failure it completes the envelope's reply with
    /// `MailboxFull` immediately rather than leaving room for the budgeted
    /// wait §4.2 promises.
    pub fn try_reserve_send(&self, envelope: Envelope<M, R>) -> Result<(), Envelope<M, R>> {
        match self.sender.try_reserve() {
            Ok(permit) => {
                permit.send(envelope);
                self.metrics.record_sent();
                Ok(())
            }
            Err(_) => Err(envelope),
        }
    }

    /// The mailbox's fixed capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the mailbox's receiver half has been dropped.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
