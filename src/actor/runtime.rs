//! The task loop that drives one [`Behavior`] instance (§4.3).
//!
//! `ActorRuntime` owns the `tokio::task::JoinHandle` running an actor's
//! mailbox-drain loop, plus the pieces needed to stop it: the mailbox's
//! sender half and a [`CancellationToken`] signalling shutdown. Everything
//! about *how* one actor runs lives here; routing many actors and handing
//! out typed handles to them is the system registry's job, not this one's.

// Layer 1: Standard library imports
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context as TaskContext, Poll};
use std::time::{Duration, Instant};

// Layer 2: Third-party crate imports
use chrono::Utc; // §3.2
use tokio::task::JoinHandle;

// Layer 3: Internal module imports
use super::context::ActorContext;
use super::lifecycle::{ActorLifecycle, ActorState};
use super::traits::{Behavior, ErrorAction};
use crate::mailbox::{
    BoundedMailbox, BoundedMailboxSender, DeadLetterSink, MailboxReceiver, MailboxSender,
    NoopDeadLetterSink,
};
use crate::monitoring::sink::ActorMonitorSink;
use crate::monitoring::{ActorEvent, ActorEventKind};
use crate::reply::CancellationToken;
use crate::util::ActorAddress;

/// A running actor: its mailbox sender, its shutdown signal, and the task
/// driving its message loop.
///
/// Dropping an `ActorRuntime` does not stop the actor — the loop keeps
/// running detached until [`Self::shutdown`] is called or the process
/// exits. This mirrors `tokio::task::JoinHandle`'s own drop semantics and
/// keeps an `ActorRef` (which only ever sees the sender half) independent
/// of whoever originally spawned the actor.
pub struct ActorRuntime<B: Behavior> {
    sender: BoundedMailboxSender<B::Message, B::Response>,
    shutdown: CancellationToken,
    handle: JoinHandle<()>,
    address: ActorAddress,
}

/// Tunables for spawning one actor, mirroring the relevant fields of
/// [`crate::system::SystemConfig`] without requiring a caller to build a
/// full `ActorSystem` just to run one actor in a test.
#[derive(Debug, Clone)]
pub struct SpawnOptions {
    /// Fixed mailbox capacity.
    pub mailbox_capacity: usize,
    /// How long `send` waits for space before dropping to the DLO.
    pub enqueue_budget: Duration,
    /// How long a stopping actor keeps draining its mailbox before
    /// abandoning whatever is left (§4.3 "waits for drain" up to a
    /// deadline).
    pub shutdown_drain_timeout: Duration,
}

impl Default for SpawnOptions {
    fn default() -> Self {
        Self {
            mailbox_capacity: 100,
            enqueue_budget: Duration::from_millis(50),
            shutdown_drain_timeout: Duration::from_secs(5),
        }
    }
}

impl<B: Behavior> ActorRuntime<B> {
    /// Spawn `behavior` under `address`, wiring its mailbox to `dead_letters`
    /// and its lifecycle events to `monitor`.
    ///
    /// Returns immediately; `pre_start` runs inside the spawned task, so a
    /// failure there surfaces as the actor stopping (and an `ErrorOccurred`
    /// / `Stopped` pair of events), not as an `Err` from this call.
    pub fn spawn(
        address: ActorAddress,
        behavior: B,
        options: SpawnOptions,
        dead_letters: Arc<dyn DeadLetterSink>,
        monitor: Arc<dyn ActorMonitorSink>,
    ) -> Self {
        let shutdown_drain_timeout = options.shutdown_drain_timeout;
        let (mailbox, sender) = BoundedMailbox::with_dead_letters(
            address.to_string(),
            options.mailbox_capacity,
            options.enqueue_budget,
            dead_letters,
        );
        let shutdown = CancellationToken::new();
        let ctx = ActorContext::<B::Message>::new(address.clone(), shutdown.clone());

        let handle = tokio::spawn(run_loop(
            behavior,
            mailbox,
            ctx,
            monitor,
            shutdown_drain_timeout,
        ));

        Self {
            sender,
            shutdown,
            handle,
            address,
        }
    }

    /// Spawn with the default [`SpawnOptions`] and no dead-letter reporting
    /// or monitoring — convenient for unit tests.
    pub fn spawn_default(address: ActorAddress, behavior: B) -> Self {
        Self::spawn(
            address,
            behavior,
            SpawnOptions::default(),
            Arc::new(NoopDeadLetterSink),
            Arc::new(crate::monitoring::NoopMonitor::<ActorEvent>::new()),
        )
    }

    /// The actor's mailbox sender, the handle every [`crate::refs::ActorRef`]
    /// ultimately wraps.
    pub fn sender(&self) -> BoundedMailboxSender<B::Message, B::Response> {
        self.sender.clone()
    }

    /// The actor's address.
    pub fn address(&self) -> &ActorAddress {
        &self.address
    }

    /// Request a cooperative shutdown and wait up to `timeout` for the
    /// task to exit. Returns `false` if the deadline passed first; the
    /// task keeps running in the background regardless.
    pub async fn shutdown(self, timeout: Duration) -> bool {
        self.shutdown.cancel();
        tokio::time::timeout(timeout, self.handle).await.is_ok()
    }

    /// Signal shutdown without waiting for the task to exit.
    pub fn stop(&self) {
        self.shutdown.cancel();
    }

    /// Split into the shutdown token and join handle, discarding the
    /// mailbox sender. Used by callers (such as
    /// [`crate::system::ActorSystem`]) that already cloned the sender into
    /// an [`crate::refs::ActorRef`] before tracking the runtime for
    /// shutdown and no longer need this copy.
    pub fn into_parts(self) -> (CancellationToken, JoinHandle<()>) {
        (self.shutdown, self.handle)
    }
}

async fn run_loop<B: Behavior>(
    mut behavior: B,
    mut mailbox: BoundedMailbox<B::Message, B::Response>,
    mut ctx: ActorContext<B::Message>,
    monitor: Arc<dyn ActorMonitorSink>,
    shutdown_drain_timeout: Duration,
) {
    let mut lifecycle = ActorLifecycle::new();
    emit(&monitor, *ctx.id(), ActorEventKind::Spawned).await;

    if let Err(error) = behavior.pre_start(&mut ctx).await {
        emit(
            &monitor,
            *ctx.id(),
            ActorEventKind::ErrorOccurred {
                error: error.to_string(),
            },
        )
        .await;
        lifecycle.transition_to(ActorState::Stopped);
        emit(&monitor, *ctx.id(), ActorEventKind::Stopped).await;
        return;
    }

    lifecycle.transition_to(ActorState::Started);
    emit(&monitor, *ctx.id(), ActorEventKind::Started).await;

    loop {
        let envelope = tokio::select! {
            biased;
            () = ctx.shutdown_signal().cancelled() => break,
            next = mailbox.recv() => match next {
                Some(envelope) => envelope,
                None => break,
            },
        };

        lifecycle.transition_to(ActorState::Started);
        let mut envelope = envelope;
        ctx.set_ask_cancellation(envelope.cancellation.clone());
        let message_type = envelope.message_type();
        emit(
            &monitor,
            *ctx.id(),
            ActorEventKind::MessageReceived {
                message_type: message_type.to_string(),
            },
        )
        .await;

        let started = Instant::now();
        let payload = envelope.payload.clone();
        let outcome = CatchUnwind {
            inner: behavior.receive(payload, &mut ctx),
        }
        .await;

        let result = match outcome {
            Ok(result) => result,
            Err(panic) => {
                let message = panic_message(&panic);
                emit(
                    &monitor,
                    *ctx.id(),
                    ActorEventKind::Panicked {
                        message: message.clone(),
                    },
                )
                .await;
                envelope.complete(Err(crate::error::Error::BehaviorPanic(message)));
                break;
            }
        };

        emit(
            &monitor,
            *ctx.id(),
            ActorEventKind::MessageProcessed {
                message_type: message_type.to_string(),
                duration_micros: started.elapsed().as_micros() as u64,
            },
        )
        .await;

        match &result {
            Ok(_) => {
                envelope.complete(result);
            }
            Err(error) => {
                let action = behavior.on_error(error, &mut ctx).await;
                emit(
                    &monitor,
                    *ctx.id(),
                    ActorEventKind::ErrorOccurred {
                        error: error.to_string(),
                    },
                )
                .await;
                envelope.complete(result);
                match action {
                    ErrorAction::Resume => {}
                    ErrorAction::Stop => break,
                    ErrorAction::Escalate => break,
                    ErrorAction::Restart => {
                        if behavior.pre_start(&mut ctx).await.is_err() {
                            break;
                        }
                    }
                }
            }
        }
    }

    mailbox.close_and_drain(shutdown_drain_timeout).await;

    lifecycle.transition_to(ActorState::Draining);
    let _ = behavior.post_stop(&mut ctx).await;
    lifecycle.transition_to(ActorState::Stopped);
    emit(&monitor, *ctx.id(), ActorEventKind::Stopped).await;
    let _ = lifecycle.last_state_change(); // keep lifecycle alive until the end for clarity
}

async fn emit(monitor: &Arc<dyn ActorMonitorSink>, actor_id: crate::util::ActorId, kind: ActorEventKind) {
    monitor
        .record_actor_event(ActorEvent {
            timestamp: Utc::now(),
            actor_id,
            event_kind: kind,
            metadata: Default::default(),
        })
        .await;
}

/// Runs an inner future inside `catch_unwind` on every poll, turning a panic
/// during `Behavior::receive` into a value instead of unwinding the actor's
/// task. Written by hand rather than pulled from the `futures` crate, which
/// this workspace does not otherwise depend on — the same call this crate
/// already made for [`CancellationToken`](crate::reply::CancellationToken)
/// instead of `tokio-util`.
struct CatchUnwind<F> {
    inner: F,
}

impl<F: Future + Unpin> Future for CatchUnwind<F> {
    type Output = Result<F::Output, Box<dyn Any + Send>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<Self::Output> {
        let inner = &mut self.inner;
        match std::panic::catch_unwind(AssertUnwindSafe(|| Pin::new(inner).poll(cx))) {
            Ok(Poll::Ready(value)) => Poll::Ready(Ok(value)),
            Ok(Poll::Pending) => Poll::Pending,
            Err(payload) => Poll::Ready(Err(payload)),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "actor panicked with a non-string payload".to_string()
    }
}
