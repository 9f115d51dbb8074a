//! The Ask-side future and a hand-rolled cancellation token.
//!
//! `airssys-rt` has no notion of a cancellable Ask — its `Actor::
//! handle_message` is Tell-shaped. This module is new: it gives an Ask its
//! single-assignment reply slot (§4.1) and gives callers a cheap way to
//! cancel one without reaching for `tokio-util`, which this crate does not
//! depend on.

// Layer 1: Standard library imports
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// Layer 2: Third-party crate imports
use tokio::sync::{oneshot, Notify};

// Layer 3: Internal module imports
use crate::error::Error;

/// A cooperative cancellation signal shared between an Ask's caller and the
/// actor loop that will eventually observe it.
///
/// Cloning shares the same underlying flag: cancelling any clone cancels
/// all of them. This mirrors the "context" described in §9 ("Cancellation
/// discipline") without introducing a dependency on a cancellation-token
/// crate the teacher does not already use.
#[derive(Clone, Debug)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl CancellationToken {
    /// Create a fresh, not-yet-cancelled token.
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Mark the token cancelled and wake anyone awaiting [`Self::cancelled`].
    ///
    /// Idempotent: cancelling twice has the same effect as cancelling once.
    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            self.notify.notify_waiters();
        }
    }

    /// Whether this token (or any clone of it) has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Resolve once the token is cancelled. Returns immediately if already
    /// cancelled.
    pub async fn cancelled(&self) {
        if self.is_cancelled() {
            return;
        }
        // `Notify` can miss a notification that fires between the check
        // above and this call; re-check after registering interest to
        // close that window.
        let notified = self.notify.notified();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }

    /// Derive a child token: cancelling the parent cancels the child, but
    /// cancelling the child has no effect on the parent. Used by
    /// `FirstSuccess` (§4.7) to cancel losing branches without touching
    /// the caller's own token.
    pub fn child(&self) -> Self {
        let child = Self::new();
        let parent = self.clone();
        let child_for_task = child.clone();
        tokio::spawn(async move {
            parent.cancelled().await;
            child_for_task.cancel();
        });
        child
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Single-assignment future for an Ask's eventual reply (§4.1 `Future<T>`).
///
/// Completed at most once, either by the actor's reply, by the actor
/// stopping, or by cancellation. A completion race is not possible because
/// only one side (the oneshot sender) ever writes a value — cancellation
/// only changes what `await_reply` returns to *this* caller, it never
/// writes through the channel.
pub struct ReplyFuture<T> {
    rx: oneshot::Receiver<Result<T, Error>>,
    token: CancellationToken,
}

impl<T> ReplyFuture<T> {
    /// Pair a freshly created future with the sender the actor runtime will
    /// complete it with.
    pub fn new_pair(token: CancellationToken) -> (Self, oneshot::Sender<Result<T, Error>>) {
        let (tx, rx) = oneshot::channel();
        (Self { rx, token }, tx)
    }

    /// Wrap a receiver already produced elsewhere (e.g.
    /// [`crate::message::Envelope::ask`], which owns the matching sender)
    /// together with the token the caller wants cancellation raced against.
    pub fn from_parts(rx: oneshot::Receiver<Result<T, Error>>, token: CancellationToken) -> Self {
        Self { rx, token }
    }

    /// Build a future that is already resolved, for paths that must
    /// short-circuit before a real Ask ever reaches a mailbox (e.g. the
    /// target mailbox was already closed).
    pub fn ready(result: Result<T, Error>) -> Self
    where
        T: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(result);
        Self {
            rx,
            token: CancellationToken::new(),
        }
    }

    /// The token this future races against, for callers (e.g.
    /// [`crate::combinators::first_success`]) that need to cancel a losing
    /// branch once another has already won.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.token
    }

    /// Await completion or cancellation, whichever comes first.
    ///
    /// If the caller's token is cancelled before the actor replies, this
    /// returns `Err(Error::Cancelled)` immediately; the actor's eventual
    /// reply, if any, is simply dropped on the floor (the oneshot send
    /// fails silently, which is exactly the "producer discards" behavior
    /// §4.1 requires).
    pub async fn await_reply(self) -> Result<T, Error> {
        tokio::select! {
            biased;
            () = self.token.cancelled() => Err(Error::Cancelled),
            result = self.rx => match result {
                Ok(inner) => inner,
                Err(_) => Err(Error::Cancelled),
            },
        }
    }
}
