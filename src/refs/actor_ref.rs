//! [`ActorRef`]: the full-capability handle to a running actor.

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use super::tell_only::TellOnlyRef;
use crate::error::Error;
use crate::mailbox::{BoundedMailboxSender, MailboxSender};
use crate::message::{Envelope, Message};
use crate::reply::{CancellationToken, ReplyFuture};
use crate::util::ActorAddress;

/// A cloneable handle that can Tell, Ask, or narrow itself to
/// [`TellOnlyRef`] for a running actor.
///
/// Cloning is cheap: it clones the underlying `mpsc::Sender`, the same cost
/// as cloning any other mailbox sender (§6.2 M-SERVICES-CLONE).
pub struct ActorRef<M: Message, R> {
    sender: BoundedMailboxSender<M, R>,
    address: ActorAddress,
}

impl<M: Message, R> Clone for ActorRef<M, R> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            address: self.address.clone(),
        }
    }
}

impl<M: Message, R: Send + 'static> ActorRef<M, R> {
    /// Wrap a mailbox sender as a full-capability handle.
    pub fn new(sender: BoundedMailboxSender<M, R>, address: ActorAddress) -> Self {
        Self { sender, address }
    }

    /// The actor's address.
    pub fn address(&self) -> &ActorAddress {
        &self.address
    }

    /// Fire-and-forget send. Fails only if the enqueue budget elapses or the
    /// actor has already stopped (§4.2).
    pub async fn tell(&self, message: M) -> Result<(), Error> {
        self.sender.send(Envelope::tell(message)).await
    }

    /// Send and get back a [`ReplyFuture`], cancellable with a fresh token.
    pub fn ask(&self, message: M) -> ReplyFuture<R> {
        self.ask_with(message, CancellationToken::new())
    }

    /// Send and get back a [`ReplyFuture`] raced against a caller-supplied
    /// token, so an outer deadline or a sibling combinator can cancel it.
    ///
    /// Enqueues synchronously whenever the mailbox has room, so two Asks
    /// from the same caller land in the order they were called (§3
    /// FIFO-within-sender) without making `ask` itself `async`. Only when
    /// the mailbox is momentarily full does the enqueue move onto a
    /// detached task to ride out the blocking budget (§4.2); if the
    /// mailbox is full or closed, [`crate::message::Envelope::complete`]
    /// fires inside `send` itself and the caller observes that through the
    /// returned future exactly as it would a real reply.
    pub fn ask_with(&self, message: M, cancellation: CancellationToken) -> ReplyFuture<R> {
        let (envelope, rx) = Envelope::ask(message, cancellation.clone());
        match self.sender.try_reserve_send(envelope) {
            Ok(()) => {}
            Err(envelope) => {
                let sender = self.sender.clone();
                tokio::spawn(async move {
                    let _ = sender.send(envelope).await;
                });
            }
        }
        ReplyFuture::from_parts(rx, cancellation)
    }

    /// Narrow this handle to one that can only Tell.
    pub fn tell_only(&self) -> TellOnlyRef<M> {
        TellOnlyRef::new(Arc::new(self.sender.clone()), self.address.clone())
    }
}
