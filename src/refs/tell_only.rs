//! [`TellOnlyRef`]: an [`ActorRef`](super::ActorRef) narrowed to Tell only.

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
use async_trait::async_trait;

// Layer 3: Internal module imports
use crate::error::Error;
use crate::mailbox::{BoundedMailboxSender, MailboxSender};
use crate::message::{Envelope, Message};
use crate::util::ActorAddress;

#[async_trait]
trait TellSink<M: Message>: Send + Sync {
    async fn tell(&self, message: M) -> Result<(), Error>;
}

#[async_trait]
impl<M: Message, R: Send + 'static> TellSink<M> for BoundedMailboxSender<M, R> {
    async fn tell(&self, message: M) -> Result<(), Error> {
        self.send(Envelope::tell(message)).await
    }
}

/// A handle that can Tell an actor and read its address, nothing else.
///
/// Type-erases the response type a full [`crate::refs::ActorRef`] carries,
/// since a Tell-only caller has no business knowing what an Ask on this
/// actor would return.
pub struct TellOnlyRef<M: Message> {
    inner: Arc<dyn TellSink<M>>,
    address: ActorAddress,
}

impl<M: Message> Clone for TellOnlyRef<M> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            address: self.address.clone(),
        }
    }
}

impl<M: Message> TellOnlyRef<M> {
    pub(crate) fn new(inner: Arc<dyn TellSink<M>>, address: ActorAddress) -> Self {
        Self { inner, address }
    }

    /// The actor's address.
    pub fn address(&self) -> &ActorAddress {
        &self.address
    }

    /// Fire-and-forget send.
    pub async fn tell(&self, message: M) -> Result<(), Error> {
        self.inner.tell(message).await
    }
}
