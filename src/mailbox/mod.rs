//! Mailbox system for actor message queuing with a fixed enqueue budget.
//!
//! Every actor owns one [`BoundedMailbox`]: a fixed-capacity FIFO queue fed
//! by one or more cloned [`BoundedMailboxSender`]s. There is no unbounded
//! variant and no pluggable backpressure strategy — §4.2 settled on a
//! single policy so callers never have to reason about which strategy a
//! given mailbox was built with: `send` waits up to the mailbox's enqueue
//! budget for space, and on timeout routes the envelope to the system's
//! dead-letter office instead of blocking indefinitely or growing without
//! bound.
//!
//! # Components
//!
//! - [`MailboxReceiver`] / [`MailboxSender`] — the actor-owned and
//!   cloneable-handle halves
//! - [`BoundedMailbox`] / [`BoundedMailboxSender`] — the one mailbox
//!   implementation
//! - [`DeadLetterSink`] / [`DeadLetter`] / [`DropReason`] — where and why a
//!   rejected envelope gets reported
//! - [`MetricsRecorder`] / [`AtomicMetrics`] — lock-free send/receive/drop
//!   counters, generic rather than `dyn` (§6.2)
//!
//! # Example
//!
//! ```
//! use conclave_rt::mailbox::BoundedMailbox;
//! use conclave_rt::message::{Envelope, Message};
//!
//! #[derive(Debug, Clone)]
//! struct Ping;
//! impl Message for Ping {
//!     const MESSAGE_TYPE: &'static str = "ping";
//! }
//!
//! # async fn example() -> Result<(), conclave_rt::error::Error> {
//! use conclave_rt::mailbox::{MailboxReceiver, MailboxSender};
//!
//! let (mut mailbox, sender) = BoundedMailbox::<Ping, ()>::new("pinger", 100);
//! sender.send(Envelope::tell(Ping)).await?;
//! let envelope = mailbox.recv().await.unwrap();
//! assert_eq!(envelope.message_type(), "ping");
//! # Ok(())
//! # }
//! ```

pub mod bounded;
pub mod metrics;
pub mod traits;

pub use bounded::{BoundedMailbox, BoundedMailboxSender};
pub use metrics::{AtomicMetrics, MetricsRecorder};
pub use traits::{
    DeadLetter, DeadLetterSink, DropReason, MailboxReceiver, MailboxSender, NoopDeadLetterSink,
    TryRecvError,
};
