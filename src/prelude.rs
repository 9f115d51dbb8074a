//! Convenience re-exports for building on top of this crate.
//!
//! ```rust
//! use conclave_rt::prelude::*;
//! ```

// Single actor
pub use crate::actor::{ActorContext, ActorLifecycle, ActorRuntime, ActorState, Behavior, ErrorAction, SpawnOptions};
pub use crate::mailbox::{BoundedMailbox, BoundedMailboxSender, DeadLetterSink, MailboxReceiver, MailboxSender};
pub use crate::message::{Envelope, Message, MessagePriority};
pub use crate::refs::{ActorRef, TellOnlyRef};
pub use crate::reply::{CancellationToken, ReplyFuture};

// Many actors
pub use crate::pool::{Pool, PoolStrategy};
pub use crate::system::{ActorSystem, SystemConfig};

// Observability
pub use crate::monitoring::{InMemoryMonitor, Monitor, MonitoringEvent, NoopMonitor};

// Infrastructure
pub use crate::error::{Error, ErrorKind};
pub use crate::util::{ActorAddress, ActorId, MessageId, TypedKey};
