//! # conclave-rt — a typed in-process actor runtime
//!
//! An actor runtime for a single process: bounded mailboxes with a fixed
//! enqueue budget, a typed `Tell`/`Ask` protocol, a heterogeneous named
//! registry, worker pools, Ask combinators, a pub/sub notification hub, and
//! two hosted services (mail, tasks) built on top of it as ordinary actors.
//!
//! # Quick Start
//!
//! ```rust
//! use conclave_rt::prelude::*;
//! use async_trait::async_trait;
//!
//! #[derive(Debug, Clone)]
//! struct Ping;
//! impl Message for Ping {
//!     const MESSAGE_TYPE: &'static str = "ping";
//! }
//!
//! struct Pong;
//!
//! #[async_trait]
//! impl Behavior for Pong {
//!     type Message = Ping;
//!     type Response = &'static str;
//!
//!     async fn receive(
//!         &mut self,
//!         _message: Ping,
//!         _ctx: &mut ActorContext<Ping>,
//!     ) -> Result<&'static str, Error> {
//!         Ok("pong")
//!     }
//! }
//!
//! # async fn example() -> Result<(), Error> {
//! let runtime = ActorRuntime::spawn_default(ActorAddress::named("pong"), Pong);
//! let actor_ref = ActorRef::new(runtime.sender(), runtime.address().clone());
//! assert_eq!(actor_ref.ask(Ping).await_reply().await?, "pong");
//! runtime.shutdown(std::time::Duration::from_secs(1)).await;
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! ## Single actor
//! - [`actor`] — the `Behavior` trait, its context and lifecycle, and the
//!   task loop that drives one of them (§4.3)
//! - [`message`] — `Message`, `Envelope`, `MessagePriority`
//! - [`mailbox`] — the one bounded mailbox implementation and its
//!   dead-letter seam
//! - [`refs`] — `ActorRef` (Tell + Ask) and `TellOnlyRef` (Tell only)
//! - [`reply`] — `ReplyFuture` and `CancellationToken`
//!
//! ## Many actors
//! - [`system`] — `ActorSystem`, the name registry, and the dead-letter
//!   office
//! - [`pool`] — a fixed set of identically-behaved actors addressed as one
//! - [`combinators`] — free functions composing several Asks into one
//!   outcome
//!
//! ## Observability and hosted services
//! - [`monitoring`] — structured lifecycle/registry/hub events, with
//!   `InMemoryMonitor`/`NoopMonitor` implementations
//! - [`hub`] — a pub/sub notification actor built on top of `actor`/`refs`
//! - [`services`] — the mail and task-tracker services hosted as actors
//!
//! ## Infrastructure
//! - [`error`] — the crate's single `Error` type and its `ErrorKind`
//!   taxonomy
//! - [`util`] — `ActorId`, `ActorAddress`, `MessageId`, `TypedKey`/`RawKey`
//!
//! # Design Notes
//!
//! - **No supervision tree.** An actor's own `Behavior::on_error` and the
//!   runtime's `ErrorAction` handle faults inline (§4.11); there is nothing
//!   above an actor to restart it on its behalf.
//! - **One mailbox policy.** Every mailbox blocks a sender up to a fixed
//!   enqueue budget, then drops to the dead-letter office — no pluggable
//!   backpressure strategies, no unbounded variant.
//! - **Generic over `dyn` where it's free.** Metrics recorders and
//!   monitors are generic parameters; the object-safe seams (`dyn
//!   DeadLetterSink`, `dyn ActorMonitorSink`/`RegistryMonitorSink`/
//!   `HubMonitorSink`) exist only where a concrete type genuinely can't be
//!   named at the call site.

pub mod actor;
pub mod combinators;
pub mod error;
pub mod hub;
pub mod mailbox;
pub mod message;
pub mod monitoring;
pub mod pool;
pub mod prelude;
pub mod refs;
pub mod reply;
pub mod services;
pub mod system;
pub mod util;

pub use actor::{ActorContext, ActorLifecycle, ActorRuntime, ActorState, Behavior, ErrorAction, SpawnOptions};
pub use error::{Error, ErrorKind};
pub use mailbox::{BoundedMailbox, BoundedMailboxSender, DeadLetterSink, MailboxReceiver, MailboxSender};
pub use message::{Envelope, Message, MessagePriority};
pub use monitoring::{
    ActorEvent, ActorEventKind, EventSeverity, HubEvent, HubEventKind, InMemoryMonitor,
    MailboxEvent, MailboxEventKind, Monitor, MonitoringConfig, MonitoringEvent, MonitoringSnapshot,
    NoopMonitor, RegistryEvent, RegistryEventKind,
};
pub use pool::{Pool, PoolStrategy};
pub use refs::{ActorRef, TellOnlyRef};
pub use reply::{CancellationToken, ReplyFuture};
pub use system::{ActorSystem, SystemConfig};
pub use util::{ActorAddress, ActorId, MessageId, RawKey, TypedKey};
