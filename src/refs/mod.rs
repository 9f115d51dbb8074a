//! Capability-scoped handles to a running actor (§4.1, §4.6).
//!
//! An [`ActorRef<M, R>`] can Tell, Ask, and read the actor's address. A
//! [`TellOnlyRef<M>`] can only Tell — handing one out instead of a full
//! `ActorRef` is how a service keeps a collaborator from opening an Ask
//! conversation it was never meant to answer.

pub mod actor_ref;
pub mod tell_only;

pub use actor_ref::ActorRef;
pub use tell_only::TellOnlyRef;
