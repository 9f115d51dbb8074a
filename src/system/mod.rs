//! Process-wide actor hosting: configuration, the name registry, the
//! dead-letter office, and the [`ActorSystem`] handle tying them together
//! (§4.5).
//!
//! # Components
//!
//! - [`SystemConfig`] — the mailbox/timeout defaults new registrations
//!   inherit
//! - [`registry::SystemRegistry`] — the heterogeneous `(name, type)` →
//!   `ActorRef` map
//! - [`dlo::DeadLetterOffice`] — the shared destination for envelopes no
//!   mailbox could deliver
//! - [`ActorSystem`] — spawns, registers, looks up, and shuts down actors
//!   as one unit

pub mod actor_system;
pub mod config;
pub mod dlo;
pub mod registry;

// Re-exports
pub use actor_system::ActorSystem;
pub use config::{
    SystemConfig, DEFAULT_ENABLE_METRICS, DEFAULT_MAILBOX_CAPACITY, DEFAULT_MAX_ACTORS,
    DEFAULT_SHUTDOWN_TIMEOUT, DEFAULT_SPAWN_TIMEOUT,
};
pub use dlo::DeadLetterOffice;
pub use registry::SystemRegistry;
