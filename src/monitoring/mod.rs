//! # Monitoring Module
//!
//! Universal monitoring infrastructure for observing and tracking events across all runtime components.
//!
//! ## Features
//! - **Generic Monitor<E> Trait**: Universal monitoring for any entity type
//! - **Zero-Cost Abstraction**: NoopMonitor compiles away when disabled
//! - **Lock-Free Recording**: Atomic counters for concurrent event tracking
//! - **Type Safety**: MonitoringEvent trait ensures compile-time correctness
//!
//! ## Event Types
//! - `ActorEvent`: Actor lifecycle and message processing
//! - `RegistryEvent`: System registry registration, lookup, shutdown
//! - `HubEvent`: Notification hub subscribe/unsubscribe/delivery
//! - `MailboxEvent`: Mailbox operations and backpressure
//!
//! ## Examples
//! ```rust
//! use conclave_rt::monitoring::{InMemoryMonitor, MonitoringConfig, ActorEvent};
//!
//! let config = MonitoringConfig::default();
//! let monitor = InMemoryMonitor::<ActorEvent>::new(config);
//! ```

pub mod error;
pub mod in_memory;
pub mod noop;
pub mod sink;
pub mod traits;
pub mod types;

pub use error::MonitoringError;
pub use in_memory::InMemoryMonitor;
pub use noop::NoopMonitor;
pub use sink::{ActorMonitorSink, HubMonitorSink, RegistryMonitorSink};
pub use traits::{EventSeverity, Monitor, MonitoringEvent};
pub use types::{
    ActorEvent, ActorEventKind, HubEvent, HubEventKind, MailboxEvent, MailboxEventKind,
    MonitoringConfig, MonitoringSnapshot, RegistryEvent, RegistryEventKind,
};
