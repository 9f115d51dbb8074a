//! Object-safe adapters over [`Monitor`](super::traits::Monitor).
//!
//! `Monitor<E>` requires `Clone`, which rules out `dyn Monitor<E>`. The
//! runtime pieces that need to hold *some* monitor without committing to a
//! concrete type at compile time (`ActorRuntime`, `ActorSystem`) go through
//! one of these instead, the same way mailboxes hold a `dyn DeadLetterSink`
//! rather than being generic over it.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use async_trait::async_trait;

// Layer 3: Internal module imports
use super::traits::Monitor;
use super::types::{ActorEvent, HubEvent, RegistryEvent};

/// Object-safe sink for [`ActorEvent`]s.
#[async_trait]
pub trait ActorMonitorSink: Send + Sync {
    /// Record an actor event, discarding the error on failure — monitoring
    /// must never be why an actor's own work fails.
    async fn record_actor_event(&self, event: ActorEvent);
}

#[async_trait]
impl<M: Monitor<ActorEvent>> ActorMonitorSink for M {
    async fn record_actor_event(&self, event: ActorEvent) {
        let _ = self.record(event).await;
    }
}

/// Object-safe sink for [`RegistryEvent`]s.
#[async_trait]
pub trait RegistryMonitorSink: Send + Sync {
    /// Record a registry event, discarding the error on failure.
    async fn record_registry_event(&self, event: RegistryEvent);
}

#[async_trait]
impl<M: Monitor<RegistryEvent>> RegistryMonitorSink for M {
    async fn record_registry_event(&self, event: RegistryEvent) {
        let _ = self.record(event).await;
    }
}

/// Object-safe sink for [`HubEvent`]s.
#[async_trait]
pub trait HubMonitorSink: Send + Sync {
    /// Record a hub event, discarding the error on failure.
    async fn record_hub_event(&self, event: HubEvent);
}

#[async_trait]
impl<M: Monitor<HubEvent>> HubMonitorSink for M {
    async fn record_hub_event(&self, event: HubEvent) {
        let _ = self.record(event).await;
    }
}
