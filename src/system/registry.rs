//! Heterogeneous name registry for actors hosted by an [`super::ActorSystem`]
//! (§4.5).
//!
//! Grounded in `airssys-rt`'s lock-free `ActorRegistry<M, S>` (a `DashMap`
//! keyed on a pre-computed routing hash, one registry per message type).
//! This system needs one registry shared by every hosted service and every
//! worker pool at once, so the single message-type parameter is replaced by
//! [`RawKey`] — a `(TypeId, name)` pair that lets unrelated `(Message,
//! Response)` pairs share one map without colliding.

// Layer 1: Standard library imports
use std::any::Any;
use std::sync::Arc;

// Layer 2: Third-party crate imports
use dashmap::DashMap;

// Layer 3: Internal module imports
use crate::error::Error;
use crate::message::Message;
use crate::monitoring::sink::RegistryMonitorSink;
use crate::monitoring::{RegistryEvent, RegistryEventKind};
use crate::refs::ActorRef;
use crate::util::{RawKey, TypedKey};

/// Maps `RawKey` (a type-erased `TypedKey<M, R>`) to a type-erased, cloned
/// [`ActorRef<M, R>`].
///
/// Registration is idempotent: registering the same `(TypedKey, name)` pair
/// twice returns the reference created by the *first* call rather than
/// replacing it (§9 Open Question — resolved in favor of "first registrant
/// wins", mirroring `ActorRegistry::register`'s duplicate-rejection but
/// handing back the survivor instead of an error, since a second caller
/// asking for the same named, typed actor almost always just wants a handle
/// to it, not a failure).
pub struct SystemRegistry {
    actors: DashMap<RawKey, Box<dyn Any + Send + Sync>>,
    monitor: Arc<dyn RegistryMonitorSink>,
}

impl SystemRegistry {
    /// Build an empty registry reporting events to `monitor`.
    pub fn new(monitor: Arc<dyn RegistryMonitorSink>) -> Self {
        Self {
            actors: DashMap::new(),
            monitor,
        }
    }

    /// Register `actor_ref` under `key`, or hand back the reference already
    /// registered under the same `(TypeId, name)` pair.
    ///
    /// The `fresh` flag on the emitted [`RegistryEventKind::Registered`]
    /// event distinguishes the two outcomes for observers without requiring
    /// them to diff the returned `ActorRef`'s address.
    pub async fn register<M, R>(&self, key: TypedKey<M, R>, actor_ref: ActorRef<M, R>) -> ActorRef<M, R>
    where
        M: Message,
        R: Send + Sync + 'static,
    {
        let (fresh, resolved) = match self.actors.entry(key.raw()) {
            dashmap::mapref::entry::Entry::Occupied(slot) => {
                // `RawKey` is derived from `TypeId::of::<(M, R)>()` plus the
                // registered name, so a slot reachable under this key can
                // only ever have been inserted as this exact `ActorRef<M,
                // R>` — the downcast cannot fail without a `RawKey` bug.
                #[allow(clippy::expect_used)]
                let existing = slot
                    .get()
                    .downcast_ref::<ActorRef<M, R>>()
                    .expect("RawKey collision across distinct types")
                    .clone();
                (false, existing)
            }
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(Box::new(actor_ref.clone()));
                (true, actor_ref)
            }
        };
        self.monitor
            .record_registry_event(RegistryEvent {
                timestamp: chrono::Utc::now(),
                event_kind: RegistryEventKind::Registered {
                    name: key.name().to_string(),
                    fresh,
                },
                metadata: Default::default(),
            })
            .await;
        resolved
    }

    /// Look up an actor by `key`. Emits
    /// [`RegistryEventKind::LookupMiss`] and returns
    /// `Err(Error::NotFound)` if nothing is registered under it.
    pub async fn lookup<M, R>(&self, key: TypedKey<M, R>) -> Result<ActorRef<M, R>, Error>
    where
        M: Message,
        R: Send + Sync + 'static,
    {
        let raw = key.raw();
        match self.actors.get(&raw) {
            // See the matching comment in `register`: a hit under this key
            // can only be this `ActorRef<M, R>`. A failed downcast here
            // would mean a `RawKey` bug, not a caller mistake, so it is
            // reported the same way a lookup miss is rather than panicking.
            Some(entry) => match entry.value().downcast_ref::<ActorRef<M, R>>() {
                Some(actor_ref) => Ok(actor_ref.clone()),
                None => Err(Error::not_found(key.name())),
            },
            None => {
                self.monitor
                    .record_registry_event(RegistryEvent {
                        timestamp: chrono::Utc::now(),
                        event_kind: RegistryEventKind::LookupMiss {
                            name: key.name().to_string(),
                        },
                        metadata: Default::default(),
                    })
                    .await;
                Err(Error::not_found(key.name()))
            }
        }
    }

    /// Remove the actor registered under `key`, if any.
    pub fn unregister<M, R>(&self, key: TypedKey<M, R>)
    where
        M: Message,
        R: Send + Sync + 'static,
    {
        self.actors.remove(&key.raw());
    }

    /// Number of actors currently registered.
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// Whether the registry holds no actors.
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{ActorContext, ActorRuntime, Behavior};
    use crate::monitoring::NoopMonitor;
    use crate::util::ActorAddress;
    use async_trait::async_trait;

    #[derive(Debug, Clone)]
    struct Ping;
    impl Message for Ping {
        const MESSAGE_TYPE: &'static str = "ping";
    }

    struct Echo;

    #[async_trait]
    impl Behavior for Echo {
        type Message = Ping;
        type Response = u32;

        async fn receive(
            &mut self,
            _message: Self::Message,
            _ctx: &mut ActorContext<Self::Message>,
        ) -> Result<Self::Response, Error> {
            Ok(42)
        }
    }

    fn test_registry() -> SystemRegistry {
        SystemRegistry::new(Arc::new(NoopMonitor::<RegistryEvent>::new()))
    }

    fn spawn_echo(name: &str) -> (ActorRuntime<Echo>, ActorRef<Ping, u32>) {
        let runtime = ActorRuntime::spawn_default(ActorAddress::named(name), Echo);
        let actor_ref = ActorRef::new(runtime.sender(), runtime.address().clone());
        (runtime, actor_ref)
    }

    #[tokio::test]
    async fn register_then_lookup_round_trips() {
        let registry = test_registry();
        let (runtime, actor_ref) = spawn_echo("echo-1");
        let key: TypedKey<Ping, u32> = TypedKey::new("echo-1");
        registry.register(key, actor_ref).await;

        let found = registry.lookup(key).await.unwrap();
        assert_eq!(found.address(), runtime.address());
        runtime.shutdown(std::time::Duration::from_secs(1)).await;
    }

    #[tokio::test]
    async fn lookup_miss_returns_not_found() {
        let registry = test_registry();
        let key: TypedKey<Ping, u32> = TypedKey::new("nope");
        let result = registry.lookup(key).await;
        assert_eq!(result.unwrap_err().kind(), crate::error::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn repeat_registration_returns_first_registrant() {
        let registry = test_registry();
        let (runtime_a, ref_a) = spawn_echo("echo-a");
        let (runtime_b, ref_b) = spawn_echo("echo-b");
        let key: TypedKey<Ping, u32> = TypedKey::new("shared-name");

        let first = registry.register(key, ref_a).await;
        let second = registry.register(key, ref_b).await;

        assert_eq!(first.address(), second.address());
        assert_eq!(registry.len(), 1);
        runtime_a.shutdown(std::time::Duration::from_secs(1)).await;
        runtime_b.shutdown(std::time::Duration::from_secs(1)).await;
    }

    #[tokio::test]
    async fn same_name_different_types_do_not_collide() {
        let registry = test_registry();
        let (runtime, actor_ref) = spawn_echo("dual");
        let ping_key: TypedKey<Ping, u32> = TypedKey::new("dual");
        registry.register(ping_key, actor_ref).await;

        #[derive(Debug, Clone)]
        struct Other;
        impl Message for Other {
            const MESSAGE_TYPE: &'static str = "other";
        }
        let other_key: TypedKey<Other, u32> = TypedKey::new("dual");
        let miss = registry.lookup(other_key).await;
        assert_eq!(miss.unwrap_err().kind(), crate::error::ErrorKind::NotFound);
        runtime.shutdown(std::time::Duration::from_secs(1)).await;
    }

    #[tokio::test]
    async fn unregister_removes_entry() {
        let registry = test_registry();
        let (runtime, actor_ref) = spawn_echo("gone");
        let key: TypedKey<Ping, u32> = TypedKey::new("gone");
        registry.register(key, actor_ref).await;
        assert_eq!(registry.len(), 1);

        registry.unregister(key);
        assert!(registry.is_empty());
        assert!(registry.lookup(key).await.is_err());
        runtime.shutdown(std::time::Duration::from_secs(1)).await;
    }
}
