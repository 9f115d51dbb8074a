//! [`ActorSystem`]: the process-wide handle tying configuration, the name
//! registry, and the dead-letter office together (§4.5).
//!
//! Where [`crate::actor::ActorRuntime`] owns one actor's task and mailbox,
//! `ActorSystem` owns the pieces every actor in a process shares: the
//! config defaults new spawns inherit, the registry they're found through
//! by name, and the dead-letter office their mailboxes report drops to.
//! There is deliberately no supervision tree here — §4.11 handles actor
//! faults entirely inside each actor's own runtime loop via `ErrorAction`,
//! so the system has nothing to restart on an actor's behalf.

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
use parking_lot::RwLock;

// Layer 3: Internal module imports
use super::dlo::DeadLetterOffice;
use super::registry::SystemRegistry;
use super::SystemConfig;
use crate::actor::{ActorRuntime, Behavior};
use crate::error::Error;
use crate::mailbox::DeadLetterSink;
use crate::message::Message;
use crate::monitoring::sink::{ActorMonitorSink, RegistryMonitorSink};
use crate::monitoring::NoopMonitor;
use crate::monitoring::{ActorEvent, RegistryEvent};
use crate::refs::ActorRef;
use crate::util::{ActorAddress, TypedKey};

/// Whether the system is still accepting new registrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SystemState {
    Running,
    ShuttingDown,
}

/// The process-wide actor host.
///
/// Cloning an `ActorSystem` is cheap (every field is an `Arc`) and every
/// clone shares the same registry, dead-letter office, and shutdown state.
#[derive(Clone)]
pub struct ActorSystem {
    config: SystemConfig,
    registry: Arc<SystemRegistry>,
    dead_letters: Arc<dyn DeadLetterSink>,
    actor_monitor: Arc<dyn ActorMonitorSink>,
    runtimes: Arc<RwLock<Vec<RuntimeHandle>>>,
    state: Arc<RwLock<SystemState>>,
}

/// Type-erased shutdown handle for one spawned actor, kept only so
/// [`ActorSystem::shutdown`] can stop every actor it spawned without the
/// system itself being generic over any one `Behavior`.
struct RuntimeHandle {
    stop: Box<dyn Fn() + Send + Sync>,
    join: tokio::task::JoinHandle<()>,
}

impl ActorSystem {
    /// Build a system from `config`, reporting registry events to
    /// `registry_monitor` and actor lifecycle events to `actor_monitor`.
    pub fn new(
        config: SystemConfig,
        dead_letters: Arc<dyn DeadLetterSink>,
        registry_monitor: Arc<dyn RegistryMonitorSink>,
        actor_monitor: Arc<dyn ActorMonitorSink>,
    ) -> Self {
        Self {
            config,
            registry: Arc::new(SystemRegistry::new(registry_monitor)),
            dead_letters,
            actor_monitor,
            runtimes: Arc::new(RwLock::new(Vec::new())),
            state: Arc::new(RwLock::new(SystemState::Running)),
        }
    }

    /// Build a system with the default config, an in-memory dead-letter
    /// office, and no-op monitoring — convenient for tests and for hosted
    /// services that don't need custom observability wiring.
    pub fn with_defaults() -> Self {
        Self::new(
            SystemConfig::default(),
            DeadLetterOffice::default().into_sink(),
            Arc::new(NoopMonitor::<RegistryEvent>::new()),
            Arc::new(NoopMonitor::<ActorEvent>::new()),
        )
    }

    /// The configuration this system was built with.
    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Whether [`Self::shutdown`] has been called.
    pub fn is_shutting_down(&self) -> bool {
        *self.state.read() == SystemState::ShuttingDown
    }

    /// Number of actors currently registered by name.
    pub fn actor_count(&self) -> usize {
        self.registry.len()
    }

    /// The dead-letter office every actor this system spawns reports
    /// undeliverable envelopes to (§4.5 `DLO(system)`).
    pub fn dead_letters(&self) -> &Arc<dyn DeadLetterSink> {
        &self.dead_letters
    }

    /// Spawn `behavior` under `address` using this system's configured
    /// mailbox defaults, register it under `key`, and return its
    /// [`ActorRef`].
    ///
    /// Registering under a name already taken by the same `(Message,
    /// Response)` pair does not spawn a second actor: the freshly spawned
    /// one is shut down immediately and the existing reference is returned,
    /// matching [`super::registry::SystemRegistry::register`]'s
    /// first-registrant-wins semantics without leaking an orphaned task.
    pub async fn register<B: Behavior>(
        &self,
        name: &str,
        key: TypedKey<B::Message, B::Response>,
        behavior: B,
    ) -> Result<ActorRef<B::Message, B::Response>, Error>
    where
        B::Response: Send + Sync + 'static,
    {
        if self.is_shutting_down() {
            return Err(Error::actor_stopped("system is shutting down"));
        }

        let options = self.config.to_spawn_options();
        let runtime = ActorRuntime::spawn(
            ActorAddress::named(name),
            behavior,
            options,
            Arc::clone(&self.dead_letters),
            Arc::clone(&self.actor_monitor),
        );
        let candidate = ActorRef::new(runtime.sender(), runtime.address().clone());
        let resolved = self.registry.register(key, candidate.clone()).await;

        if resolved.address() == candidate.address() {
            self.track(runtime);
        } else {
            runtime.stop();
        }
        Ok(resolved)
    }

    /// Look up a previously registered actor by `key`.
    pub async fn lookup<M, R>(&self, key: TypedKey<M, R>) -> Result<ActorRef<M, R>, Error>
    where
        M: Message,
        R: Send + Sync + 'static,
    {
        self.registry.lookup(key).await
    }

    /// Stop accepting new registrations and shut down every tracked actor,
    /// waiting up to `self.config().shutdown_timeout` total. Actors still
    /// running past that deadline are abandoned; returns how many.
    pub async fn shutdown(&self) -> usize {
        *self.state.write() = SystemState::ShuttingDown;
        let handles: Vec<RuntimeHandle> = std::mem::take(&mut *self.runtimes.write());
        for handle in &handles {
            (handle.stop)();
        }

        let deadline = tokio::time::Instant::now() + self.config.shutdown_timeout;
        let mut abandoned = 0;
        for handle in handles {
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if tokio::time::timeout(remaining, handle.join).await.is_err() {
                abandoned += 1;
            }
        }
        abandoned
    }

    fn track<B: Behavior>(&self, runtime: ActorRuntime<B>) {
        let (stop_token, join) = runtime.into_parts();
        self.runtimes.write().push(RuntimeHandle {
            stop: Box::new(move || stop_token.cancel()),
            join,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::ActorContext;
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

    #[tokio::test]
    async fn register_then_lookup_round_trips() {
        let system = ActorSystem::with_defaults();
        let key: TypedKey<Ping, u32> = TypedKey::new("echo");
        let registered = system.register("echo", key, Echo).await.unwrap();
        let found = system.lookup(key).await.unwrap();
        assert_eq!(registered.address(), found.address());
        assert_eq!(system.actor_count(), 1);
        system.shutdown().await;
    }

    #[tokio::test]
    async fn duplicate_registration_does_not_leak_a_second_actor() {
        let system = ActorSystem::with_defaults();
        let key: TypedKey<Ping, u32> = TypedKey::new("echo-dup");
        let first = system.register("echo-dup", key, Echo).await.unwrap();
        let second = system.register("echo-dup", key, Echo).await.unwrap();
        assert_eq!(first.address(), second.address());
        assert_eq!(system.actor_count(), 1);
        system.shutdown().await;
    }

    #[tokio::test]
    async fn shutdown_stops_registered_actors() {
        let system = ActorSystem::with_defaults();
        let key: TypedKey<Ping, u32> = TypedKey::new("echo-stop");
        let actor_ref = system.register("echo-stop", key, Echo).await.unwrap();
        let abandoned = system.shutdown().await;
        assert_eq!(abandoned, 0);
        assert!(actor_ref.tell(Ping).await.is_err());
    }

    #[tokio::test]
    async fn lookup_miss_is_not_found() {
        let system = ActorSystem::with_defaults();
        let key: TypedKey<Ping, u32> = TypedKey::new("missing");
        let result = system.lookup(key).await;
        assert_eq!(result.unwrap_err().kind(), crate::error::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn dead_letters_accessor_exposes_the_shared_sink() {
        let office = Arc::new(DeadLetterOffice::default());
        let system = ActorSystem::new(
            SystemConfig::default(),
            Arc::clone(&office) as Arc<dyn DeadLetterSink>,
            Arc::new(NoopMonitor::<RegistryEvent>::new()),
            Arc::new(NoopMonitor::<ActorEvent>::new()),
        );

        system.dead_letters().offer(crate::mailbox::DeadLetter {
            actor: "probe".to_string(),
            message_type: "ping",
            reason: crate::mailbox::DropReason::EnqueueTimeout,
            at: chrono::Utc::now(),
        });

        assert_eq!(office.len(), 1);
    }

    #[tokio::test]
    async fn register_after_shutdown_is_rejected() {
        let system = ActorSystem::with_defaults();
        system.shutdown().await;
        let key: TypedKey<Ping, u32> = TypedKey::new("too-late");
        let result = system.register("too-late", key, Echo).await;
        assert_eq!(result.unwrap_err().kind(), crate::error::ErrorKind::ActorStopped);
    }
}
