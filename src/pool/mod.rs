//! A fixed set of identically-behaved actors dispatched to as one unit
//! (§4.6), grounded in the round-robin/random member-selection logic this
//! workspace's broker registry already used for named pools.

// Layer 1: Standard library imports
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

// Layer 2: Third-party crate imports
use rand::Rng;

// Layer 3: Internal module imports
use crate::actor::{Behavior, ActorRuntime, SpawnOptions};
use crate::error::Error;
use crate::mailbox::DeadLetterSink;
use crate::monitoring::sink::ActorMonitorSink;
use crate::refs::ActorRef;
use crate::reply::ReplyFuture;
use crate::util::ActorAddress;

/// How [`Pool::tell`] / [`Pool::ask`] pick a member for a single-target send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolStrategy {
    /// Cycle through members in order, one per call.
    RoundRobin,
    /// Pick a member uniformly at random.
    Random,
}

/// A pool of `N` actors running the same [`Behavior`], addressed as one
/// unit.
///
/// The pool owns its members' [`ActorRuntime`]s, so [`Pool::stop_all`] can
/// actually shut every member down — a capability a bare `Vec<ActorRef>`
/// wouldn't have, since an `ActorRef` only ever sees a mailbox sender.
pub struct Pool<B: Behavior> {
    runtimes: Vec<ActorRuntime<B>>,
    refs: Vec<ActorRef<B::Message, B::Response>>,
    counter: AtomicUsize,
    strategy: PoolStrategy,
}

impl<B: Behavior> Pool<B> {
    /// Spawn a pool of `size` actors, each built by `factory(index)`.
    ///
    /// A `size` of `0` defaults to `1` (§4.6 "default size 1 when
    /// configured size ≤ 0") rather than producing an empty pool that can
    /// never dispatch and only ever answers `NoTargets`.
    pub fn spawn(
        name_prefix: &str,
        size: usize,
        factory: impl Fn(usize) -> B,
        strategy: PoolStrategy,
        options: SpawnOptions,
        dead_letters: Arc<dyn DeadLetterSink>,
        monitor: Arc<dyn ActorMonitorSink>,
    ) -> Self {
        let size = size.max(1);
        let mut runtimes = Vec::with_capacity(size);
        let mut refs = Vec::with_capacity(size);
        for index in 0..size {
            let address = ActorAddress::named(format!("{name_prefix}-{index}"));
            let runtime = ActorRuntime::spawn(
                address.clone(),
                factory(index),
                options.clone(),
                Arc::clone(&dead_letters),
                Arc::clone(&monitor),
            );
            refs.push(ActorRef::new(runtime.sender(), runtime.address().clone()));
            runtimes.push(runtime);
        }
        Self {
            runtimes,
            refs,
            counter: AtomicUsize::new(0),
            strategy,
        }
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.refs.len()
    }

    /// Whether the pool has no members.
    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    /// Every member's ref, for callers that want to address one directly.
    pub fn members(&self) -> &[ActorRef<B::Message, B::Response>] {
        &self.refs
    }

    fn pick(&self) -> Result<&ActorRef<B::Message, B::Response>, Error> {
        if self.refs.is_empty() {
            return Err(Error::NoTargets);
        }
        let index = match self.strategy {
            PoolStrategy::RoundRobin => self.counter.fetch_add(1, Ordering::Relaxed) % self.refs.len(),
            PoolStrategy::Random => rand::thread_rng().gen_range(0..self.refs.len()),
        };
        Ok(&self.refs[index])
    }

    /// Tell one member, chosen per the pool's strategy.
    pub async fn tell(&self, message: B::Message) -> Result<(), Error> {
        self.pick()?.tell(message).await
    }

    /// Ask one member, chosen per the pool's strategy.
    pub fn ask(&self, message: B::Message) -> Result<ReplyFuture<B::Response>, Error> {
        Ok(self.pick()?.ask(message))
    }

    /// Tell every member the same message.
    pub async fn broadcast(&self, message: B::Message) -> Vec<Result<(), Error>> {
        let mut handles = Vec::with_capacity(self.refs.len());
        for member in &self.refs {
            let member = member.clone();
            let message = message.clone();
            handles.push(tokio::spawn(async move { member.tell(message).await }));
        }
        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            results.push(
                handle
                    .await
                    .unwrap_or_else(|_| Err(Error::actor_stopped("pool_member"))),
            );
        }
        results
    }

    /// Ask every member the same message, returning one future per member
    /// in member order.
    pub fn broadcast_ask(&self, message: B::Message) -> Vec<ReplyFuture<B::Response>> {
        self.refs.iter().map(|member| member.ask(message.clone())).collect()
    }

    /// Shut every member down, waiting up to `timeout` total. Returns how
    /// many members were still running when the deadline passed.
    pub async fn stop_all(self, timeout: Duration) -> usize {
        let deadline = tokio::time::Instant::now() + timeout;
        let mut abandoned = 0;
        for runtime in self.runtimes {
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if !runtime.shutdown(remaining).await {
                abandoned += 1;
            }
        }
        abandoned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::ActorContext;
    use crate::error::Error as CrateError;
    use crate::message::Message;
    use async_trait::async_trait;

    #[derive(Debug, Clone)]
    struct Work(u32);
    impl Message for Work {
        const MESSAGE_TYPE: &'static str = "work";
    }

    #[derive(Clone)]
    struct Doubler;

    #[async_trait]
    impl Behavior for Doubler {
        type Message = Work;
        type Response = u32;

        async fn receive(
            &mut self,
            message: Self::Message,
            _ctx: &mut ActorContext<Self::Message>,
        ) -> Result<Self::Response, CrateError> {
            Ok(message.0 * 2)
        }
    }

    fn make_pool(strategy: PoolStrategy) -> Pool<Doubler> {
        Pool::spawn(
            "doubler",
            3,
            |_| Doubler,
            strategy,
            SpawnOptions::default(),
            Arc::new(crate::mailbox::NoopDeadLetterSink),
            Arc::new(crate::monitoring::NoopMonitor::new()),
        )
    }

    #[tokio::test]
    async fn round_robin_cycles_through_members() {
        let pool = make_pool(PoolStrategy::RoundRobin);
        let first = pool.pick().unwrap().address().clone();
        let second = pool.pick().unwrap().address().clone();
        let third = pool.pick().unwrap().address().clone();
        let fourth = pool.pick().unwrap().address().clone();
        assert_ne!(first, second);
        assert_ne!(second, third);
        assert_eq!(first, fourth);
        pool.stop_all(Duration::from_secs(1)).await;
    }

    #[tokio::test]
    async fn ask_reaches_some_member() {
        let pool = make_pool(PoolStrategy::RoundRobin);
        let result = pool.ask(Work(21)).unwrap().await_reply().await;
        assert_eq!(result.unwrap(), 42);
        pool.stop_all(Duration::from_secs(1)).await;
    }

    #[tokio::test]
    async fn broadcast_reaches_every_member() {
        let pool = make_pool(PoolStrategy::RoundRobin);
        let results = pool.broadcast(Work(1)).await;
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.is_ok()));
        pool.stop_all(Duration::from_secs(1)).await;
    }

    #[tokio::test]
    async fn broadcast_ask_collects_one_future_per_member() {
        let pool = make_pool(PoolStrategy::RoundRobin);
        let futures = pool.broadcast_ask(Work(5));
        assert_eq!(futures.len(), 3);
        for future in futures {
            assert_eq!(future.await_reply().await.unwrap(), 10);
        }
        pool.stop_all(Duration::from_secs(1)).await;
    }

    #[tokio::test]
    async fn zero_configured_size_defaults_to_one_member() {
        let pool: Pool<Doubler> = Pool::spawn(
            "empty",
            0,
            |_| Doubler,
            PoolStrategy::RoundRobin,
            SpawnOptions::default(),
            Arc::new(crate::mailbox::NoopDeadLetterSink),
            Arc::new(crate::monitoring::NoopMonitor::new()),
        );
        assert_eq!(pool.len(), 1);
        assert!(!pool.is_empty());
        let result = pool.ask(Work(4)).unwrap().await_reply().await;
        assert_eq!(result.unwrap(), 8);
        pool.stop_all(Duration::from_secs(1)).await;
    }

    #[tokio::test]
    async fn factory_is_invoked_with_each_members_index() {
        let pool: Pool<Doubler> = Pool::spawn(
            "indexed",
            3,
            |_index| Doubler,
            PoolStrategy::RoundRobin,
            SpawnOptions::default(),
            Arc::new(crate::mailbox::NoopDeadLetterSink),
            Arc::new(crate::monitoring::NoopMonitor::new()),
        );
        let names: Vec<&str> = pool.members().iter().map(|m| m.address().name().unwrap()).collect();
        assert_eq!(names, vec!["indexed-0", "indexed-1", "indexed-2"]);
        pool.stop_all(Duration::from_secs(1)).await;
    }
}
