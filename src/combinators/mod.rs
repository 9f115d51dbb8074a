//! Free functions for composing several Asks into one outcome (§4.7).
//!
//! Everything here is built on [`crate::refs::ActorRef`] and
//! [`crate::reply::ReplyFuture`] — there is no new actor or mailbox concept
//! below this module, only ways of waiting on more than one reply at a
//! time.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use tokio::task::JoinSet;

// Layer 3: Internal module imports
use crate::error::Error;
use crate::message::Message;
use crate::refs::ActorRef;
use crate::reply::ReplyFuture;

/// Ask and await the reply in one call.
pub async fn ask_await<M: Message, R: Send + 'static>(
    target: &ActorRef<M, R>,
    message: M,
) -> Result<R, Error> {
    target.ask(message).await_reply().await
}

/// Ask, await, then narrow the response to `T` via `TryFrom<R>`.
///
/// A hosted service's response is usually a sum type (`MailResponse`,
/// `TaskResponse`); a caller that only cares about one variant implements
/// `TryFrom<R>` for that variant once and calls this instead of matching
/// out the variant at every call site.
pub async fn ask_await_typed<M, R, T>(target: &ActorRef<M, R>, message: M) -> Result<T, Error>
where
    M: Message,
    R: Send + 'static,
    T: TryFrom<R, Error = Error>,
{
    let response = ask_await(target, message).await?;
    T::try_from(response)
}

/// Ask a distinct `(target, message)` pair per entry, concurrently.
///
/// Results come back in the same order as `targets`, not completion order —
/// callers index into the result `Vec` by the position of the request that
/// produced it.
pub async fn parallel_ask<M, R>(targets: Vec<(ActorRef<M, R>, M)>) -> Vec<Result<R, Error>>
where
    M: Message,
    R: Send + 'static,
{
    let mut set = JoinSet::new();
    for (index, (target, message)) in targets.into_iter().enumerate() {
        set.spawn(async move { (index, target.ask(message).await_reply().await) });
    }
    let mut slots: Vec<Option<Result<R, Error>>> = (0..set.len()).map(|_| None).collect();
    while let Some(outcome) = set.join_next().await {
        match outcome {
            Ok((index, result)) => slots[index] = Some(result),
            Err(_join_error) => {
                // The index is lost along with the panicking task; nothing to
                // slot in, so every remaining `None` below is reported as
                // cancelled once draining finishes.
            }
        }
    }
    slots
        .into_iter()
        .map(|slot| slot.unwrap_or(Err(Error::Cancelled)))
        .collect()
}

/// Ask the same message of every target in `targets`, concurrently.
pub async fn parallel_ask_same<M, R>(targets: &[ActorRef<M, R>], message: M) -> Vec<Result<R, Error>>
where
    M: Message,
    R: Send + 'static,
{
    let pairs = targets
        .iter()
        .map(|target| (target.clone(), message.clone()))
        .collect();
    parallel_ask(pairs).await
}

/// Await whichever of `futures` resolves to `Ok` first.
///
/// Once a winner is found (or every future has failed), every other
/// future's cancellation token is cancelled — if that token is shared with
/// the target actor's per-Ask ctx (§4.3), a behavior still mid-`receive`
/// observes it and can short-circuit instead of doing wasted work (§4.7,
/// §5 "FirstSuccess ... cancels the rest").
pub async fn first_success<R: Send + 'static>(futures: Vec<ReplyFuture<R>>) -> Result<R, Error> {
    if futures.is_empty() {
        return Err(Error::NoTargets);
    }
    let tokens: Vec<_> = futures.iter().map(|future| future.cancellation().clone()).collect();
    let mut set = JoinSet::new();
    for future in futures {
        set.spawn(future.await_reply());
    }
    let mut last_err = Error::NoTargets;
    let mut winner = None;
    while let Some(outcome) = set.join_next().await {
        match outcome {
            Ok(Ok(value)) => {
                winner = Some(value);
                break;
            }
            Ok(Err(err)) => last_err = err,
            Err(_join_error) => last_err = Error::Cancelled,
        }
    }
    for token in tokens {
        token.cancel();
    }
    winner.map_or(Err(last_err), Ok)
}

/// Apply `f` to every `Ok` value, leaving `Err`s untouched.
pub fn map_responses<R, T>(results: Vec<Result<R, Error>>, f: impl Fn(R) -> T) -> Vec<Result<T, Error>> {
    results.into_iter().map(|result| result.map(&f)).collect()
}

/// Keep only the `Ok` values, in their original order.
pub fn collect_successes<R>(results: Vec<Result<R, Error>>) -> Vec<R> {
    results.into_iter().filter_map(Result::ok).collect()
}

/// Whether every result succeeded.
pub fn all_succeeded<R>(results: &[Result<R, Error>]) -> bool {
    results.iter().all(Result::is_ok)
}

/// The first error present, in original order, if any.
pub fn first_error<R>(results: &[Result<R, Error>]) -> Option<&Error> {
    results.iter().find_map(|result| result.as_ref().err())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{ActorContext, ActorRuntime, Behavior};
    use async_trait::async_trait;

    #[derive(Debug, Clone)]
    struct Add(u32);
    impl Message for Add {
        const MESSAGE_TYPE: &'static str = "add";
    }

    struct Adder(u32);

    #[async_trait]
    impl Behavior for Adder {
        type Message = Add;
        type Response = u32;

        async fn receive(
            &mut self,
            message: Self::Message,
            _ctx: &mut ActorContext<Self::Message>,
        ) -> Result<Self::Response, Error> {
            Ok(self.0 + message.0)
        }
    }

    #[derive(Debug, Clone)]
    struct Delay(u32, u64);
    impl Message for Delay {
        const MESSAGE_TYPE: &'static str = "delay";
    }

    struct SlowAdder(u32);

    #[async_trait]
    impl Behavior for SlowAdder {
        type Message = Delay;
        type Response = u32;

        async fn receive(
            &mut self,
            message: Self::Message,
            _ctx: &mut ActorContext<Self::Message>,
        ) -> Result<Self::Response, Error> {
            tokio::time::sleep(std::time::Duration::from_millis(message.1)).await;
            Ok(self.0 + message.0)
        }
    }

    fn spawn_adder(base: u32, name: &str) -> (ActorRuntime<Adder>, ActorRef<Add, u32>) {
        let runtime = ActorRuntime::spawn_default(crate::util::ActorAddress::named(name), Adder(base));
        let actor_ref = ActorRef::new(runtime.sender(), runtime.address().clone());
        (runtime, actor_ref)
    }

    #[tokio::test]
    async fn ask_await_returns_value() {
        let (runtime, actor_ref) = spawn_adder(10, "adder-1");
        assert_eq!(ask_await(&actor_ref, Add(5)).await.unwrap(), 15);
        runtime.shutdown(std::time::Duration::from_secs(1)).await;
    }

    #[tokio::test]
    async fn parallel_ask_same_hits_every_target() {
        let (r1, a1) = spawn_adder(1, "adder-a");
        let (r2, a2) = spawn_adder(2, "adder-b");
        let results = parallel_ask_same(&[a1, a2], Add(10)).await;
        let mut values: Vec<u32> = results.into_iter().map(Result::unwrap).collect();
        values.sort_unstable();
        assert_eq!(values, vec![11, 12]);
        r1.shutdown(std::time::Duration::from_secs(1)).await;
        r2.shutdown(std::time::Duration::from_secs(1)).await;
    }

    #[tokio::test]
    async fn parallel_ask_preserves_input_order_over_completion_order() {
        // Each target is its own actor so the delays race independently; the
        // first target is deliberately the slowest, so a completion-order
        // drain would put its result last. `parallel_ask` must still report
        // it at index 0.
        let slow = ActorRuntime::spawn_default(ActorAddress::named("slow"), SlowAdder(0));
        let fast_a = ActorRuntime::spawn_default(ActorAddress::named("fast-a"), SlowAdder(0));
        let fast_b = ActorRuntime::spawn_default(ActorAddress::named("fast-b"), SlowAdder(0));
        let pairs = vec![
            (ActorRef::new(slow.sender(), slow.address().clone()), Delay(1, 50)),
            (ActorRef::new(fast_a.sender(), fast_a.address().clone()), Delay(2, 0)),
            (ActorRef::new(fast_b.sender(), fast_b.address().clone()), Delay(3, 0)),
        ];
        let results = parallel_ask(pairs).await;
        let values: Vec<u32> = results.into_iter().map(Result::unwrap).collect();
        assert_eq!(values, vec![1, 2, 3]);
        slow.shutdown(std::time::Duration::from_secs(1)).await;
        fast_a.shutdown(std::time::Duration::from_secs(1)).await;
        fast_b.shutdown(std::time::Duration::from_secs(1)).await;
    }

    #[tokio::test]
    async fn first_success_returns_a_winner() {
        let (r1, a1) = spawn_adder(100, "adder-c");
        let futures = vec![a1.ask(Add(1)), a1.ask(Add(2))];
        let result = first_success(futures).await;
        assert!(result.is_ok());
        r1.shutdown(std::time::Duration::from_secs(1)).await;
    }

    struct CancelAware {
        observed_cancellation: std::sync::Arc<std::sync::atomic::AtomicBool>,
    }

    #[async_trait]
    impl Behavior for CancelAware {
        type Message = Delay;
        type Response = u32;

        async fn receive(
            &mut self,
            message: Self::Message,
            ctx: &mut ActorContext<Self::Message>,
        ) -> Result<Self::Response, Error> {
            tokio::select! {
                () = ctx.cancelled() => {
                    self.observed_cancellation.store(true, std::sync::atomic::Ordering::SeqCst);
                    Err(Error::Cancelled)
                }
                () = tokio::time::sleep(std::time::Duration::from_millis(message.1)) => Ok(message.0),
            }
        }
    }

    #[tokio::test]
    async fn first_success_cancels_the_losing_branchs_ctx() {
        let observed = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
        let fast = ActorRuntime::spawn_default(crate::util::ActorAddress::named("fast"), SlowAdder(0));
        let slow = ActorRuntime::spawn_default(
            crate::util::ActorAddress::named("slow-cancel-aware"),
            CancelAware {
                observed_cancellation: observed.clone(),
            },
        );
        let fast_ref = ActorRef::new(fast.sender(), fast.address().clone());
        let slow_ref = ActorRef::new(slow.sender(), slow.address().clone());

        let futures = vec![fast_ref.ask(Delay(1, 0)), slow_ref.ask(Delay(2, 300))];
        let result = first_success(futures).await;
        assert_eq!(result.unwrap(), 1);

        tokio::time::timeout(std::time::Duration::from_millis(200), async {
            while !observed.load(std::sync::atomic::Ordering::SeqCst) {
                tokio::time::sleep(std::time::Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("losing branch should observe cancellation via its ctx");

        fast.shutdown(std::time::Duration::from_secs(1)).await;
        slow.shutdown(std::time::Duration::from_secs(1)).await;
    }

    #[tokio::test]
    async fn first_success_with_no_futures_is_no_targets() {
        let result: Result<u32, Error> = first_success(Vec::new()).await;
        assert_eq!(result.unwrap_err().kind(), crate::error::ErrorKind::NoTargets);
    }

    #[test]
    fn collect_successes_and_first_error() {
        let results: Vec<Result<u32, Error>> = vec![Ok(1), Err(Error::NoTargets), Ok(2)];
        assert_eq!(collect_successes(results.clone()), vec![1, 2]);
        assert_eq!(first_error(&results).unwrap().kind(), crate::error::ErrorKind::NoTargets);
        assert!(!all_succeeded(&results));
    }

    #[test]
    fn map_responses_transforms_ok_values() {
        let results: Vec<Result<u32, Error>> = vec![Ok(1), Err(Error::NoTargets)];
        let mapped = map_responses(results, |v| v * 10);
        assert_eq!(mapped[0].as_ref().unwrap(), &10);
        assert!(mapped[1].is_err());
    }
}
