//! # DSSS Runtime
//!
//! Store runtime for DSSS reducers.
//!
//! - **Store**: owns the state, runs the reducer and executes the effects it returns
//! - **Feedback loop**: actions produced by effects are sent back through the reducer
//!   and then broadcast to observers
//! - **Cancellation**: effects wrapped in `Effect::Cancellable` are tracked by id and
//!   aborted by `Effect::Cancel` or on shutdown
//!
//! ## Example
//!
//! ```ignore
//! use dsss_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use dsss_core::{Effect, EffectId, Reducer};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::{RwLock, watch};
use tokio::task::AbortHandle;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Shutdown timed out waiting for effects to complete
        #[error("Shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),

        /// Timeout waiting for a matching action
        ///
        /// Returned by `send_and_wait_for` when the timeout expires first.
        #[error("Timeout waiting for action")]
        Timeout,

        /// Action broadcast channel closed
        #[error("Action broadcast channel closed")]
        ChannelClosed,
    }
}

pub use error::StoreError;

/// Handle for tracking effect completion
///
/// Returned by [`Store::send()`]. Tracks the effects returned directly for
/// that action; actions fed back by those effects get their own handles.
///
/// # Example
///
/// ```ignore
/// let mut handle = store.send(Action::Start).await?;
/// handle.wait_with_timeout(Duration::from_secs(5)).await?;
/// ```
#[derive(Clone)]
pub struct EffectHandle {
    effects: Arc<AtomicUsize>,
    completion: watch::Receiver<()>,
}

impl EffectHandle {
    fn new() -> (Self, EffectTracking) {
        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = watch::channel(());

        let handle = Self {
            effects: Arc::clone(&counter),
            completion: rx,
        };
        let tracking = EffectTracking {
            counter,
            notifier: Arc::new(tx),
        };

        (handle, tracking)
    }

    /// Create a handle that's already complete
    #[must_use]
    pub fn completed() -> Self {
        let (tx, rx) = watch::channel(());
        let _ = tx.send(());

        Self {
            effects: Arc::new(AtomicUsize::new(0)),
            completion: rx,
        }
    }

    /// Number of tracked effects still running
    #[must_use]
    pub fn pending(&self) -> usize {
        self.effects.load(Ordering::SeqCst)
    }

    /// Wait for all tracked effects to complete
    ///
    /// Aborted (cancelled) effects count as complete.
    pub async fn wait(&mut self) {
        while self.effects.load(Ordering::SeqCst) > 0 {
            if self.completion.changed().await.is_err() {
                break;
            }
        }
    }

    /// Wait for all effects to complete with a timeout
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if the timeout expires before all effects complete.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), StoreError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| StoreError::Timeout)
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("pending_effects", &self.effects.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

/// Internal: per-action effect counter shared with spawned effect tasks
#[derive(Clone)]
struct EffectTracking {
    counter: Arc<AtomicUsize>,
    notifier: Arc<watch::Sender<()>>,
}

impl EffectTracking {
    fn increment(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }

    fn decrement(&self) {
        if self.counter.fetch_sub(1, Ordering::SeqCst) == 1 {
            let _ = self.notifier.send(());
        }
    }
}

/// Internal: RAII guard releasing an effect's tracking slots on drop
///
/// Built before the task is spawned and moved into it, so the slots are
/// released on completion, panic, or abort (even before the first poll).
struct EffectGuard {
    tracking: EffectTracking,
    pending: Arc<AtomicUsize>,
}

impl EffectGuard {
    fn new(tracking: &EffectTracking, pending: &Arc<AtomicUsize>) -> Self {
        tracking.increment();
        pending.fetch_add(1, Ordering::SeqCst);
        Self {
            tracking: tracking.clone(),
            pending: Arc::clone(pending),
        }
    }
}

impl Drop for EffectGuard {
    fn drop(&mut self) {
        self.pending.fetch_sub(1, Ordering::SeqCst);
        self.tracking.decrement();
    }
}

/// Internal: running cancellable effects, keyed by id
#[derive(Default)]
struct CancellationRegistry {
    tasks: Mutex<HashMap<EffectId, Vec<AbortHandle>>>,
}

impl CancellationRegistry {
    fn register(&self, id: EffectId, handle: AbortHandle) {
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        let handles = tasks.entry(id).or_default();
        handles.retain(|h| !h.is_finished());
        handles.push(handle);
    }

    fn cancel(&self, id: &EffectId) -> usize {
        let handles = self
            .tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
            .unwrap_or_default();

        let mut aborted = 0;
        for handle in handles {
            if !handle.is_finished() {
                handle.abort();
                aborted += 1;
            }
        }
        aborted
    }

    fn cancel_all(&self) -> usize {
        let drained: Vec<_> = self
            .tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain()
            .flat_map(|(_, handles)| handles)
            .collect();

        let mut aborted = 0;
        for handle in drained {
            if !handle.is_finished() {
                handle.abort();
                aborted += 1;
            }
        }
        aborted
    }
}

/// Store runtime for coordinating reducer execution and effect handling.
pub mod store {
    use super::{
        Arc, AtomicUsize, CancellationRegistry, Duration, Effect, EffectGuard,
        EffectHandle, EffectId, EffectTracking, Ordering, Reducer, RwLock, StoreError,
    };
    use tokio::sync::{broadcast, watch};

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock` for concurrent access)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop and cancellation)
    ///
    /// Cloning a store is cheap; clones share state and running effects.
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: Arc<R>,
        environment: Arc<E>,
        /// `true` once shutdown has begun
        shutdown: Arc<watch::Sender<bool>>,
        pending_effects: Arc<AtomicUsize>,
        cancellables: Arc<CancellationRegistry>,
        /// Every action produced by an effect is broadcast here after the
        /// reducer has processed it.
        action_broadcast: broadcast::Sender<A>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + Clone + 'static,
        S: Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// The action broadcast buffers 16 actions; use
        /// [`Store::with_broadcast_capacity`] for more.
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_broadcast_capacity(initial_state, reducer, environment, 16)
        }

        /// Create a new store with a custom action broadcast capacity
        #[must_use]
        pub fn with_broadcast_capacity(
            initial_state: S,
            reducer: R,
            environment: E,
            capacity: usize,
        ) -> Self {
            let (action_broadcast, _) = broadcast::channel(capacity.max(1));

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer: Arc::new(reducer),
                environment: Arc::new(environment),
                shutdown: Arc::new(watch::Sender::new(false)),
                pending_effects: Arc::new(AtomicUsize::new(0)),
                cancellables: Arc::new(CancellationRegistry::default()),
                action_broadcast,
            }
        }

        /// Send an action to the store
        ///
        /// 1. Acquires the write lock on state
        /// 2. Calls the reducer with (state, action, environment)
        /// 3. Starts executing the returned effects
        ///
        /// Returns once effects are started, not finished; use the returned
        /// [`EffectHandle`] to wait for them.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError> {
            let stopping = *self.shutdown.borrow();
            if stopping {
                tracing::warn!("Rejected action: store is shutting down");
                metrics::counter!("store.shutdown.rejected_actions").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            metrics::counter!("store.actions.total").increment(1);

            let (handle, tracking) = EffectHandle::new();

            let effects = {
                let mut state = self.state.write().await;
                let effects = self.reducer.reduce(&mut state, action, &self.environment);
                tracing::trace!("Reducer returned {} effects", effects.len());
                effects
            };

            for effect in effects {
                self.execute_effect(effect, &tracking, None);
            }

            Ok(handle)
        }

        /// Send an action and wait for a matching action produced by its effects
        ///
        /// Subscribes to the action broadcast before sending, so a fast effect
        /// cannot be missed. Only effect-produced actions are observed.
        ///
        /// # Errors
        ///
        /// - [`StoreError::Timeout`]: no matching action before `timeout`
        /// - [`StoreError::ChannelClosed`]: the broadcast channel closed
        /// - [`StoreError::ShutdownInProgress`]: the store is shutting down
        pub async fn send_and_wait_for<F>(
            &self,
            action: A,
            predicate: F,
            timeout: Duration,
        ) -> Result<A, StoreError>
        where
            F: Fn(&A) -> bool,
        {
            let mut rx = self.action_broadcast.subscribe();
            let stopping = self.shutdown.subscribe();

            self.send(action).await?;

            let matching = async {
                loop {
                    match rx.recv().await {
                        Ok(action) if predicate(&action) => return Ok(action),
                        Ok(_) => {},
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "Action observer lagged");
                        },
                        Err(broadcast::error::RecvError::Closed) => {
                            return Err(StoreError::ChannelClosed);
                        },
                    }
                }
            };

            let outcome = async {
                tokio::select! {
                    // An outcome already reduced wins over a concurrent shutdown
                    biased;
                    result = matching => result,
                    () = shutdown_started(stopping) => Err(StoreError::ShutdownInProgress),
                }
            };

            tokio::time::timeout(timeout, outcome)
                .await
                .map_err(|_| StoreError::Timeout)?
        }

        /// Subscribe to every action produced by effects
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let status = store.state(|s| s.status.clone()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&state)
        }

        /// Abort every running effect registered under `id`
        ///
        /// Returns how many running effects were aborted.
        pub fn cancel(&self, id: &EffectId) -> usize {
            let aborted = self.cancellables.cancel(id);
            if aborted > 0 {
                tracing::debug!(effect_id = %id, aborted, "Cancelled effects");
                #[allow(clippy::cast_possible_truncation)]
                metrics::counter!("store.effects.cancelled").increment(aborted as u64);
            }
            aborted
        }

        /// Number of effects currently running
        #[must_use]
        pub fn pending_effects(&self) -> usize {
            self.pending_effects.load(Ordering::Acquire)
        }

        /// Initiate graceful shutdown of the store
        ///
        /// 1. Rejects new actions
        /// 2. Aborts every cancellable effect (nothing scheduled may fire afterwards)
        /// 3. Waits for the remaining effects, up to `timeout`
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownTimeout`] if effects are still running
        /// when the timeout expires.
        pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
            tracing::info!("Initiating graceful shutdown");
            self.shutdown.send_replace(true);

            let aborted = self.cancellables.cancel_all();
            if aborted > 0 {
                tracing::debug!(aborted, "Aborted cancellable effects on shutdown");
            }

            let start = tokio::time::Instant::now();
            let poll_interval = Duration::from_millis(10);

            loop {
                let pending = self.pending_effects.load(Ordering::Acquire);
                if pending == 0 {
                    tracing::info!("All effects completed, shutdown successful");
                    return Ok(());
                }

                if start.elapsed() >= timeout {
                    tracing::error!(pending_effects = pending, "Shutdown timeout");
                    return Err(StoreError::ShutdownTimeout(pending));
                }

                tokio::time::sleep(poll_interval).await;
            }
        }

        /// Feed an effect-produced action back through the reducer, then broadcast it
        async fn feed_back(&self, action: A) {
            match self.send(action.clone()).await {
                Ok(_) => {
                    // No receivers is not an error
                    let _ = self.action_broadcast.send(action);
                },
                // Observers only ever see actions the reducer has processed
                Err(error) => tracing::debug!(%error, "Feedback action dropped"),
            }
        }

        fn spawn_tracked<F>(&self, scope: Option<&EffectId>, guard: EffectGuard, work: F)
        where
            F: std::future::Future<Output = ()> + Send + 'static,
        {
            let task = tokio::spawn(async move {
                let _guard = guard;
                work.await;
            });

            if let Some(id) = scope {
                self.cancellables.register(id.clone(), task.abort_handle());
            }
        }

        /// Execute an effect
        ///
        /// - `None`: no-op
        /// - `Future`: spawns the computation, feeds back the resulting action if `Some`
        /// - `Delay`: spawns a timer, feeds back the action when it fires
        /// - `Parallel`: executes every effect concurrently
        /// - `Sequential`: executes effects in order, waiting for each
        /// - `Cancellable`: executes the inner effect registered under its id
        /// - `Cancel`: aborts everything registered under the id
        ///
        /// Effect tasks that panic are logged by tokio and do not halt the store.
        fn execute_effect(&self, effect: Effect<A>, tracking: &EffectTracking, scope: Option<&EffectId>) {
            match effect {
                Effect::None => {
                    tracing::trace!("Executing Effect::None (no-op)");
                },
                Effect::Future(fut) => {
                    metrics::counter!("store.effects.executed", "type" => "future").increment(1);
                    let guard = EffectGuard::new(tracking, &self.pending_effects);
                    let store = self.clone();

                    self.spawn_tracked(scope, guard, async move {
                        if let Some(action) = fut.await {
                            tracing::trace!("Effect::Future produced an action");
                            store.feed_back(action).await;
                        }
                    });
                },
                Effect::Delay { duration, action } => {
                    tracing::trace!(?duration, "Executing Effect::Delay");
                    metrics::counter!("store.effects.executed", "type" => "delay").increment(1);
                    let guard = EffectGuard::new(tracking, &self.pending_effects);
                    let store = self.clone();

                    self.spawn_tracked(scope, guard, async move {
                        tokio::time::sleep(duration).await;
                        tracing::trace!("Effect::Delay elapsed");
                        store.feed_back(*action).await;
                    });
                },
                Effect::Parallel(effects) => {
                    metrics::counter!("store.effects.executed", "type" => "parallel").increment(1);
                    for effect in effects {
                        self.execute_effect(effect, tracking, scope);
                    }
                },
                Effect::Sequential(effects) => {
                    metrics::counter!("store.effects.executed", "type" => "sequential").increment(1);
                    let guard = EffectGuard::new(tracking, &self.pending_effects);
                    let store = self.clone();
                    let inner_scope = scope.cloned();

                    self.spawn_tracked(scope, guard, async move {
                        for effect in effects {
                            let (mut step, step_tracking) = EffectHandle::new();
                            store.execute_effect(effect, &step_tracking, inner_scope.as_ref());
                            drop(step_tracking);
                            step.wait().await;
                        }
                    });
                },
                Effect::Cancellable { id, effect } => {
                    self.execute_effect(*effect, tracking, Some(&id));
                },
                Effect::Cancel(id) => {
                    self.cancel(&id);
                },
            }
        }
    }

    /// Resolves once the store's shutdown flag is raised
    async fn shutdown_started(mut flag: watch::Receiver<bool>) {
        loop {
            let raised = *flag.borrow_and_update();
            if raised {
                return;
            }
            if flag.changed().await.is_err() {
                // Sender gone: the store is dropped and nothing will change
                std::future::pending::<()>().await;
            }
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: Arc::clone(&self.reducer),
                environment: Arc::clone(&self.environment),
                shutdown: Arc::clone(&self.shutdown),
                pending_effects: Arc::clone(&self.pending_effects),
                cancellables: Arc::clone(&self.cancellables),
                action_broadcast: self.action_broadcast.clone(),
            }
        }
    }
}

pub use store::Store;

#[cfg(test)]
mod tests {
    use super::*;
    use dsss_core::{smallvec, SmallVec};

    const TICK: EffectId = EffectId::from_static("tick");

    #[derive(Debug, Clone, Default)]
    struct TestState {
        value: i32,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum TestAction {
        Increment,
        ProduceEffect,
        ScheduleTick,
        CancelTick,
        ProduceSequentialEffects,
        Ticked,
    }

    struct TestReducer;

    impl Reducer for TestReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut TestState,
            action: TestAction,
            _env: &(),
        ) -> SmallVec<[Effect<TestAction>; 4]> {
            match action {
                TestAction::Increment => {
                    state.value += 1;
                    smallvec![Effect::None]
                },
                TestAction::ProduceEffect => {
                    smallvec![Effect::Future(Box::pin(async { Some(TestAction::Increment) }))]
                },
                TestAction::ScheduleTick => smallvec![Effect::Delay {
                    duration: Duration::from_secs(5),
                    action: Box::new(TestAction::Ticked),
                }
                .cancellable(TICK)],
                TestAction::CancelTick => smallvec![Effect::Cancel(TICK)],
                TestAction::ProduceSequentialEffects => smallvec![Effect::chain(vec![
                    Effect::Future(Box::pin(async { Some(TestAction::Increment) })),
                    Effect::Future(Box::pin(async { Some(TestAction::Increment) })),
                ])],
                TestAction::Ticked => {
                    state.value += 100;
                    smallvec![Effect::None]
                },
            }
        }
    }

    fn store() -> Store<TestState, TestAction, (), TestReducer> {
        Store::new(TestState::default(), TestReducer, ())
    }

    #[tokio::test]
    async fn send_updates_state() {
        let store = store();
        let _ = store.send(TestAction::Increment).await;
        assert_eq!(store.state(|s| s.value).await, 1);
    }

    #[tokio::test]
    async fn future_effect_feeds_action_back() {
        let store = store();
        let result = store
            .send_and_wait_for(
                TestAction::ProduceEffect,
                |a| matches!(a, TestAction::Increment),
                Duration::from_secs(1),
            )
            .await;

        assert!(matches!(result, Ok(TestAction::Increment)));
        // Broadcast happens after the reducer ran
        assert_eq!(store.state(|s| s.value).await, 1);
    }

    #[tokio::test]
    async fn sequential_effects_run_in_order() {
        let store = store();
        let Ok(mut handle) = store.send(TestAction::ProduceSequentialEffects).await else {
            unreachable!("store is running");
        };
        assert!(handle.wait_with_timeout(Duration::from_secs(1)).await.is_ok());
        assert_eq!(store.state(|s| s.value).await, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn delayed_action_fires_after_duration() {
        let store = store();
        let _ = store.send(TestAction::ScheduleTick).await;

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert_eq!(store.state(|s| s.value).await, 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(store.state(|s| s.value).await, 100);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_aborts_pending_delay() {
        let store = store();
        let _ = store.send(TestAction::ScheduleTick).await;
        let _ = store.send(TestAction::CancelTick).await;

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(store.state(|s| s.value).await, 0);
        assert_eq!(store.pending_effects(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn aborted_effect_releases_its_handle() {
        let store = store();
        let Ok(mut handle) = store.send(TestAction::ScheduleTick).await else {
            unreachable!("store is running");
        };
        assert_eq!(handle.pending(), 1);

        assert_eq!(store.cancel(&TICK), 1);
        assert!(handle.wait_with_timeout(Duration::from_secs(1)).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_cancels_scheduled_effects_and_rejects_actions() {
        let store = store();
        let _ = store.send(TestAction::ScheduleTick).await;

        assert!(store.shutdown(Duration::from_secs(1)).await.is_ok());
        assert!(matches!(
            store.send(TestAction::Increment).await,
            Err(StoreError::ShutdownInProgress)
        ));

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(store.state(|s| s.value).await, 0);
    }

    #[tokio::test]
    async fn send_and_wait_for_times_out_without_match() {
        let store = store();
        let result = store
            .send_and_wait_for(
                TestAction::Increment,
                |a| matches!(a, TestAction::Ticked),
                Duration::from_millis(20),
            )
            .await;
        assert!(matches!(result, Err(StoreError::Timeout)));
    }

    #[test]
    fn completed_handle_has_nothing_pending() {
        assert_eq!(EffectHandle::completed().pending(), 0);
    }
}
