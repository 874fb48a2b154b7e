//! # DSSS Core
//!
//! Reducer, effect and environment abstractions shared by the DSSS site crates.
//!
//! Features that own state (the registration form is the main one) are written
//! as a reducer: a pure function `(State, Action, Environment) → (State, Effects)`.
//! Reducers never perform I/O. They return [`Effect`] values that describe the
//! I/O, and the runtime store executes them and feeds any resulting action back.
//!
//! - **State**: domain state for a feature
//! - **Action**: every input the reducer reacts to (user intents and outcomes)
//! - **Reducer**: the business logic
//! - **Effect**: a description of a side effect, never its execution
//! - **Environment**: injected collaborators (sink, navigator, clock)
//!
//! ## Example
//!
//! ```
//! use dsss_core::{smallvec, Effect, Reducer, SmallVec};
//!
//! #[derive(Default)]
//! struct CounterState {
//!     count: i32,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CounterState,
//!         action: CounterAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<CounterAction>; 4]> {
//!         match action {
//!             CounterAction::Increment => state.count += 1,
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let mut state = CounterState::default();
//! let effects = CounterReducer.reduce(&mut state, CounterAction::Increment, &());
//! assert_eq!(state.count, 1);
//! assert_eq!(effects.len(), 1);
//! ```

pub use smallvec::{smallvec, SmallVec};

pub use effect::{Effect, EffectId};
pub use environment::{Clock, SystemClock};
pub use reducer::Reducer;

/// Reducer module - the core trait for business logic
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// Updates `state` in place and returns effect descriptions for the
        /// runtime to execute. Must not block or perform I/O.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - side effect descriptions
///
/// Effects are values. The store decides when and how they run, which keeps
/// reducers deterministic and lets tests inspect effects without executing them.
pub mod effect {
    use std::borrow::Cow;
    use std::fmt;
    use std::future::Future;
    use std::pin::Pin;
    use std::time::Duration;

    /// Identifier under which cancellable effects are registered.
    ///
    /// Several running effects may share one id; cancelling the id aborts all of them.
    #[derive(Clone, Debug, PartialEq, Eq, Hash)]
    pub struct EffectId(Cow<'static, str>);

    impl EffectId {
        /// Create an id from a static name (usable in `const` items)
        #[must_use]
        pub const fn from_static(name: &'static str) -> Self {
            Self(Cow::Borrowed(name))
        }

        /// Create an id from a runtime string
        #[must_use]
        pub fn new(name: impl Into<String>) -> Self {
            Self(Cow::Owned(name.into()))
        }

        /// The id as a string slice
        #[must_use]
        pub fn as_str(&self) -> &str {
            &self.0
        }
    }

    impl fmt::Display for EffectId {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(&self.0)
        }
    }

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed by the reducer. They are descriptions of what
    /// should happen, returned from reducers and executed by the store runtime.
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects in parallel
        Parallel(Vec<Effect<Action>>),

        /// Run effects sequentially
        Sequential(Vec<Effect<Action>>),

        /// Delayed action (timers, scheduled navigation)
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after the delay
            action: Box<Action>,
        },

        /// Arbitrary async computation
        ///
        /// If the future resolves to `Some(action)`, the action is fed back into the reducer.
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),

        /// Run `effect` registered under `id` so it can be cancelled later
        Cancellable {
            /// Registration id
            id: EffectId,
            /// Wrapped effect
            effect: Box<Effect<Action>>,
        },

        /// Abort every running effect registered under the id
        ///
        /// Cancelling an id with nothing registered is a no-op.
        Cancel(EffectId),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> fmt::Debug for Effect<Action>
    where
        Action: fmt::Debug,
    {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
                Effect::Cancellable { id, effect } => f
                    .debug_struct("Effect::Cancellable")
                    .field("id", id)
                    .field("effect", effect)
                    .finish(),
                Effect::Cancel(id) => f.debug_tuple("Effect::Cancel").field(id).finish(),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Combine effects to run in parallel
        #[must_use]
        pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Parallel(effects)
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }

        /// Register this effect under `id` so a later [`Effect::Cancel`] can abort it
        #[must_use]
        pub fn cancellable(self, id: EffectId) -> Effect<Action> {
            Effect::Cancellable {
                id,
                effect: Box::new(self),
            }
        }

        /// Fire-and-forget async work that never feeds an action back
        #[must_use]
        pub fn fire_and_forget<F>(work: F) -> Effect<Action>
        where
            F: Future<Output = ()> + Send + 'static,
            Action: 'static,
        {
            Effect::Future(Box::pin(async move {
                work.await;
                None
            }))
        }

        /// Returns `true` for [`Effect::None`]
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }
    }
}

/// Environment module - dependency injection traits
///
/// Every external dependency is abstracted behind a trait and injected via the
/// reducer's environment, so production and tests differ only in what is injected.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Wall clock used in production
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Clone, Debug, PartialEq)]
    enum Ping {
        Pong,
    }

    #[test]
    fn cancellable_wraps_effect_with_id() {
        let id = EffectId::from_static("timer");
        let effect: Effect<Ping> = Effect::Delay {
            duration: Duration::from_secs(1),
            action: Box::new(Ping::Pong),
        }
        .cancellable(id.clone());

        match effect {
            Effect::Cancellable { id: got, effect } => {
                assert_eq!(got, id);
                assert!(matches!(*effect, Effect::Delay { .. }));
            },
            other => unreachable!("unexpected effect: {other:?}"),
        }
    }

    #[test]
    fn effect_ids_compare_by_name() {
        assert_eq!(EffectId::from_static("a"), EffectId::new("a"));
        assert_ne!(EffectId::from_static("a"), EffectId::new("b"));
        assert_eq!(EffectId::new("redirect").to_string(), "redirect");
    }

    #[test]
    fn debug_output_names_variants() {
        let effect: Effect<Ping> = Effect::Cancel(EffectId::from_static("timer"));
        assert_eq!(format!("{effect:?}"), "Effect::Cancel(EffectId(\"timer\"))");

        let future: Effect<Ping> = Effect::fire_and_forget(async {});
        assert_eq!(format!("{future:?}"), "Effect::Future(<future>)");
    }

    #[tokio::test]
    async fn fire_and_forget_produces_no_action() {
        let effect: Effect<Ping> = Effect::fire_and_forget(async {});
        match effect {
            Effect::Future(fut) => assert_eq!(fut.await, None),
            other => unreachable!("unexpected effect: {other:?}"),
        }
    }

    #[test]
    fn system_clock_moves_forward() {
        let clock = SystemClock;
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }
}
