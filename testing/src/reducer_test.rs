//! Ergonomic testing utilities for reducers
//!
//! A fluent API for testing reducers with readable Given-When-Then syntax.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use dsss_core::{Effect, Reducer};

/// Type alias for state assertion functions
type StateAssertion<S> = Box<dyn FnOnce(&S)>;

/// Type alias for effect assertion functions
type EffectAssertion<A> = Box<dyn FnOnce(&[Effect<A>])>;

/// Fluent API for testing reducers with Given-When-Then syntax
///
/// Several actions may be queued with repeated `when_action` calls; they are
/// reduced in order and the effect assertions see the effects of the last one.
///
/// # Example
///
/// ```ignore
/// use dsss_testing::ReducerTest;
///
/// ReducerTest::new(CounterReducer)
///     .with_env(())
///     .given_state(CounterState { count: 0 })
///     .when_action(CounterAction::Increment)
///     .then_state(|state| assert_eq!(state.count, 1))
///     .then_effects(|effects| assert_eq!(effects.len(), 1))
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    environment: Option<E>,
    initial_state: Option<S>,
    actions: Vec<A>,
    state_assertions: Vec<StateAssertion<S>>,
    effect_assertions: Vec<EffectAssertion<A>>,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    /// Create a new reducer test with the given reducer
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            actions: Vec::new(),
            state_assertions: Vec::new(),
            effect_assertions: Vec::new(),
        }
    }

    /// Set the environment for the test
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// Set the initial state (Given)
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Queue an action to reduce (When)
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.actions.push(action);
        self
    }

    /// Add an assertion about the resulting state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the effects of the last action (Then)
    #[must_use]
    pub fn then_effects<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&[Effect<A>]) + 'static,
    {
        self.effect_assertions.push(Box::new(assertion));
        self
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if initial state, action, or environment is not set,
    /// or if any assertions fail.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let mut state = self
            .initial_state
            .expect("Initial state must be set with given_state()");

        let env = self
            .environment
            .expect("Environment must be set with with_env()");

        assert!(
            !self.actions.is_empty(),
            "At least one action must be set with when_action()"
        );

        let mut effects = Vec::new();
        for action in self.actions {
            effects = self.reducer.reduce(&mut state, action, &env).into_vec();
        }

        for assertion in self.state_assertions {
            assertion(&state);
        }

        for assertion in self.effect_assertions {
            assertion(&effects);
        }
    }
}

/// Helper assertions for effects
///
/// Searches descend into `Parallel`, `Sequential` and `Cancellable` wrappers.
pub mod assertions {
    use dsss_core::{Effect, EffectId};

    fn any_effect<A>(effects: &[Effect<A>], pred: &dyn Fn(&Effect<A>) -> bool) -> bool {
        effects.iter().any(|effect| {
            pred(effect)
                || match effect {
                    Effect::Parallel(inner) | Effect::Sequential(inner) => any_effect(inner, pred),
                    Effect::Cancellable { effect, .. } => {
                        any_effect(std::slice::from_ref(&**effect), pred)
                    },
                    _ => false,
                }
        })
    }

    /// Assert that there are no effects
    ///
    /// # Panics
    ///
    /// Panics if any effect other than `Effect::None` is present.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().all(Effect::is_none),
            "Expected no effects, but found {}: {:?}",
            effects.len(),
            effects
        );
    }

    /// Assert the number of effects
    ///
    /// # Panics
    ///
    /// Panics if the number of effects doesn't match expected.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(
            effects.len(),
            expected,
            "Expected {} effects, but found {}",
            expected,
            effects.len()
        );
    }

    /// Assert that effects contain at least one Future effect
    ///
    /// # Panics
    ///
    /// Panics if no Future effect is found.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_has_future_effect<A>(effects: &[Effect<A>]) {
        assert!(
            any_effect(effects, &|e: &Effect<A>| matches!(e, Effect::Future(_))),
            "Expected at least one Future effect, but none found"
        );
    }

    /// Assert that effects schedule `expected` after a delay of `duration`
    ///
    /// # Panics
    ///
    /// Panics if no matching Delay effect is found.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_has_delay_effect<A: PartialEq + std::fmt::Debug>(
        effects: &[Effect<A>],
        duration: std::time::Duration,
        expected: &A,
    ) {
        assert!(
            any_effect(effects, &|e: &Effect<A>| matches!(
                e,
                Effect::Delay { duration: d, action } if *d == duration && **action == *expected
            )),
            "Expected Delay({duration:?}, {expected:?}), found {effects:?}"
        );
    }

    /// Assert that some effect is registered as cancellable under `id`
    ///
    /// # Panics
    ///
    /// Panics if no Cancellable effect with that id is found.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_has_cancellable_effect<A: std::fmt::Debug>(effects: &[Effect<A>], id: &EffectId) {
        assert!(
            any_effect(effects, &|e: &Effect<A>| matches!(e, Effect::Cancellable { id: got, .. } if got == id)),
            "Expected a Cancellable effect registered as {id}, found {effects:?}"
        );
    }

    /// Assert that effects cancel `id`
    ///
    /// # Panics
    ///
    /// Panics if no Cancel effect for that id is found.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_has_cancel_effect<A: std::fmt::Debug>(effects: &[Effect<A>], id: &EffectId) {
        assert!(
            any_effect(effects, &|e: &Effect<A>| matches!(e, Effect::Cancel(got) if got == id)),
            "Expected Effect::Cancel({id}), found {effects:?}"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsss_core::{smallvec, EffectId, SmallVec};
    use std::time::Duration;

    const TIMER: EffectId = EffectId::from_static("timer");

    #[derive(Clone, Debug)]
    struct TestState {
        count: i32,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Increment,
        Decrement,
        Schedule,
        Stop,
    }

    struct TestReducer;

    impl Reducer for TestReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                TestAction::Increment => {
                    state.count += 1;
                    smallvec![Effect::None]
                },
                TestAction::Decrement => {
                    state.count -= 1;
                    smallvec![Effect::None]
                },
                TestAction::Schedule => smallvec![Effect::merge(vec![
                    Effect::Delay {
                        duration: Duration::from_secs(3),
                        action: Box::new(TestAction::Increment),
                    }
                    .cancellable(TIMER)
                ])],
                TestAction::Stop => smallvec![Effect::Cancel(TIMER)],
            }
        }
    }

    #[test]
    fn test_reducer_test_increment() {
        ReducerTest::new(TestReducer)
            .with_env(())
            .given_state(TestState { count: 0 })
            .when_action(TestAction::Increment)
            .then_state(|state| assert_eq!(state.count, 1))
            .then_effects(|effects| assertions::assert_no_effects(effects))
            .run();
    }

    #[test]
    fn test_reducer_test_action_sequence() {
        ReducerTest::new(TestReducer)
            .with_env(())
            .given_state(TestState { count: 5 })
            .when_action(TestAction::Decrement)
            .when_action(TestAction::Decrement)
            .then_state(|state| assert_eq!(state.count, 3))
            .run();
    }

    #[test]
    fn test_nested_delay_is_found() {
        ReducerTest::new(TestReducer)
            .with_env(())
            .given_state(TestState { count: 0 })
            .when_action(TestAction::Schedule)
            .then_effects(|effects| {
                assertions::assert_has_cancellable_effect(effects, &TIMER);
                assertions::assert_has_delay_effect(
                    effects,
                    Duration::from_secs(3),
                    &TestAction::Increment,
                );
            })
            .run();
    }

    #[test]
    fn test_cancel_is_found() {
        ReducerTest::new(TestReducer)
            .with_env(())
            .given_state(TestState { count: 0 })
            .when_action(TestAction::Stop)
            .then_effects(|effects| assertions::assert_has_cancel_effect(effects, &TIMER))
            .run();
    }

    #[test]
    #[should_panic(expected = "Expected no effects")]
    fn test_assert_no_effects_rejects_delay() {
        let effects = [Effect::Delay {
            duration: Duration::from_secs(1),
            action: Box::new(TestAction::Increment),
        }];
        assertions::assert_no_effects(&effects);
    }

    #[test]
    fn test_assertions_no_effects() {
        assertions::assert_no_effects::<TestAction>(&[Effect::None]);
        assertions::assert_no_effects::<TestAction>(&[]);
    }

    #[test]
    fn test_assertions_effects_count() {
        assertions::assert_effects_count(&[Effect::<TestAction>::None], 1);
        assertions::assert_effects_count::<TestAction>(&[], 0);
    }
}
