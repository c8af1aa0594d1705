//! Given-When-Then harness for slice reducers
//!
//! A test gives a starting state, reduces one or more actions, then checks
//! the resulting state and the effects of the last action. Effects can be
//! driven to completion with [`collect_actions`] to check the order in which
//! a slice reports its request lifecycle.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use salon_core::{effect::Effect, reducer::Reducer};
use std::fmt::Debug;

type StateAssertion<S> = Box<dyn FnOnce(&S)>;

type EffectAssertion<A> = Box<dyn FnOnce(&[Effect<A>])>;

/// Fluent harness for a single reducer
///
/// # Example
///
/// ```ignore
/// use salon_testing::{ReducerTest, assertions};
///
/// ReducerTest::new(CustomerHistoryReducer::new())
///     .with_env(test_environment())
///     .given_state(CustomerHistoryState::default())
///     .when_action(CustomerHistoryAction::request(123))
///     .then_state(|state| assert_eq!(state.status, RequestStatus::Submitting))
///     .then_effects(|effects| assertions::assert_chain_len(effects, 2))
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
    /// Harness over `reducer`
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

    /// Environment handed to every reduction
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// Starting state (Given)
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Reduce `action` after any actions already queued (When)
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.actions.push(action);
        self
    }

    /// Reduce `actions` in order, e.g. a request followed by a late status
    #[must_use]
    pub fn when_actions(mut self, actions: impl IntoIterator<Item = A>) -> Self {
        self.actions.extend(actions);
        self
    }

    /// Check the state after the last action (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Check the effects returned by the last action (Then)
    #[must_use]
    pub fn then_effects<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&[Effect<A>]) + 'static,
    {
        self.effect_assertions.push(Box::new(assertion));
        self
    }

    /// Reduce every action and run the assertions
    ///
    /// # Panics
    ///
    /// Panics if the state, an action or the environment is missing, or if
    /// an assertion fails.
    pub fn run(self) {
        let _ = self.reduce();
    }

    /// Like [`run`](Self::run), but hands back the last action's effects
    ///
    /// # Panics
    ///
    /// Panics if the state, an action or the environment is missing, or if
    /// an assertion fails.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn reduce(self) -> Vec<Effect<A>> {
        let mut state = self
            .initial_state
            .expect("Initial state must be set with given_state()");
        let env = self
            .environment
            .expect("Environment must be set with with_env()");
        assert!(!self.actions.is_empty(), "Action must be set with when_action()");

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
        effects
    }
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
    S: Clone + PartialEq + Debug + 'static,
{
    /// Check that the actions left the given state exactly as it was
    ///
    /// Must follow [`given_state`](Self::given_state).
    ///
    /// # Panics
    ///
    /// Panics if no state was given yet.
    #[must_use]
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn then_state_unchanged(self) -> Self {
        let before = self
            .initial_state
            .clone()
            .expect("then_state_unchanged() must follow given_state()");
        self.then_state(move |state| {
            assert_eq!(*state, before, "Expected the state to be left untouched");
        })
    }
}

/// Drive `effects` to completion and return the actions they produce
///
/// Sequential steps run in order and futures are awaited one at a time.
/// Produced actions are collected, not fed back into a reducer.
pub async fn collect_actions<A>(effects: Vec<Effect<A>>) -> Vec<A> {
    let mut pending = effects;
    pending.reverse();
    let mut produced = Vec::new();

    while let Some(effect) = pending.pop() {
        match effect {
            Effect::None => {},
            Effect::Sequential(steps) => pending.extend(steps.into_iter().rev()),
            Effect::Future(fut) => produced.extend(fut.await),
        }
    }
    produced
}

/// Helper assertions for effects
pub mod assertions {
    use salon_core::effect::Effect;

    /// Assert that there are no effects
    ///
    /// # Panics
    ///
    /// Panics if anything other than [`Effect::None`] was returned.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().all(|e| matches!(e, Effect::None)),
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

    /// Assert a single chain of `len` steps, as a request returns
    ///
    /// # Panics
    ///
    /// Panics unless `effects` is exactly one Sequential effect of `len` steps.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_chain_len<A: std::fmt::Debug>(effects: &[Effect<A>], len: usize) {
        match effects {
            [Effect::Sequential(steps)] if steps.len() == len => {},
            other => panic!("Expected one chain of {len} steps, but found {other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salon_core::reducer::Reducer;
    use salon_core::{SmallVec, smallvec};

    #[derive(Clone, Debug, Default, PartialEq)]
    struct LoadState {
        submitting: bool,
        latest: u64,
        value: Option<&'static str>,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum LoadAction {
        Request,
        Submitting { request: u64 },
        Loaded { request: u64, value: &'static str },
    }

    struct LoadReducer;

    impl Reducer for LoadReducer {
        type State = LoadState;
        type Action = LoadAction;
        type Environment = &'static str;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                LoadAction::Request => {
                    state.latest += 1;
                    state.submitting = true;
                    let request = state.latest;
                    let value = *env;
                    smallvec![Effect::chain(vec![
                        Effect::dispatch(LoadAction::Submitting { request }),
                        Effect::Future(Box::pin(async move { Some(LoadAction::Loaded { request, value }) })),
                    ])]
                },
                LoadAction::Submitting { request } | LoadAction::Loaded { request, .. }
                    if request != state.latest =>
                {
                    smallvec![Effect::None]
                },
                LoadAction::Submitting { .. } => {
                    state.submitting = true;
                    smallvec![Effect::None]
                },
                LoadAction::Loaded { value, .. } => {
                    state.submitting = false;
                    state.value = Some(value);
                    smallvec![Effect::None]
                },
            }
        }
    }

    #[test]
    fn request_returns_a_two_step_chain() {
        ReducerTest::new(LoadReducer)
            .with_env("loaded")
            .given_state(LoadState::default())
            .when_action(LoadAction::Request)
            .then_state(|state| {
                assert!(state.submitting);
                assert_eq!(state.latest, 1);
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_chain_len(effects, 2);
            })
            .run();
    }

    #[test]
    fn late_status_of_an_earlier_request_is_ignored() {
        ReducerTest::new(LoadReducer)
            .with_env("loaded")
            .given_state(LoadState::default())
            .when_actions([LoadAction::Request, LoadAction::Request])
            .when_action(LoadAction::Loaded { request: 1, value: "stale" })
            .then_state(|state| {
                assert!(state.submitting);
                assert_eq!(state.value, None);
            })
            .then_effects(|effects| assertions::assert_no_effects(effects))
            .run();
    }

    #[test]
    fn unchanged_state_passes_for_a_superseded_status() {
        ReducerTest::new(LoadReducer)
            .with_env("loaded")
            .given_state(LoadState {
                latest: 4,
                ..LoadState::default()
            })
            .when_action(LoadAction::Submitting { request: 3 })
            .then_state_unchanged()
            .run();
    }

    #[tokio::test]
    async fn collect_actions_follows_the_chain_order() {
        let effects = ReducerTest::new(LoadReducer)
            .with_env("loaded")
            .given_state(LoadState::default())
            .when_action(LoadAction::Request)
            .reduce();

        assert_eq!(
            collect_actions(effects).await,
            vec![
                LoadAction::Submitting { request: 1 },
                LoadAction::Loaded { request: 1, value: "loaded" },
            ]
        );
    }

    #[test]
    #[should_panic(expected = "Expected one chain")]
    fn chain_assertion_rejects_a_bare_future() {
        assertions::assert_chain_len(&[Effect::dispatch(LoadAction::Request)], 1);
    }
}
