//! # Salon Core
//!
//! Core traits and types for the salon scheduling client.
//!
//! The client is built as a functional core with an imperative shell:
//!
//! - **State**: the data a screen renders from
//! - **Action**: every input a reducer accepts (requests, status transitions, results)
//! - **Reducer**: pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: description of a side effect, executed later by the runtime
//! - **Environment**: injected dependencies (clock, query client, REST client)
//!
//! ## Example
//!
//! ```ignore
//! use salon_core::*;
//!
//! #[derive(Clone, Debug, Default)]
//! struct CounterState {
//!     count: i64,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//! }
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
//!         state.count += 1;
//!         smallvec![Effect::None]
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};

/// Reducer module - the core trait for client logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
/// They hold every state transition of a feature and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for client logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for HistoryReducer {
    ///     type State = HistoryState;
    ///     type Action = HistoryAction;
    ///     type Environment = HistoryEnvironment;
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut HistoryState,
    ///         action: HistoryAction,
    ///         env: &HistoryEnvironment,
    ///     ) -> SmallVec<[Effect<HistoryAction>; 4]> {
    ///         match action {
    ///             HistoryAction::Failed => {
    ///                 state.failed = true;
    ///                 smallvec![Effect::None]
    ///             }
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Updates state in place
        /// 2. Returns effect descriptions to be executed
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// Effects to be executed by the runtime
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values, not execution.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects one after another, each one settling (including the
        /// reduction of any action it produced) before the next starts
        Sequential(Vec<Effect<Action>>),

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }

        /// Feed an action straight back into the store
        #[must_use]
        pub fn dispatch(action: Action) -> Effect<Action>
        where
            Action: Send + 'static,
        {
            Effect::Future(Box::pin(async move { Some(action) }))
        }
    }
}

/// Error module - failures surfaced by environment dependencies
pub mod error {
    use thiserror::Error;

    /// Classified failure of a remote query
    ///
    /// Every variant is terminal: nothing in the client retries.
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum QueryError {
        /// The server answered with a non-2xx status.
        ///
        /// Displays as the bare status code (`"500"`).
        #[error("{status}")]
        Transport {
            /// HTTP status code
            status: u16,
        },

        /// The request could not be sent or the response never completed
        #[error("Network error: {0}")]
        Network(String),

        /// The response body was not the expected JSON
        #[error("Decode error: {0}")]
        Decode(String),

        /// The query endpoint answered 2xx but reported query errors
        #[error("Query errors: {}", .0.join("; "))]
        GraphQl(Vec<String>),
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use super::error::QueryError;
    use chrono::{DateTime, Utc};
    use futures::future::BoxFuture;
    use serde_json::Value;

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Test - fixed time for deterministic tests
    /// struct FixedClock { time: DateTime<Utc> }
    /// impl Clock for FixedClock {
    ///     fn now(&self) -> DateTime<Utc> {
    ///         self.time
    ///     }
    /// }
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Fixed descriptor of a query sent to the query endpoint
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct QuerySpec {
        /// Operation name, used for logging
        pub name: &'static str,
        /// Full query text sent on the wire
        pub text: &'static str,
    }

    /// Query client - runs a query and resolves with its `data` payload
    pub trait QueryClient: Send + Sync {
        /// Run `query` with `variables`
        ///
        /// The returned future owns everything it needs so it can be moved
        /// into an [`Effect::Future`](crate::effect::Effect::Future).
        fn fetch_query(
            &self,
            query: &'static QuerySpec,
            variables: Value,
        ) -> BoxFuture<'static, Result<Value, QueryError>>;
    }

    /// REST client - fetches a JSON document by path
    pub trait RestClient: Send + Sync {
        /// GET `path` (relative to the configured origin) and parse the body as JSON
        fn get_json(&self, path: String) -> BoxFuture<'static, Result<Value, QueryError>>;
    }
}
