//! # Salon Testing
//!
//! Testing utilities and helpers for the salon client.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A Given-When-Then harness for reducers
//! - Assertion helpers for effects, and a driver that collects the actions
//!   a request chain produces
//!
//! ## Example
//!
//! ```ignore
//! use salon_testing::{MockQueryClient, test_clock};
//! use salon_runtime::Store;
//!
//! #[tokio::test]
//! async fn loads_history() {
//!     let queries = MockQueryClient::resolving(json!({ "customer": { "id": 1 } }));
//!     let env = CustomerHistoryEnvironment::new(Arc::new(queries.clone()));
//!     let store = Store::new(CustomerHistoryState::default(), CustomerHistoryReducer::new(), env);
//!
//!     store.send(CustomerHistoryAction::request(1)).await?;
//!     assert_eq!(queries.calls().len(), 1);
//! }
//! ```

use chrono::{DateTime, Utc};
use salon_core::environment::Clock;

mod query_mocks;
mod reducer_test;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    pub use crate::query_mocks::{MockQueryClient, MockRestClient, RecordedQuery};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use salon_testing::mocks::FixedClock;
    /// use salon_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2019-02-16 12:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2019-02-16T12:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, MockQueryClient, MockRestClient, RecordedQuery, test_clock};
pub use reducer_test::{ReducerTest, assertions, collect_actions};
