//! Integration tests for Store action broadcasting
//!
//! Observers see every action an effect produces, in the order the effects
//! settle. Screens rely on this to wait for the terminal action of a query.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use salon_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use salon_runtime::{Store, StoreError};
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum LookupAction {
    /// Look a record up; odd ids are missing
    Lookup { id: u64 },
    /// Lookup in flight
    Submitting { id: u64 },
    /// Terminal: record found
    Found { id: u64 },
    /// Terminal: record missing
    Missing { id: u64 },
    /// Count something, echoing the new value
    Tick,
    /// Echo of a tick
    Ticked { value: u32 },
}

#[derive(Debug, Clone, Default)]
struct LookupState {
    in_flight: Vec<u64>,
    found: Vec<u64>,
    ticks: u32,
}

#[derive(Clone)]
struct LookupEnvironment {
    latency: Duration,
}

#[derive(Clone)]
struct LookupReducer;

impl Reducer for LookupReducer {
    type State = LookupState;
    type Action = LookupAction;
    type Environment = LookupEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            LookupAction::Lookup { id } => {
                let latency = env.latency;
                smallvec![Effect::chain(vec![
                    Effect::dispatch(LookupAction::Submitting { id }),
                    Effect::Future(Box::pin(async move {
                        tokio::time::sleep(latency).await;
                        if id % 2 == 0 {
                            Some(LookupAction::Found { id })
                        } else {
                            Some(LookupAction::Missing { id })
                        }
                    })),
                ])]
            },
            LookupAction::Submitting { id } => {
                state.in_flight.push(id);
                smallvec![Effect::None]
            },
            LookupAction::Found { id } => {
                state.in_flight.retain(|pending| *pending != id);
                state.found.push(id);
                smallvec![Effect::None]
            },
            LookupAction::Missing { id } => {
                state.in_flight.retain(|pending| *pending != id);
                smallvec![Effect::None]
            },
            LookupAction::Tick => {
                state.ticks += 1;
                let value = state.ticks;
                smallvec![Effect::dispatch(LookupAction::Ticked { value })]
            },
            LookupAction::Ticked { .. } => smallvec![Effect::None],
        }
    }
}

fn lookup_store() -> Store<LookupState, LookupAction, LookupEnvironment, LookupReducer> {
    Store::new(
        LookupState::default(),
        LookupReducer,
        LookupEnvironment {
            latency: Duration::from_millis(10),
        },
    )
}

const fn is_terminal(action: &LookupAction) -> bool {
    matches!(action, LookupAction::Found { .. } | LookupAction::Missing { .. })
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_send_and_wait_for_terminal_action() {
    let store = lookup_store();

    let result = store
        .send_and_wait_for(LookupAction::Lookup { id: 4 }, is_terminal, Duration::from_secs(1))
        .await
        .unwrap();

    assert_eq!(result, LookupAction::Found { id: 4 });
    assert_eq!(store.state(|s| s.found.clone()).await, vec![4]);
    assert!(store.state(|s| s.in_flight.is_empty()).await);
}

#[tokio::test]
async fn test_submitting_is_broadcast_before_terminal() {
    let store = lookup_store();
    let mut rx = store.subscribe_actions();

    let mut handle = store.send(LookupAction::Lookup { id: 7 }).await.unwrap();
    handle.wait_with_timeout(Duration::from_secs(1)).await.unwrap();

    let first = rx.recv().await.unwrap();
    let second = rx.recv().await.unwrap();
    assert_eq!(first, LookupAction::Submitting { id: 7 });
    assert_eq!(second, LookupAction::Missing { id: 7 });
}

#[tokio::test]
async fn test_send_and_wait_for_timeout() {
    let store = Store::new(
        LookupState::default(),
        LookupReducer,
        LookupEnvironment {
            latency: Duration::from_secs(5),
        },
    );

    let result = store
        .send_and_wait_for(LookupAction::Lookup { id: 2 }, is_terminal, Duration::from_millis(50))
        .await;

    assert!(matches!(result, Err(StoreError::Timeout)));
    // The lookup is still in flight: nothing times it out
    assert_eq!(store.state(|s| s.in_flight.clone()).await, vec![2]);
}

#[tokio::test]
async fn test_correlation_by_id() {
    let store = Arc::new(lookup_store());

    let mut handles = Vec::new();
    for id in 1..=4 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store
                .send_and_wait_for(
                    LookupAction::Lookup { id },
                    move |action| {
                        matches!(action,
                            LookupAction::Found { id: found } | LookupAction::Missing { id: found }
                            if *found == id)
                    },
                    Duration::from_secs(2),
                )
                .await
        }));
    }

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.expect("Task panicked").unwrap());
    }

    assert_eq!(
        results,
        vec![
            LookupAction::Missing { id: 1 },
            LookupAction::Found { id: 2 },
            LookupAction::Missing { id: 3 },
            LookupAction::Found { id: 4 },
        ]
    );
}

#[tokio::test]
async fn test_multiple_independent_subscribers() {
    let store = lookup_store();

    let mut rx1 = store.subscribe_actions();
    let mut rx2 = store.subscribe_actions();

    let mut first = store.send(LookupAction::Tick).await.unwrap();
    let mut second = store.send(LookupAction::Tick).await.unwrap();
    first.wait().await;
    second.wait().await;

    for rx in [&mut rx1, &mut rx2] {
        let mut values = Vec::new();
        while let Ok(LookupAction::Ticked { value }) = rx.try_recv() {
            values.push(value);
        }
        values.sort_unstable();
        assert_eq!(values, vec![1, 2]);
    }
}

#[tokio::test]
async fn test_lagging_subscriber_does_not_block_store() {
    let store = Store::with_broadcast_capacity(
        LookupState::default(),
        LookupReducer,
        LookupEnvironment {
            latency: Duration::from_millis(1),
        },
        4,
    );

    let mut rx = store.subscribe_actions();

    for _ in 0..20 {
        let mut handle = store.send(LookupAction::Tick).await.unwrap();
        handle.wait().await;
    }

    assert_eq!(store.state(|s| s.ticks).await, 20);

    let mut lagged = false;
    let mut received = 0;
    loop {
        match rx.try_recv() {
            Ok(_) => received += 1,
            Err(tokio::sync::broadcast::error::TryRecvError::Lagged(_)) => lagged = true,
            Err(_) => break,
        }
    }

    assert!(lagged, "Expected subscriber to lag");
    assert_eq!(received, 4);
}
