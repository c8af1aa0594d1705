//! Scripted query and REST clients
//!
//! Both mocks answer from a queue of scripted responses first, then fall back
//! to their default response. Every call is recorded so tests can assert on
//! what was asked for.

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Only panics on a poisoned mutex

use futures::future::BoxFuture;
use salon_core::environment::{QueryClient, QuerySpec, RestClient};
use salon_core::error::QueryError;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Response = Result<Value, QueryError>;

#[derive(Debug)]
struct Script {
    queued: VecDeque<(Duration, Response)>,
    fallback: Response,
}

impl Script {
    fn new(fallback: Response) -> Self {
        Self {
            queued: VecDeque::new(),
            fallback,
        }
    }

    fn next(&mut self) -> (Duration, Response) {
        self.queued
            .pop_front()
            .unwrap_or_else(|| (Duration::ZERO, self.fallback.clone()))
    }
}

fn respond(delay: Duration, response: Response) -> BoxFuture<'static, Response> {
    Box::pin(async move {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        response
    })
}

/// A query the [`MockQueryClient`] was asked to run
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedQuery {
    /// Name of the query descriptor
    pub name: &'static str,
    /// Variables passed along with it
    pub variables: Value,
}

/// Scripted [`QueryClient`]
///
/// # Example
///
/// ```
/// use salon_testing::MockQueryClient;
/// use serde_json::json;
///
/// let queries = MockQueryClient::resolving(json!({ "customer": null }));
/// assert!(queries.calls().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct MockQueryClient {
    script: Arc<Mutex<Script>>,
    calls: Arc<Mutex<Vec<RecordedQuery>>>,
}

impl MockQueryClient {
    /// Every query resolves with `data`
    #[must_use]
    pub fn resolving(data: Value) -> Self {
        Self::with_fallback(Ok(data))
    }

    /// Every query rejects with `error`
    #[must_use]
    pub fn rejecting(error: QueryError) -> Self {
        Self::with_fallback(Err(error))
    }

    fn with_fallback(fallback: Response) -> Self {
        Self {
            script: Arc::new(Mutex::new(Script::new(fallback))),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a response for the next unanswered call, settling after `delay`
    #[must_use]
    pub fn then_respond_after(self, delay: Duration, response: Result<Value, QueryError>) -> Self {
        self.script.lock().unwrap().queued.push_back((delay, response));
        self
    }

    /// Queries received so far, in call order
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedQuery> {
        self.calls.lock().unwrap().clone()
    }
}

impl QueryClient for MockQueryClient {
    fn fetch_query(&self, query: &'static QuerySpec, variables: Value) -> BoxFuture<'static, Response> {
        self.calls.lock().unwrap().push(RecordedQuery {
            name: query.name,
            variables,
        });
        let (delay, response) = self.script.lock().unwrap().next();
        respond(delay, response)
    }
}

/// Scripted [`RestClient`]
#[derive(Debug, Clone)]
pub struct MockRestClient {
    script: Arc<Mutex<Script>>,
    paths: Arc<Mutex<Vec<String>>>,
}

impl MockRestClient {
    /// Every request resolves with `body`
    #[must_use]
    pub fn resolving(body: Value) -> Self {
        Self::with_fallback(Ok(body))
    }

    /// Every request rejects with `error`
    #[must_use]
    pub fn rejecting(error: QueryError) -> Self {
        Self::with_fallback(Err(error))
    }

    fn with_fallback(fallback: Response) -> Self {
        Self {
            script: Arc::new(Mutex::new(Script::new(fallback))),
            paths: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Paths requested so far, in call order
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

impl RestClient for MockRestClient {
    fn get_json(&self, path: String) -> BoxFuture<'static, Response> {
        self.paths.lock().unwrap().push(path);
        let (delay, response) = self.script.lock().unwrap().next();
        respond(delay, response)
    }
}
