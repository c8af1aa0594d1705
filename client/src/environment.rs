//! Query environment
//!
//! A [`QueryEnvironment`] bundles the [`Network`] that talks to the query
//! endpoint with a [`RecordStore`] that keeps bookkeeping of every record a
//! query returned. The record store is never used to answer a query.
//!
//! Construct one explicitly and inject it, or let a [`SharedEnvironment`]
//! build it lazily the first time it is needed.

use crate::transport::QueryTransport;
use futures::future::BoxFuture;
use salon_core::environment::{QueryClient, QuerySpec};
use salon_core::error::QueryError;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// Network layer of the query environment
#[derive(Clone)]
pub struct Network {
    transport: Arc<dyn QueryTransport>,
}

impl Network {
    /// Bind a network to a transport
    #[must_use]
    pub fn create(transport: Arc<dyn QueryTransport>) -> Self {
        Self { transport }
    }

    /// Run one query through the transport
    #[must_use]
    pub fn execute(
        &self,
        query: &'static QuerySpec,
        variables: Value,
    ) -> BoxFuture<'static, Result<Value, QueryError>> {
        self.transport.perform_fetch(query, variables)
    }
}

impl std::fmt::Debug for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Network").finish_non_exhaustive()
    }
}

/// In-memory records keyed by id
#[derive(Debug, Default)]
pub struct RecordSource {
    records: RwLock<HashMap<String, Value>>,
}

impl RecordSource {
    /// Create an empty record source
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Record bookkeeping for the query environment
#[derive(Debug)]
pub struct RecordStore {
    source: RecordSource,
}

impl RecordStore {
    /// Create a store over `source`
    #[must_use]
    pub const fn new(source: RecordSource) -> Self {
        Self { source }
    }

    /// Record every object with an `id` found in `data`
    ///
    /// Later records with the same id replace earlier ones. Returns the
    /// number of records written.
    pub fn publish(&self, data: &Value) -> usize {
        let mut found = Vec::new();
        collect_records(data, &mut found);

        let count = found.len();
        let mut records = self
            .source
            .records
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        for (id, record) in found {
            records.insert(id, record);
        }
        count
    }

    /// Look a record up by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Value> {
        self.source
            .records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Number of distinct records held
    #[must_use]
    pub fn len(&self) -> usize {
        self.source
            .records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no record has been published yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn collect_records(value: &Value, found: &mut Vec<(String, Value)>) {
    match value {
        Value::Object(fields) => {
            let id = match fields.get("id") {
                Some(Value::String(id)) => Some(id.clone()),
                Some(Value::Number(id)) => Some(id.to_string()),
                _ => None,
            };
            if let Some(id) = id {
                found.push((id, value.clone()));
            }
            for field in fields.values() {
                collect_records(field, found);
            }
        },
        Value::Array(items) => {
            for item in items {
                collect_records(item, found);
            }
        },
        _ => {},
    }
}

/// Pull `data` out of a query response
///
/// A non-empty `errors` array rejects the whole response.
fn extract_data(mut body: Value) -> Result<Value, QueryError> {
    if let Some(errors) = body
        .get("errors")
        .and_then(Value::as_array)
        .filter(|errors| !errors.is_empty())
    {
        let messages = errors
            .iter()
            .map(|error| {
                error
                    .get("message")
                    .and_then(Value::as_str)
                    .map_or_else(|| error.to_string(), str::to_string)
            })
            .collect();
        return Err(QueryError::GraphQl(messages));
    }

    match body.get_mut("data").map(Value::take) {
        None | Some(Value::Null) => Err(QueryError::Decode("response carries no data".to_string())),
        Some(data) => Ok(data),
    }
}

/// Network plus record store; the query client used by every slice
#[derive(Debug, Clone)]
pub struct QueryEnvironment {
    network: Network,
    store: Arc<RecordStore>,
}

impl QueryEnvironment {
    /// Compose an environment from its parts
    #[must_use]
    pub fn new(network: Network, store: RecordStore) -> Self {
        Self {
            network,
            store: Arc::new(store),
        }
    }

    /// Environment over `transport` with an empty record store
    #[must_use]
    pub fn with_transport(transport: Arc<dyn QueryTransport>) -> Self {
        Self::new(Network::create(transport), RecordStore::new(RecordSource::new()))
    }

    /// The network layer
    #[must_use]
    pub const fn network(&self) -> &Network {
        &self.network
    }

    /// The record bookkeeping
    #[must_use]
    pub fn store(&self) -> &RecordStore {
        &self.store
    }
}

impl QueryClient for QueryEnvironment {
    fn fetch_query(
        &self,
        query: &'static QuerySpec,
        variables: Value,
    ) -> BoxFuture<'static, Result<Value, QueryError>> {
        let request = self.network.execute(query, variables);
        let store = Arc::clone(&self.store);

        Box::pin(async move {
            let data = extract_data(request.await?)?;
            let published = store.publish(&data);
            tracing::trace!(query = query.name, published, "Records published");
            Ok(data)
        })
    }
}

type EnvironmentFactory = Box<dyn Fn() -> QueryEnvironment + Send + Sync>;

/// Lazily constructed, process-wide query environment
///
/// The factory runs on the first [`SharedEnvironment::get`] and never
/// again; every caller receives the same instance. There is no way to
/// invalidate it.
///
/// # Example
///
/// ```ignore
/// let shared = SharedEnvironment::new(move || QueryEnvironment::with_transport(transport.clone()));
/// assert!(Arc::ptr_eq(&shared.get(), &shared.get()));
/// ```
pub struct SharedEnvironment {
    factory: EnvironmentFactory,
    cell: OnceLock<Arc<QueryEnvironment>>,
}

impl SharedEnvironment {
    /// Wrap a factory; nothing is constructed yet
    #[must_use]
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> QueryEnvironment + Send + Sync + 'static,
    {
        Self {
            factory: Box::new(factory),
            cell: OnceLock::new(),
        }
    }

    /// The environment, constructing it on first access
    #[must_use]
    pub fn get(&self) -> Arc<QueryEnvironment> {
        Arc::clone(self.cell.get_or_init(|| {
            tracing::debug!("Constructing query environment");
            Arc::new((self.factory)())
        }))
    }

    /// Whether the environment has been constructed
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl std::fmt::Debug for SharedEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedEnvironment")
            .field("initialized", &self.is_initialized())
            .finish_non_exhaustive()
    }
}

impl QueryClient for SharedEnvironment {
    fn fetch_query(
        &self,
        query: &'static QuerySpec,
        variables: Value,
    ) -> BoxFuture<'static, Result<Value, QueryError>> {
        self.get().fetch_query(query, variables)
    }
}
