//! # Salon Client
//!
//! HTTP transports and the query environment for the salon scheduling
//! backend.
//!
//! ## Example
//!
//! ```no_run
//! use salon_client::{ClientConfig, HttpTransport, QueryEnvironment};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), salon_client::ClientError> {
//! let transport = Arc::new(HttpTransport::new(&ClientConfig::default())?);
//! let environment = QueryEnvironment::with_transport(transport);
//! assert!(environment.store().is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - Query endpoint POST with `{query, variables}` bodies
//! - REST GET for JSON documents
//! - Failure classification into [`QueryError`](salon_core::error::QueryError)
//! - Record bookkeeping of every query result
//! - Lazily constructed shared environment

pub mod environment;
pub mod error;
pub mod transport;

// Re-export main types for convenience
pub use environment::{Network, QueryEnvironment, RecordSource, RecordStore, SharedEnvironment};
pub use error::ClientError;
pub use transport::{ClientConfig, HttpTransport, QueryTransport};
