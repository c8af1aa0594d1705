//! Error types for the salon client

use salon_core::error::QueryError;
use thiserror::Error;

/// A response payload that does not have the expected shape
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// `customer` is absent or null
    #[error("response carries no customer")]
    MissingCustomer,

    /// A list was expected
    #[error("{field} is not a list")]
    NotAList {
        /// Which field
        field: &'static str,
    },

    /// An appointment has no `startsAt`
    #[error("appointment {index} has no startsAt")]
    MissingStartsAt {
        /// Position in the list
        index: usize,
    },

    /// `startsAt` is neither a number nor a numeric string
    #[error("appointment {index} has a non-numeric startsAt: {value}")]
    InvalidStartsAt {
        /// Position in the list
        index: usize,
        /// The offending value, as JSON
        value: String,
    },

    /// A record could not be decoded into its domain type
    #[error("malformed record: {0}")]
    Malformed(String),
}

/// Why a slice's remote load ended in the failed state
///
/// Only logged; state records nothing beyond the failure itself.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The query or request itself failed
    #[error(transparent)]
    Query(#[from] QueryError),

    /// The response arrived but could not be normalized
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

/// Failure to open a screen
#[derive(Error, Debug)]
pub enum AppError {
    /// The screen's store rejected an action or did not settle in time
    #[error("Store error: {0}")]
    Store(#[from] salon_runtime::StoreError),
}
