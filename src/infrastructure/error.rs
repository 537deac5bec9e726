//! Document store errors

use thiserror::Error;

/// A failed database operation, labelled with what was attempted.
///
/// The operation label carries the collection name where one applies,
/// e.g. `find orders` or `cursor orders`.
#[derive(Error, Debug)]
#[error("{operation}: {source}")]
pub struct StoreError {
    pub operation: String,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

impl StoreError {
    pub fn new(
        operation: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            operation: operation.into(),
            source: source.into(),
        }
    }
}

/// Result type for document store operations.
pub type StoreResult<T> = Result<T, StoreError>;
