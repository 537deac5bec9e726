//! Application-level errors (wraps domain and store errors)

use std::path::Path;
use std::time::Duration;

use thiserror::Error;

use crate::domain::DomainError;
use crate::infrastructure::StoreError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("{message}")]
    Config { message: String },

    #[error("operation timed out after {budget:?}")]
    Timeout { budget: Duration },

    #[error("{context}: {source}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

impl ApplicationError {
    /// File operation `action` on `path` failed.
    pub fn io(action: &str, path: &Path, source: std::io::Error) -> Self {
        Self::OperationFailed {
            context: format!("{} {}", action, path.display()),
            source: Box::new(source),
        }
    }
}
