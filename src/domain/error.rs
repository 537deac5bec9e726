//! Domain-level errors (no I/O concerns)

use thiserror::Error;

/// Domain errors represent invalid input or documents that cannot be rendered.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("invalid duration '{input}': {message}")]
    InvalidDuration { input: String, message: String },

    #[error("marshal {collection}: {message}")]
    Render { collection: String, message: String },
}
