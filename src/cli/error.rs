//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::exitcode;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => exitcode::USAGE,
            CliError::Application(e) => match e {
                ApplicationError::Domain(_) => exitcode::DATAERR,
                ApplicationError::Store(_) => exitcode::UNAVAILABLE,
                ApplicationError::Config { .. } => exitcode::CONFIG,
                ApplicationError::Timeout { .. } => exitcode::TEMPFAIL,
                ApplicationError::OperationFailed { .. } => exitcode::IOERR,
            },
        }
    }
}
