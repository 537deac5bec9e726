//! Path context for I/O results

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Attach the failing action and path to an `io::Result`.
pub trait IoResultExt<T> {
    /// ```ignore
    /// writer.write_all(&line).with_path_context("write", &path)?;
    /// // error text: "write out/shop.users.jsonl: No space left on device"
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::io(action, path, e))
    }
}
