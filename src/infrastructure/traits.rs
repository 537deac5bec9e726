//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with in-memory implementations.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use mongodb::bson::Document;

use crate::infrastructure::StoreResult;

/// Stream of documents read from one collection.
pub type DocumentCursor<'a> = Box<dyn Iterator<Item = StoreResult<Document>> + 'a>;

/// Read access to a document database.
pub trait DocumentStore: Send + Sync {
    /// Round-trip to the server to verify connectivity.
    fn ping(&self) -> StoreResult<()>;

    /// Names of all databases, in server order.
    fn list_database_names(&self) -> StoreResult<Vec<String>>;

    /// Names of all collections in `database`, in server order.
    fn list_collection_names(&self, database: &str) -> StoreResult<Vec<String>>;

    /// Iterate every document of a collection.
    ///
    /// `batch_size` sets the cursor batch size; `None` leaves it to the server.
    fn find_all(
        &self,
        database: &str,
        collection: &str,
        batch_size: Option<u32>,
    ) -> StoreResult<DocumentCursor<'_>>;
}

/// Opens a [`DocumentStore`] for a connection string.
pub trait StoreConnector: Send + Sync {
    /// `timeout` bounds connection establishment and server selection.
    fn connect(&self, uri: &str, timeout: Option<Duration>) -> StoreResult<Arc<dyn DocumentStore>>;
}

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Create directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Create or truncate a file for writing.
    fn create(&self, path: &Path) -> io::Result<Box<dyn Write + Send>>;

    /// Create parent directories if needed.
    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                self.create_dir_all(parent)?;
            }
        }
        Ok(())
    }

    /// `Some(is_dir)` if the path exists, `None` otherwise.
    fn probe_dir(&self, path: &Path) -> Option<bool> {
        self.exists(path).then(|| self.is_dir(path))
    }
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn create(&self, path: &Path) -> io::Result<Box<dyn Write + Send>> {
        Ok(Box::new(std::fs::File::create(path)?))
    }
}
