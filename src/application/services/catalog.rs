//! Database and collection listing

use std::sync::Arc;

use tracing::debug;

use crate::application::ApplicationResult;
use crate::infrastructure::traits::DocumentStore;

/// Databases on the server plus the collections of one database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    /// All database names, in server order
    pub databases: Vec<String>,
    /// Database whose collections were listed
    pub database: String,
    /// Collection names of `database`, in server order
    pub collections: Vec<String>,
}

/// Service for enumerating what a server holds.
pub struct CatalogService {
    store: Arc<dyn DocumentStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn catalog(&self, database: &str) -> ApplicationResult<Catalog> {
        let databases = self.store.list_database_names()?;
        let collections = self.store.list_collection_names(database)?;
        debug!(
            "catalog: {} databases, {} collections in {}",
            databases.len(),
            collections.len(),
            database
        );

        Ok(Catalog {
            databases,
            database: database.to_string(),
            collections,
        })
    }
}
