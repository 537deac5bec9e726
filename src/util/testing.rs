use std::env;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use mongodb::bson::Document;
use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::infrastructure::traits::{DocumentCursor, DocumentStore, StoreConnector};
use crate::infrastructure::{StoreError, StoreResult};

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "trace");
        }
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// In-memory [`DocumentStore`]; databases and collections keep insertion order.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    databases: Vec<(String, Vec<(String, Vec<Document>)>)>,
    unreachable: bool,
    broken_collection: Option<String>,
    finds: Arc<Mutex<Vec<(String, String, Option<u32>)>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a collection (creating the database on first use).
    pub fn with_collection(mut self, database: &str, collection: &str, documents: Vec<Document>) -> Self {
        let position = match self.databases.iter().position(|(name, _)| name == database) {
            Some(position) => position,
            None => {
                self.databases.push((database.to_string(), Vec::new()));
                self.databases.len() - 1
            }
        };
        self.databases[position]
            .1
            .push((collection.to_string(), documents));
        self
    }

    /// Every operation fails as if the server could not be reached.
    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    /// Cursor over `collection` fails after its first document.
    pub fn with_broken_cursor(mut self, collection: &str) -> Self {
        self.broken_collection = Some(collection.to_string());
        self
    }

    /// `(database, collection, batch_size)` of each `find_all` call so far.
    pub fn finds(&self) -> Vec<(String, String, Option<u32>)> {
        self.finds.lock().map(|f| f.clone()).unwrap_or_default()
    }

    fn check_reachable(&self, operation: &str) -> StoreResult<()> {
        if self.unreachable {
            return Err(StoreError::new(operation, "server selection timeout"));
        }
        Ok(())
    }

    fn collections(&self, database: &str) -> &[(String, Vec<Document>)] {
        self.databases
            .iter()
            .find(|(name, _)| name == database)
            .map(|(_, collections)| collections.as_slice())
            .unwrap_or(&[])
    }
}

impl DocumentStore for MemoryStore {
    fn ping(&self) -> StoreResult<()> {
        self.check_reachable("ping")
    }

    fn list_database_names(&self) -> StoreResult<Vec<String>> {
        self.check_reachable("list databases")?;
        Ok(self.databases.iter().map(|(name, _)| name.clone()).collect())
    }

    fn list_collection_names(&self, database: &str) -> StoreResult<Vec<String>> {
        self.check_reachable(&format!("list collections in {database}"))?;
        Ok(self
            .collections(database)
            .iter()
            .map(|(name, _)| name.clone())
            .collect())
    }

    fn find_all(
        &self,
        database: &str,
        collection: &str,
        batch_size: Option<u32>,
    ) -> StoreResult<DocumentCursor<'_>> {
        self.check_reachable(&format!("find {collection}"))?;
        if let Ok(mut finds) = self.finds.lock() {
            finds.push((database.to_string(), collection.to_string(), batch_size));
        }

        let documents = self
            .collections(database)
            .iter()
            .find(|(name, _)| name == collection)
            .map(|(_, documents)| documents.clone())
            .unwrap_or_default();

        let mut items: Vec<StoreResult<Document>> = documents.into_iter().map(Ok).collect();
        if self.broken_collection.as_deref() == Some(collection) {
            items.truncate(1);
            items.push(Err(StoreError::new(
                format!("cursor {collection}"),
                "connection reset",
            )));
        }
        Ok(Box::new(items.into_iter()))
    }
}

/// [`StoreConnector`] handing out a shared [`MemoryStore`] and recording requests.
#[derive(Debug, Default)]
pub struct MemoryConnector {
    store: MemoryStore,
    connections: Mutex<Vec<(String, Option<Duration>)>>,
}

impl MemoryConnector {
    pub fn new(store: MemoryStore) -> Self {
        Self {
            store,
            connections: Mutex::new(Vec::new()),
        }
    }

    /// `(uri, timeout)` of each `connect` call so far.
    pub fn connections(&self) -> Vec<(String, Option<Duration>)> {
        self.connections
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }
}

impl StoreConnector for MemoryConnector {
    fn connect(&self, uri: &str, timeout: Option<Duration>) -> StoreResult<Arc<dyn DocumentStore>> {
        if let Ok(mut connections) = self.connections.lock() {
            connections.push((uri.to_string(), timeout));
        }
        if !uri.starts_with("mongodb://") && !uri.starts_with("mongodb+srv://") {
            return Err(StoreError::new(
                "parse connection string",
                "scheme must be \"mongodb\" or \"mongodb+srv\"",
            ));
        }
        Ok(Arc::new(self.store.clone()))
    }
}
