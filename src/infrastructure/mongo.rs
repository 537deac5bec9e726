//! MongoDB-backed document store (blocking driver API)

use std::sync::Arc;
use std::time::Duration;

use mongodb::bson::{doc, Document};
use mongodb::options::ClientOptions;
use mongodb::sync::Client;
use tracing::debug;

use crate::infrastructure::traits::{DocumentCursor, DocumentStore, StoreConnector};
use crate::infrastructure::{StoreError, StoreResult};

const APP_NAME: &str = "mongobak";

/// Connects to MongoDB with the official driver.
#[derive(Debug, Default)]
pub struct MongoConnector;

impl StoreConnector for MongoConnector {
    fn connect(&self, uri: &str, timeout: Option<Duration>) -> StoreResult<Arc<dyn DocumentStore>> {
        let mut options = ClientOptions::parse(uri)
            .run()
            .map_err(|e| StoreError::new("parse connection string", e))?;
        options.app_name = Some(APP_NAME.to_string());
        if let Some(timeout) = timeout {
            options.connect_timeout = Some(timeout);
            options.server_selection_timeout = Some(timeout);
        }
        debug!("connect: hosts={:?} timeout={:?}", options.hosts, timeout);

        let client = Client::with_options(options).map_err(|e| StoreError::new("connect", e))?;
        Ok(Arc::new(MongoStore { client }))
    }
}

/// [`DocumentStore`] over a connected client.
pub struct MongoStore {
    client: Client,
}

impl DocumentStore for MongoStore {
    fn ping(&self) -> StoreResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .run()
            .map(|_| ())
            .map_err(|e| StoreError::new("ping", e))
    }

    fn list_database_names(&self) -> StoreResult<Vec<String>> {
        self.client
            .list_database_names()
            .run()
            .map_err(|e| StoreError::new("list databases", e))
    }

    fn list_collection_names(&self, database: &str) -> StoreResult<Vec<String>> {
        self.client
            .database(database)
            .list_collection_names()
            .run()
            .map_err(|e| StoreError::new(format!("list collections in {database}"), e))
    }

    fn find_all(
        &self,
        database: &str,
        collection: &str,
        batch_size: Option<u32>,
    ) -> StoreResult<DocumentCursor<'_>> {
        let handle = self.client.database(database).collection::<Document>(collection);
        let mut find = handle.find(doc! {});
        if let Some(size) = batch_size {
            find = find.batch_size(size);
        }
        let cursor = find
            .run()
            .map_err(|e| StoreError::new(format!("find {collection}"), e))?;

        let name = collection.to_string();
        Ok(Box::new(cursor.map(move |item| {
            item.map_err(|e| StoreError::new(format!("cursor {name}"), e))
        })))
    }
}
