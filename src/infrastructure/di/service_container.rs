//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{BackupService, CatalogService, ConnectService};
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::infrastructure::mongo::MongoConnector;
use crate::infrastructure::traits::{DocumentStore, FileSystem, RealFileSystem, StoreConnector};

/// Container holding the I/O implementations services are built from.
pub struct ServiceContainer {
    /// Location of the persisted settings
    pub config_path: PathBuf,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Opens document stores
    pub connector: Arc<dyn StoreConnector>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(config_path: PathBuf) -> Self {
        Self::with_deps(
            config_path,
            Arc::new(RealFileSystem),
            Arc::new(MongoConnector),
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        config_path: PathBuf,
        fs: Arc<dyn FileSystem>,
        connector: Arc<dyn StoreConnector>,
    ) -> Self {
        Self {
            config_path,
            fs,
            connector,
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Saved settings with environment overrides applied.
    pub fn load_settings(&self) -> ApplicationResult<Settings> {
        Settings::load_from(&self.config_path)
    }

    /// Open a store for `settings.uri`; a zero `timeout` keeps driver defaults.
    pub fn open_store(
        &self,
        settings: &Settings,
        timeout: Duration,
    ) -> ApplicationResult<Arc<dyn DocumentStore>> {
        let timeout = (!timeout.is_zero()).then_some(timeout);
        Ok(self.connector.connect(&settings.uri, timeout)?)
    }

    pub fn connect_service(&self) -> ConnectService {
        ConnectService::new(self.connector.clone(), self.config_path.clone())
    }

    pub fn catalog_service(&self, store: Arc<dyn DocumentStore>) -> CatalogService {
        CatalogService::new(store)
    }

    pub fn backup_service(&self, store: Arc<dyn DocumentStore>) -> BackupService {
        BackupService::new(store, self.fs.clone())
    }
}
