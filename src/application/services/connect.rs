//! Connection check and config persistence

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::infrastructure::traits::StoreConnector;

/// Verifies a connection string and saves it as the default.
pub struct ConnectService {
    connector: Arc<dyn StoreConnector>,
    config_path: PathBuf,
}

impl ConnectService {
    /// Create a new connect service writing to `config_path`.
    pub fn new(connector: Arc<dyn StoreConnector>, config_path: PathBuf) -> Self {
        Self {
            connector,
            config_path,
        }
    }

    /// Connect, ping, and on success save `{uri, db}`.
    ///
    /// The config file is left untouched when the server is unreachable.
    /// A zero `timeout` leaves the driver defaults in place.
    pub fn connect(&self, uri: &str, db: &str, timeout: Duration) -> ApplicationResult<Settings> {
        let settings = Settings::new(uri, db);
        settings.validate()?;

        debug!("connect: db={} timeout={:?}", db, timeout);
        let store = self
            .connector
            .connect(uri, (!timeout.is_zero()).then_some(timeout))?;
        store.ping()?;

        settings.save_to(&self.config_path)?;
        info!(
            "connected to {}, config saved to {}",
            settings.redacted_uri(),
            self.config_path.display()
        );
        Ok(settings)
    }
}
