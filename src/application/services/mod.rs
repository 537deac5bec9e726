//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (DocumentStore, FileSystem, etc.)
//! but are themselves concrete structs, not traits.

mod backup;
mod catalog;
mod connect;

pub use backup::{BackupEvent, BackupPlan, BackupReport, BackupService, CollectionSummary};
pub use catalog::{Catalog, CatalogService};
pub use connect::ConnectService;
