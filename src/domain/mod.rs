//! Domain layer: backup rules and document handling
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod document;
pub mod error;
pub mod exclude;
pub mod output;
pub mod timing;

pub use document::{tag_provenance, DocumentRenderer, JsonMode, META_FIELD};
pub use error::DomainError;
pub use exclude::{split_csv, ExcludeSet};
pub use output::{collection_file_name, OutputTarget};
pub use timing::{parse_duration, Deadline};
