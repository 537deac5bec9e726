//! mongobak: back up MongoDB collections as Extended JSON lines
//!
//! Layers, innermost first:
//! - [`domain`]: exclude rules, output classification, document rendering
//! - [`application`]: connect, catalog and backup services
//! - [`infrastructure`]: MongoDB store, filesystem, service container
//! - [`cli`]: argument parsing and command dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
