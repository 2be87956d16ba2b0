//! Storage module for persisting crawl progress
//!
//! This module handles the crawl checkpoint:
//! - The `StateStore` trait the run loop is written against
//! - A JSON file implementation used by the binary
//! - An in-memory implementation for tests and dry runs

mod json;
mod memory;
mod traits;

pub use json::JsonStateStore;
pub use memory::MemoryStateStore;
pub use traits::{StateStore, StorageError, StorageResult};

use crate::config::Config;

/// Opens the checkpoint described by the configuration
///
/// # Arguments
///
/// * `config` - Supplies the state path and the start URL for fresh state
pub fn open_state_store(config: &Config) -> JsonStateStore {
    JsonStateStore::new(
        config.output.state_path.clone(),
        config.crawler.start_url.clone(),
    )
}
