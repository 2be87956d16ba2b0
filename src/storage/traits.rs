//! Storage traits and error types
//!
//! This module defines the trait interface for crawl-state backends and
//! associated error types.

use crate::state::CrawlState;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for crawl-state persistence
///
/// The run loop never touches the filesystem for its checkpoint directly;
/// it receives a `StateStore` so tests can swap in an in-memory one.
pub trait StateStore {
    /// Returns the persisted state, or a fresh default if nothing was saved yet
    ///
    /// A checkpoint that exists but cannot be parsed is an error, not a
    /// reason to start over.
    fn load(&self) -> StorageResult<CrawlState>;

    /// Replaces the persisted state with `state`
    fn save(&mut self, state: &CrawlState) -> StorageResult<()>;

    /// Discards any persisted state so the next `load` starts from scratch
    fn reset(&mut self) -> StorageResult<()>;
}
