//! Shelf-Press: a resumable bookshelf crawler and static library builder
//!
//! This crate walks a paginated book catalog a few items at a time, turns each
//! plain-text book into a styled HTML page with a chapter sidebar, and keeps a
//! site index up to date. It also ships a small converter that folds tabular
//! player profiles into per-league JSON documents.

pub mod config;
pub mod crawler;
pub mod leagues;
pub mod output;
pub mod render;
pub mod state;
pub mod storage;

use thiserror::Error;

/// Main error type for Shelf-Press operations
#[derive(Debug, Error)]
pub enum ShelfError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error for {url}: {source}")]
    UrlParse {
        url: String,
        source: ::url::ParseError,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("League conversion error: {0}")]
    League(#[from] leagues::LeagueError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector in config: {0}")]
    InvalidSelector(String),
}

/// Result type alias for Shelf-Press operations
pub type Result<T> = std::result::Result<T, ShelfError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_once, step, Catalog, HttpCatalog, StepReport};
pub use state::CrawlState;
