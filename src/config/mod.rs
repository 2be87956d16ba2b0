//! Configuration module for Shelf-Press
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional, so an empty file (or no file at all) reproduces the
//! built-in bookshelf crawl.
//!
//! # Example
//!
//! ```no_run
//! use shelf_press::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("shelf.toml")).unwrap();
//! println!("Crawling from {}", config.crawler.start_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CatalogConfig, Config, CrawlerConfig, LeagueConfig, OutputConfig, SiteConfig,
    UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
